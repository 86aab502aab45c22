use crate::catalog;
use crate::collection::Record;
use crate::collection::field_str;
use crate::collection::find_record;
use crate::format;
use crate::ports::AssetUploader;
use crate::ports::RemoteStore;
use crate::state::AppState;
use crate::store::CollectionClient;
use crate::store::Mutation;
use crate::templates;

use axum::extract::Form;
use axum::extract::Path as AxumPath;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;

use super::admin::{not_found, store_error_page};

pub(crate) async fn home<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
) -> Result<templates::HomeTemplate, Response> {
    let rooms = load_public(&state, &catalog::ROOMS, "/").await?;
    let features = load_public(&state, &catalog::FEATURES, "/").await?;
    let facilities = load_public(&state, &catalog::FACILITIES, "/").await?;

    Ok(templates::HomeTemplate {
        app_name: state.config.app_name,
        rooms: rooms.iter().map(room_card).collect(),
        features: features
            .iter()
            .map(|record| templates::FeatureCard {
                name: field_str(record, "name"),
                description: field_str(record, "description"),
            })
            .collect(),
        facilities: facilities
            .iter()
            .map(|record| {
                let image = field_str(record, "image");
                templates::FacilityCard {
                    name: field_str(record, "name"),
                    description: field_str(record, "description"),
                    has_image: !image.trim().is_empty(),
                    image,
                }
            })
            .collect(),
    })
}

pub(crate) async fn booking_form<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
    AxumPath(room_id): AxumPath<u64>,
) -> Result<templates::BookTemplate, Response> {
    let rooms = load_public(&state, &catalog::ROOMS, "/").await?;
    let room = find_record(&rooms, room_id).ok_or_else(not_found)?;
    Ok(templates::BookTemplate {
        app_name: state.config.app_name,
        room: room_card(room),
        error: String::new(),
        name: String::new(),
        phone: String::new(),
        check_in: String::new(),
        check_out: String::new(),
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct BookForm {
    name: String,
    phone: String,
    check_in: Option<String>,
    check_out: Option<String>,
}

pub(crate) async fn booking_submit<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
    AxumPath(room_id): AxumPath<u64>,
    Form(form): Form<BookForm>,
) -> Result<templates::NoticeTemplate, Response> {
    let rooms = load_public(&state, &catalog::ROOMS, &format!("/book/{room_id}")).await?;
    let room = find_record(&rooms, room_id).ok_or_else(not_found)?;

    let name = form.name.trim().to_string();
    let phone = form.phone.trim().to_string();
    if name.is_empty() || phone.is_empty() {
        let rerender = templates::BookTemplate {
            app_name: state.config.app_name,
            room: room_card(room),
            error: "Name and phone are required.".to_string(),
            name,
            phone,
            check_in: form.check_in.unwrap_or_default(),
            check_out: form.check_out.unwrap_or_default(),
        };
        return Err((StatusCode::BAD_REQUEST, rerender).into_response());
    }

    let mut booking = Record::new();
    booking.insert("name".to_string(), Value::from(name));
    booking.insert("phone".to_string(), Value::from(phone));
    booking.insert(
        "roomType".to_string(),
        Value::from(field_str(room, "roomType")),
    );
    booking.insert(
        "checkIn".to_string(),
        Value::from(form.check_in.unwrap_or_default()),
    );
    booking.insert(
        "checkOut".to_string(),
        Value::from(form.check_out.unwrap_or_default()),
    );
    booking.insert(
        "price".to_string(),
        room.get("price").cloned().unwrap_or(Value::Null),
    );
    booking.insert("bookingStatus".to_string(), Value::from("pending"));

    let client = CollectionClient::new(&state.store, &catalog::BOOKINGS);
    let mut records = client.load().await.map_err(|err| {
        eprintln!("failed to load bookings: {err}");
        store_error_page(&state.config.app_name, &format!("/book/{room_id}"))
    })?;
    client
        .apply(&mut records, Mutation::Insert(booking))
        .await
        .map_err(|err| {
            eprintln!("failed to sync bookings: {err}");
            store_error_page(&state.config.app_name, &format!("/book/{room_id}"))
        })?;

    Ok(templates::NoticeTemplate {
        app_name: state.config.app_name,
        heading: "Booking requested".to_string(),
        message: "Your booking request was received and is pending confirmation.".to_string(),
        back_href: "/".to_string(),
        back_label: "Back to rooms".to_string(),
    })
}

pub(crate) async fn contact_form<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
) -> templates::ContactTemplate {
    blank_contact(state.config.app_name)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContactFormData {
    name: String,
    email: String,
    subject: Option<String>,
    message: String,
}

pub(crate) async fn contact_submit<S: RemoteStore, U: AssetUploader>(
    State(state): State<AppState<S, U>>,
    Form(form): Form<ContactFormData>,
) -> Result<templates::NoticeTemplate, Response> {
    let name = form.name.trim().to_string();
    let email = form.email.trim().to_string();
    let message = form.message.trim().to_string();
    if name.is_empty() || email.is_empty() || message.is_empty() {
        let rerender = templates::ContactTemplate {
            error: "Name, email and message are required.".to_string(),
            name,
            email,
            subject: form.subject.unwrap_or_default(),
            message,
            ..blank_contact(state.config.app_name)
        };
        return Err((StatusCode::BAD_REQUEST, rerender).into_response());
    }

    let mut query = Record::new();
    query.insert("name".to_string(), Value::from(name));
    query.insert("email".to_string(), Value::from(email));
    query.insert(
        "subject".to_string(),
        Value::from(form.subject.unwrap_or_default().trim()),
    );
    query.insert("message".to_string(), Value::from(message));
    query.insert(
        "date".to_string(),
        Value::from(format::iso_date(OffsetDateTime::now_utc().date())),
    );

    let client = CollectionClient::new(&state.store, &catalog::QUERIES);
    let mut records = client.load().await.map_err(|err| {
        eprintln!("failed to load queries: {err}");
        store_error_page(&state.config.app_name, "/contact")
    })?;
    client
        .apply(&mut records, Mutation::Insert(query))
        .await
        .map_err(|err| {
            eprintln!("failed to sync queries: {err}");
            store_error_page(&state.config.app_name, "/contact")
        })?;

    Ok(templates::NoticeTemplate {
        app_name: state.config.app_name,
        heading: "Message sent".to_string(),
        message: "Thanks for getting in touch. We will reply as soon as we can.".to_string(),
        back_href: "/".to_string(),
        back_label: "Back to the site".to_string(),
    })
}

async fn load_public<S: RemoteStore, U: AssetUploader>(
    state: &AppState<S, U>,
    spec: &'static catalog::CollectionSpec,
    retry_href: &str,
) -> Result<Vec<Record>, Response> {
    CollectionClient::new(&state.store, spec)
        .load()
        .await
        .map_err(|err| {
            eprintln!("failed to load {}: {err}", spec.slug);
            store_error_page(&state.config.app_name, retry_href)
        })
}

fn room_card(record: &Record) -> templates::RoomCard {
    templates::RoomCard {
        id: crate::collection::record_id(record).unwrap_or(0),
        name: format::display_text(record.get("roomType")),
        description: field_str(record, "description"),
        capacity: format::display_text(record.get("capacity")),
        price: format::display_price(record.get("price")),
    }
}

fn blank_contact(app_name: String) -> templates::ContactTemplate {
    templates::ContactTemplate {
        app_name,
        error: String::new(),
        name: String::new(),
        email: String::new(),
        subject: String::new(),
        message: String::new(),
    }
}
