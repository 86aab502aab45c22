use askama::Template;
use askama_web::WebTemplate;

use crate::view::RowView;

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub(crate) struct LoginTemplate {
    pub(crate) app_name: String,
    pub(crate) error: String,
    pub(crate) next: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub(crate) struct DashboardTemplate {
    pub(crate) app_name: String,
    pub(crate) tiles: Vec<DashboardTile>,
}

pub(crate) struct DashboardTile {
    pub(crate) slug: String,
    pub(crate) title: String,
    pub(crate) total: usize,
    pub(crate) pending: usize,
    pub(crate) has_pending: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "collection.html")]
pub(crate) struct CollectionTemplate {
    pub(crate) app_name: String,
    pub(crate) title: String,
    pub(crate) slug: String,
    pub(crate) query: String,
    pub(crate) column_labels: Vec<String>,
    pub(crate) rows: Vec<RowView>,
    pub(crate) total: usize,
    pub(crate) can_create: bool,
    pub(crate) can_edit: bool,
    pub(crate) can_delete: bool,
    pub(crate) is_refunds: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "record_form.html")]
pub(crate) struct RecordFormTemplate {
    pub(crate) app_name: String,
    pub(crate) title: String,
    pub(crate) heading: String,
    pub(crate) action: String,
    pub(crate) back_href: String,
    pub(crate) error: String,
    pub(crate) fields: Vec<FieldView>,
}

pub(crate) struct FieldView {
    pub(crate) name: String,
    pub(crate) label: String,
    pub(crate) value: String,
    pub(crate) required: bool,
    pub(crate) is_select: bool,
    pub(crate) is_long: bool,
    pub(crate) input_type: &'static str,
    pub(crate) options: Vec<SelectOption>,
}

pub(crate) struct SelectOption {
    pub(crate) value: String,
    pub(crate) selected: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "confirm_delete.html")]
pub(crate) struct ConfirmDeleteTemplate {
    pub(crate) app_name: String,
    pub(crate) title: String,
    pub(crate) summary: String,
    pub(crate) action: String,
    pub(crate) cancel_href: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "reject.html")]
pub(crate) struct RejectTemplate {
    pub(crate) app_name: String,
    pub(crate) summary: String,
    pub(crate) action: String,
    pub(crate) error: String,
    pub(crate) reason: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub(crate) struct ErrorTemplate {
    pub(crate) app_name: String,
    pub(crate) message: String,
    pub(crate) retry_href: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub(crate) struct HomeTemplate {
    pub(crate) app_name: String,
    pub(crate) rooms: Vec<RoomCard>,
    pub(crate) features: Vec<FeatureCard>,
    pub(crate) facilities: Vec<FacilityCard>,
}

pub(crate) struct RoomCard {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) capacity: String,
    pub(crate) price: String,
}

pub(crate) struct FeatureCard {
    pub(crate) name: String,
    pub(crate) description: String,
}

pub(crate) struct FacilityCard {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) image: String,
    pub(crate) has_image: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "book.html")]
pub(crate) struct BookTemplate {
    pub(crate) app_name: String,
    pub(crate) room: RoomCard,
    pub(crate) error: String,
    pub(crate) name: String,
    pub(crate) phone: String,
    pub(crate) check_in: String,
    pub(crate) check_out: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub(crate) struct ContactTemplate {
    pub(crate) app_name: String,
    pub(crate) error: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) subject: String,
    pub(crate) message: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "notice.html")]
pub(crate) struct NoticeTemplate {
    pub(crate) app_name: String,
    pub(crate) heading: String,
    pub(crate) message: String,
    pub(crate) back_href: String,
    pub(crate) back_label: String,
}
