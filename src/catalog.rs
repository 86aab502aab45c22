use crate::status::StatusDomain;

/// How a column value is rendered in the admin tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellKind {
    Text,
    Price,
    Date,
    Status(StatusDomain),
}

pub(crate) struct Column {
    pub(crate) field: &'static str,
    pub(crate) label: &'static str,
    pub(crate) kind: CellKind,
}

/// Input widget for a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Text,
    LongText,
    Date,
    Select(&'static [&'static str]),
}

pub(crate) struct FormField {
    pub(crate) name: &'static str,
    pub(crate) label: &'static str,
    pub(crate) required: bool,
    pub(crate) kind: FieldKind,
}

/// Per-feature configuration. The six admin features of the legacy site are
/// structurally identical, so one table drives one generic implementation:
/// which remote document backs the feature, which field the store nests its
/// array under, what the table shows, what search covers and what the forms
/// edit.
pub(crate) struct CollectionSpec {
    pub(crate) slug: &'static str,
    pub(crate) title: &'static str,
    /// Remote resource id; doubles as the collection document id.
    pub(crate) resource: u64,
    pub(crate) field_key: &'static str,
    pub(crate) columns: &'static [Column],
    pub(crate) search_fields: &'static [&'static str],
    pub(crate) form_fields: &'static [FormField],
    pub(crate) can_create: bool,
    pub(crate) can_edit: bool,
    pub(crate) can_delete: bool,
}

impl CollectionSpec {
    /// The status column, when the feature has one.
    pub(crate) fn status_column(&self) -> Option<(&'static str, StatusDomain)> {
        self.columns.iter().find_map(|column| match column.kind {
            CellKind::Status(domain) => Some((column.field, domain)),
            _ => None,
        })
    }
}

pub(crate) static ROOMS: CollectionSpec = CollectionSpec {
    slug: "rooms",
    title: "Rooms",
    resource: 2,
    field_key: "rooms",
    columns: &[
        Column {
            field: "roomType",
            label: "Room",
            kind: CellKind::Text,
        },
        Column {
            field: "description",
            label: "Description",
            kind: CellKind::Text,
        },
        Column {
            field: "capacity",
            label: "Capacity",
            kind: CellKind::Text,
        },
        Column {
            field: "price",
            label: "Price per night",
            kind: CellKind::Price,
        },
    ],
    search_fields: &["roomType", "description"],
    form_fields: &[
        FormField {
            name: "roomType",
            label: "Room name",
            required: true,
            kind: FieldKind::Text,
        },
        FormField {
            name: "description",
            label: "Description",
            required: false,
            kind: FieldKind::LongText,
        },
        FormField {
            name: "capacity",
            label: "Capacity",
            required: false,
            kind: FieldKind::Text,
        },
        FormField {
            name: "price",
            label: "Price per night",
            required: false,
            kind: FieldKind::Text,
        },
    ],
    can_create: true,
    can_edit: true,
    can_delete: true,
};

pub(crate) static BOOKINGS: CollectionSpec = CollectionSpec {
    slug: "bookings",
    title: "Bookings",
    resource: 3,
    field_key: "bookings",
    columns: &[
        Column {
            field: "name",
            label: "Guest",
            kind: CellKind::Text,
        },
        Column {
            field: "phone",
            label: "Phone",
            kind: CellKind::Text,
        },
        Column {
            field: "roomType",
            label: "Room",
            kind: CellKind::Text,
        },
        Column {
            field: "checkIn",
            label: "Check-in",
            kind: CellKind::Date,
        },
        Column {
            field: "checkOut",
            label: "Check-out",
            kind: CellKind::Date,
        },
        Column {
            field: "price",
            label: "Price",
            kind: CellKind::Price,
        },
        Column {
            field: "bookingStatus",
            label: "Status",
            kind: CellKind::Status(StatusDomain::Booking),
        },
    ],
    search_fields: &["name", "phone", "roomType"],
    form_fields: &[
        FormField {
            name: "name",
            label: "Guest name",
            required: true,
            kind: FieldKind::Text,
        },
        FormField {
            name: "phone",
            label: "Phone",
            required: false,
            kind: FieldKind::Text,
        },
        FormField {
            name: "roomType",
            label: "Room",
            required: false,
            kind: FieldKind::Text,
        },
        FormField {
            name: "checkIn",
            label: "Check-in",
            required: false,
            kind: FieldKind::Date,
        },
        FormField {
            name: "checkOut",
            label: "Check-out",
            required: false,
            kind: FieldKind::Date,
        },
        FormField {
            name: "price",
            label: "Price",
            required: false,
            kind: FieldKind::Text,
        },
        FormField {
            name: "bookingStatus",
            label: "Status",
            required: false,
            kind: FieldKind::Select(&["pending", "completed", "cancelled"]),
        },
    ],
    can_create: false,
    can_edit: true,
    can_delete: true,
};

pub(crate) static REFUNDS: CollectionSpec = CollectionSpec {
    slug: "refunds",
    title: "Refund requests",
    resource: 4,
    field_key: "refundBookings",
    columns: &[
        Column {
            field: "name",
            label: "Guest",
            kind: CellKind::Text,
        },
        Column {
            field: "roomType",
            label: "Room",
            kind: CellKind::Text,
        },
        Column {
            field: "refundAmount",
            label: "Amount",
            kind: CellKind::Price,
        },
        Column {
            field: "reason",
            label: "Reason",
            kind: CellKind::Text,
        },
        Column {
            field: "refundStatus",
            label: "Status",
            kind: CellKind::Status(StatusDomain::Refund),
        },
        Column {
            field: "processedDate",
            label: "Processed",
            kind: CellKind::Date,
        },
    ],
    search_fields: &["name", "roomType", "reason"],
    form_fields: &[],
    can_create: false,
    can_edit: false,
    can_delete: true,
};

pub(crate) static FEATURES: CollectionSpec = CollectionSpec {
    slug: "features",
    title: "Features",
    resource: 6,
    field_key: "features",
    columns: &[
        Column {
            field: "name",
            label: "Feature",
            kind: CellKind::Text,
        },
        Column {
            field: "description",
            label: "Description",
            kind: CellKind::Text,
        },
    ],
    search_fields: &["name", "description"],
    form_fields: &[
        FormField {
            name: "name",
            label: "Feature name",
            required: true,
            kind: FieldKind::Text,
        },
        FormField {
            name: "description",
            label: "Description",
            required: false,
            kind: FieldKind::LongText,
        },
    ],
    can_create: true,
    can_edit: true,
    can_delete: true,
};

pub(crate) static FACILITIES: CollectionSpec = CollectionSpec {
    slug: "facilities",
    title: "Facilities",
    resource: 7,
    field_key: "facilities",
    columns: &[
        Column {
            field: "name",
            label: "Facility",
            kind: CellKind::Text,
        },
        Column {
            field: "description",
            label: "Description",
            kind: CellKind::Text,
        },
        Column {
            field: "image",
            label: "Image",
            kind: CellKind::Text,
        },
    ],
    search_fields: &["name", "description"],
    form_fields: &[
        FormField {
            name: "name",
            label: "Facility name",
            required: true,
            kind: FieldKind::Text,
        },
        FormField {
            name: "description",
            label: "Description",
            required: false,
            kind: FieldKind::LongText,
        },
    ],
    can_create: true,
    can_edit: true,
    can_delete: true,
};

pub(crate) static QUERIES: CollectionSpec = CollectionSpec {
    slug: "queries",
    title: "User queries",
    resource: 9,
    field_key: "UserQueries",
    columns: &[
        Column {
            field: "name",
            label: "Name",
            kind: CellKind::Text,
        },
        Column {
            field: "email",
            label: "Email",
            kind: CellKind::Text,
        },
        Column {
            field: "subject",
            label: "Subject",
            kind: CellKind::Text,
        },
        Column {
            field: "message",
            label: "Message",
            kind: CellKind::Text,
        },
        Column {
            field: "date",
            label: "Received",
            kind: CellKind::Date,
        },
    ],
    search_fields: &["name", "email", "subject", "message"],
    form_fields: &[],
    can_create: false,
    can_edit: false,
    can_delete: true,
};

/// Read by login only; never routed as an admin table.
pub(crate) static ADMINS: CollectionSpec = CollectionSpec {
    slug: "admins",
    title: "Admins",
    resource: 1,
    field_key: "admins",
    columns: &[],
    search_fields: &[],
    form_fields: &[],
    can_create: false,
    can_edit: false,
    can_delete: false,
};

pub(crate) static CATALOG: &[&CollectionSpec] = &[
    &ROOMS,
    &BOOKINGS,
    &REFUNDS,
    &FEATURES,
    &FACILITIES,
    &QUERIES,
];

pub(crate) fn by_slug(slug: &str) -> Option<&'static CollectionSpec> {
    CATALOG.iter().copied().find(|spec| spec.slug == slug)
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;
    use crate::status::StatusDomain;
    use std::collections::HashSet;

    #[test]
    fn by_slug__should_resolve_every_catalog_entry() {
        // Given / When / Then
        for spec in CATALOG {
            let found = by_slug(spec.slug).expect("catalog entry");
            assert_eq!(found.resource, spec.resource);
        }
        assert!(by_slug("admins").is_none());
        assert!(by_slug("unknown").is_none());
    }

    #[test]
    fn catalog__should_use_distinct_resources_and_field_keys() {
        // Given
        let mut resources = HashSet::new();
        let mut field_keys = HashSet::new();

        // When / Then
        for spec in CATALOG {
            assert!(resources.insert(spec.resource));
            assert!(field_keys.insert(spec.field_key));
        }
        assert!(!resources.contains(&ADMINS.resource));
    }

    #[test]
    fn status_column__should_expose_domain_for_bookings_and_refunds() {
        // Given / When / Then
        assert_eq!(
            BOOKINGS.status_column(),
            Some(("bookingStatus", StatusDomain::Booking))
        );
        assert_eq!(
            REFUNDS.status_column(),
            Some(("refundStatus", StatusDomain::Refund))
        );
        assert_eq!(FEATURES.status_column(), None);
    }
}
