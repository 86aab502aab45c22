/// Which closed status vocabulary a field uses. Both domains share one
/// registry; the legacy site duplicated a lookup table per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusDomain {
    Booking,
    Refund,
}

pub(crate) struct StatusBadge {
    pub(crate) label: String,
    pub(crate) css_class: &'static str,
}

const BOOKING_STATUSES: &[(&str, &str, &str)] = &[
    ("pending", "Pending", "badge-pending"),
    ("completed", "Completed", "badge-completed"),
    ("cancelled", "Cancelled", "badge-cancelled"),
];

const REFUND_STATUSES: &[(&str, &str, &str)] = &[
    ("pending", "Pending", "badge-pending"),
    ("approved", "Approved", "badge-approved"),
    ("rejected", "Rejected", "badge-rejected"),
];

/// Maps a raw status value to its display label and style. A value outside
/// the closed vocabulary renders verbatim with the neutral style, never
/// hidden and never blank.
pub(crate) fn badge(domain: StatusDomain, raw: &str) -> StatusBadge {
    let known = match domain {
        StatusDomain::Booking => BOOKING_STATUSES,
        StatusDomain::Refund => REFUND_STATUSES,
    };
    let normalized = raw.trim().to_lowercase();
    for (value, label, css_class) in known {
        if *value == normalized {
            return StatusBadge {
                label: (*label).to_string(),
                css_class,
            };
        }
    }
    StatusBadge {
        label: raw.to_string(),
        css_class: "badge-neutral",
    }
}

pub(crate) fn is_pending(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("pending")
}

#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use super::*;

    #[test]
    fn badge__should_map_known_booking_statuses() {
        // Given / When
        let shown = badge(StatusDomain::Booking, "Completed");

        // Then
        assert_eq!(shown.label, "Completed");
        assert_eq!(shown.css_class, "badge-completed");
    }

    #[test]
    fn badge__should_map_known_refund_statuses() {
        // Given / When
        let shown = badge(StatusDomain::Refund, "rejected");

        // Then
        assert_eq!(shown.label, "Rejected");
        assert_eq!(shown.css_class, "badge-rejected");
    }

    #[test]
    fn badge__should_render_unknown_status_verbatim_with_neutral_style() {
        // Given / When
        let shown = badge(StatusDomain::Booking, "archived");

        // Then
        assert_eq!(shown.label, "archived");
        assert_eq!(shown.css_class, "badge-neutral");
    }

    #[test]
    fn is_pending__should_ignore_case_and_whitespace() {
        // Given / When / Then
        assert!(is_pending(" Pending "));
        assert!(!is_pending("approved"));
    }
}
