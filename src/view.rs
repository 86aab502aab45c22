use crate::catalog::CellKind;
use crate::catalog::CollectionSpec;
use crate::collection::Record;
use crate::collection::record_id;
use crate::format;
use crate::status;

/// One rendered table row. Everything the template needs is projected here
/// so the templates stay free of formatting rules.
pub(crate) struct RowView {
    pub(crate) id: u64,
    pub(crate) cells: Vec<CellView>,
    /// True when the feature's status field reads `pending`; drives the
    /// approve/reject affordances on the refunds table.
    pub(crate) pending: bool,
}

pub(crate) struct CellView {
    pub(crate) text: String,
    pub(crate) css_class: &'static str,
}

pub(crate) fn project_rows(spec: &CollectionSpec, records: &[Record]) -> Vec<RowView> {
    records
        .iter()
        .map(|record| RowView {
            id: record_id(record).unwrap_or(0),
            cells: spec
                .columns
                .iter()
                .map(|column| project_cell(column.kind, record.get(column.field).cloned()))
                .collect(),
            pending: spec
                .status_column()
                .and_then(|(field, _)| record.get(field))
                .map(crate::collection::search_text)
                .is_some_and(|raw| status::is_pending(&raw)),
        })
        .collect()
}

fn project_cell(kind: CellKind, value: Option<serde_json::Value>) -> CellView {
    let value = value.as_ref();
    match kind {
        CellKind::Text => CellView {
            text: format::display_text(value),
            css_class: "",
        },
        CellKind::Price => CellView {
            text: format::display_price(value),
            css_class: "cell-price",
        },
        CellKind::Date => CellView {
            text: format::display_date(value),
            css_class: "",
        },
        CellKind::Status(domain) => {
            let badge = status::badge(domain, &format::display_text(value));
            CellView {
                text: badge.label,
                css_class: badge.css_class,
            }
        }
    }
}
