//! Direct icon links
//!
//! On the list pages each circle row carries a `.support-list` of service
//! icons that open the circle detail page first. Rewriting them needs only
//! the row's circle id and the model; this module works out which icon goes
//! where, and the binding patches the DOM.

use crate::model::{Circle, Model};
use crate::page::Element;

/// Circle detail rows carrying the icons.
pub const DETAIL_ROW_SELECTOR: &str = "tr.webcatalog-circle-list-detail";

/// Container of the service icons inside a row.
pub const SUPPORT_LIST_CLASS: &str = "support-list";

/// Attribute marking an icon as already rewritten.
pub const REPLACED_MARKER_ATTRIBUTE: &str = "data-link-replaced";

/// Icon class to model URL field.
pub const ICON_URL_FIELDS: [(&str, &str); 5] = [
    ("support-list-pixiv", "PixivUrl"),
    ("support-list-twitter", "TwitterUrl"),
    ("support-list-myhome", "WebSite"),
    ("support-list-niconico", "NiconicoUrl"),
    ("support-list-clipstudio", "ClipstudioUrl"),
];

/// One icon to point at an external URL.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LinkTarget {
    pub icon_class: &'static str,
    pub url: String,
}

/// Parse a row `id` attribute the lenient way the host's ids need: optional
/// leading whitespace and sign, then leading digits. Zero is not an id.
pub fn parse_row_id(attr: &str) -> Option<i64> {
    let s = attr.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    let value = if negative { -value } else { value };
    (value != 0).then_some(value)
}

/// Non-blank URLs of `circle`, one per icon.
pub fn circle_link_targets(circle: &Circle) -> Vec<LinkTarget> {
    ICON_URL_FIELDS
        .iter()
        .filter_map(|&(icon_class, field)| {
            let url = circle.url_field(field)?;
            if url.trim().is_empty() {
                return None;
            }
            Some(LinkTarget { icon_class, url: url.to_string() })
        })
        .collect()
}

/// Link targets for the row whose `id` attribute is `row_id`.
pub fn link_targets(model: &Model, row_id: &str) -> Vec<LinkTarget> {
    parse_row_id(row_id)
        .and_then(|id| model.circle_by_id(id))
        .map(circle_link_targets)
        .unwrap_or_default()
}

/// Link targets for a detail row element, keyed by its `id` attribute.
pub fn row_link_targets<E: Element>(model: &Model, row: &E) -> Vec<LinkTarget> {
    row.attribute("id")
        .map(|id| link_targets(model, &id))
        .unwrap_or_default()
}
