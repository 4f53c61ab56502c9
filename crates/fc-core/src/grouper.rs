//! Row grouping
//!
//! One circle spans several sibling `<tr>` elements: an optional
//! `infotable-sep` spacer before the detail row, then a fixed number of
//! sub-rows after it. All of them share the circle's visibility.

use crate::page::Element;

/// Class of the spacer row preceding a detail row.
pub const SEPARATOR_CLASS: &str = "infotable-sep";

/// Sibling layout of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupLayout {
    /// Include the previous sibling when it carries this class
    pub leading_separator: Option<&'static str>,
    /// Number of following siblings belonging to the item
    pub trailing: usize,
}

impl GroupLayout {
    /// One element is one item.
    pub const SINGLE: Self = Self { leading_separator: None, trailing: 0 };

    /// Favorites page: separator, detail row, 2 sub-rows.
    pub const FAVORITES: Self = Self { leading_separator: Some(SEPARATOR_CLASS), trailing: 2 };

    /// Circle list page: separator, detail row, 3 sub-rows.
    pub const CIRCLE_LIST: Self = Self { leading_separator: Some(SEPARATOR_CLASS), trailing: 3 };
}

/// Collect the nodes that make up the item anchored at `anchor`, in
/// document order. Missing siblings shorten the group.
pub fn group_nodes<E: Element>(anchor: &E, layout: GroupLayout) -> Vec<E> {
    let mut nodes = Vec::with_capacity(layout.trailing + 2);

    if let Some(class) = layout.leading_separator {
        if let Some(prev) = anchor.previous_sibling() {
            if prev.has_class(class) {
                nodes.push(prev);
            }
        }
    }

    nodes.push(anchor.clone());

    let mut cursor = anchor.next_sibling();
    for _ in 0..layout.trailing {
        match cursor {
            Some(node) => {
                cursor = node.next_sibling();
                nodes.push(node);
            }
            None => break,
        }
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePage;

    #[test]
    fn test_favorites_group() {
        let page = FakePage::new();
        let table = page.append(&page.root(), &["t-user-favorites"]);
        let sep = page.append(&table, &[SEPARATOR_CLASS]);
        let detail = page.append(&table, &["webcatalog-circle-list-detail"]);
        let r1 = page.append(&table, &[]);
        let r2 = page.append(&table, &[]);
        let next_sep = page.append(&table, &[SEPARATOR_CLASS]);

        let group = group_nodes(&detail, GroupLayout::FAVORITES);
        assert_eq!(group, vec![sep, detail.clone(), r1, r2]);
        assert!(!group.contains(&next_sep));
    }

    #[test]
    fn test_circle_list_group_spans_three() {
        let page = FakePage::new();
        let table = page.append(&page.root(), &[]);
        let detail = page.append(&table, &["webcatalog-circle-list-detail"]);
        let rows: Vec<_> = (0..4).map(|_| page.append(&table, &[])).collect();

        let group = group_nodes(&detail, GroupLayout::CIRCLE_LIST);
        assert_eq!(group.len(), 4);
        assert_eq!(group[0], detail);
        assert_eq!(&group[1..], &rows[..3]);
    }

    #[test]
    fn test_previous_without_separator_is_skipped() {
        let page = FakePage::new();
        let table = page.append(&page.root(), &[]);
        page.append(&table, &["header"]);
        let detail = page.append(&table, &[]);

        let group = group_nodes(&detail, GroupLayout::FAVORITES);
        assert_eq!(group, vec![detail]);
    }

    #[test]
    fn test_truncated_at_end_of_list() {
        let page = FakePage::new();
        let table = page.append(&page.root(), &[]);
        let detail = page.append(&table, &[]);
        let only = page.append(&table, &[]);

        let group = group_nodes(&detail, GroupLayout::CIRCLE_LIST);
        assert_eq!(group, vec![detail, only]);
    }

    #[test]
    fn test_single_layout() {
        let page = FakePage::new();
        let marker = page.append(&page.root(), &["favorite-backgroundcolor-1"]);
        page.append(&page.root(), &[]);

        assert_eq!(group_nodes(&marker, GroupLayout::SINGLE), vec![marker]);
    }
}
