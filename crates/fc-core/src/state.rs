//! Allow-set of favorite colors
//!
//! A plain value holder. Callers run a filter pass after every mutation.

use std::collections::BTreeSet;

use crate::colors::{find_color, is_blank, BLANK_COLOR_ID, COLOR_DEFINITIONS};

/// Set of color ids the user wants to see.
///
/// Only catalog ids can be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    allowed: BTreeSet<&'static str>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterState {
    /// Every color allowed.
    pub fn new() -> Self {
        let mut state = Self { allowed: BTreeSet::new() };
        state.select_all();
        state
    }

    /// Allow a color. Returns false for ids outside the catalog.
    pub fn allow(&mut self, id: &str) -> bool {
        match find_color(id) {
            Some(def) => {
                self.allowed.insert(def.id);
                true
            }
            None => false,
        }
    }

    pub fn disallow(&mut self, id: &str) {
        self.allowed.remove(id);
    }

    /// Set one color's membership, as a checkbox toggle does.
    pub fn set_allowed(&mut self, id: &str, allowed: bool) -> bool {
        if allowed {
            self.allow(id)
        } else {
            self.disallow(id);
            find_color(id).is_some()
        }
    }

    pub fn is_allowed(&self, id: &str) -> bool {
        self.allowed.contains(id)
    }

    pub fn select_all(&mut self) {
        self.allowed.extend(COLOR_DEFINITIONS.iter().map(|c| c.id));
    }

    pub fn deselect_all(&mut self) {
        self.allowed.clear();
    }

    pub fn is_allow_all(&self) -> bool {
        COLOR_DEFINITIONS.iter().all(|c| self.allowed.contains(c.id))
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Allowed ids in catalog order.
    pub fn allowed_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        COLOR_DEFINITIONS
            .iter()
            .map(|c| c.id)
            .filter(move |id| self.allowed.contains(id))
    }

    /// Visibility rule: an explicit color must be allowed; no color (or the
    /// blank color) needs the blank id to be allowed.
    pub fn is_visible(&self, color: Option<&str>) -> bool {
        match color {
            Some(id) if !is_blank(id) => self.is_allowed(id),
            _ => self.is_allowed(BLANK_COLOR_ID),
        }
    }
}
