//! Filter Engine
//!
//! One pass reads the model, enumerates items fresh, resolves each color,
//! and shows or hides every node of the item's group. Nothing is cached
//! between passes; the host framework may have replaced every node.

use crate::context::{is_scaled_view, DuplicatePolicy, PageContext};
use crate::grouper::group_nodes;
use crate::model::read_model;
use crate::page::{Element, Page};
use crate::resolver::ColorResolver;
use crate::state::FilterState;
use crate::types::FilterSummary;

/// Applies the allow-set to one page context.
pub struct FilterEngine {
    context: PageContext,
    resolver: Box<dyn ColorResolver>,
    state: FilterState,
}

impl FilterEngine {
    /// Engine for `context` with every color allowed.
    pub fn new(context: PageContext) -> Self {
        Self::with_state(context, FilterState::new())
    }

    pub fn with_state(context: PageContext, state: FilterState) -> Self {
        Self {
            context,
            resolver: context.resolver(),
            state,
        }
    }

    pub fn context(&self) -> PageContext {
        self.context
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Mutable allow-set. Run [`FilterEngine::apply`] after changing it.
    pub fn state_mut(&mut self) -> &mut FilterState {
        &mut self.state
    }

    /// Run one filter pass and update the status label.
    pub fn apply<P: Page>(&self, page: &P) -> FilterSummary {
        let model = if self.resolver.consults_model() {
            read_model(page)
        } else {
            None
        };

        let items = page.query_all(self.context.item_selector());
        let layout = self.context.layout();
        let mut shown = 0usize;

        for (index, item) in items.iter().enumerate() {
            let color = self.resolver.resolve(item, model.as_ref(), index);
            let visible = self.state.is_visible(color.as_deref());

            for node in group_nodes(item, layout) {
                node.set_visible(visible);
            }

            if visible {
                shown += 1;
            }
        }

        let raw = FilterSummary { shown, total: items.len() };
        let summary = self.correct_duplicates(raw, &page.location_hash());

        update_label(page, self.context.panel().label_id, &summary.label_text());
        log::trace!(
            "{} pass: {}/{} shown (model: {})",
            self.context.name(),
            summary.shown,
            summary.total,
            model.is_some()
        );

        summary
    }

    fn correct_duplicates(&self, raw: FilterSummary, hash: &str) -> FilterSummary {
        match self.context.duplicate_policy() {
            DuplicatePolicy::HalveWhenScaled if is_scaled_view(hash) => FilterSummary {
                shown: raw.shown / 2,
                total: raw.total / 2,
            },
            _ => raw,
        }
    }
}

/// Write `text` into the label unless it already reads that way. A write
/// is itself a DOM mutation, so no-op writes must not happen.
fn update_label<P: Page>(page: &P, label_id: &str, text: &str) {
    match page.text_by_id(label_id) {
        Some(current) if current == text => {}
        Some(_) => {
            page.set_text_by_id(label_id, text);
        }
        None => {}
    }
}
