//! Reactive Sync Controller
//!
//! The host framework re-renders the catalog whenever it likes. Every
//! mutation batch is reviewed here and, if it came from the host, the filter
//! runs again. Batches made entirely of our own writes (control panel
//! contents, `style` visibility toggles) are dropped before they can start a
//! mutate/observe loop.

use crate::config::FilterConfig;
use crate::context::PageContext;
use crate::engine::FilterEngine;
use crate::page::{ControlPanel, Page};
use crate::poll::{MarkerPoll, PollState};
use crate::state::FilterState;
use crate::types::{FilterSummary, MutationKind, MutationSummary};

/// Attribute written by our own show/hide calls.
const VISIBILITY_ATTRIBUTE: &str = "style";

/// What to do with one mutation batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Self-inflicted or irrelevant; do nothing.
    Ignore,
    Refresh {
        rebuild_panel: bool,
        refilter: bool,
    },
}

/// Decides how the page reacts to a mutation batch.
#[derive(Debug, Clone, Copy)]
pub struct SyncController {
    context: PageContext,
}

impl SyncController {
    pub fn new(context: PageContext) -> Self {
        Self { context }
    }

    /// Review one batch. `panel_present` is the panel's state right now.
    pub fn review(&self, batch: &[MutationSummary], panel_present: bool) -> Verdict {
        let foreign: Vec<&MutationSummary> = batch.iter().filter(|r| !is_own_write(r)).collect();
        if foreign.is_empty() {
            return Verdict::Ignore;
        }

        let rebuild_panel = !panel_present;
        let markers_changed = !self.context.requires_marker_mutations()
            || foreign
                .iter()
                .any(|r| r.kind.contains(MutationKind::CHILD_LIST) && r.touches_markers);
        // A fresh panel needs a pass to fill its label.
        let refilter = markers_changed || rebuild_panel;

        if !refilter {
            return Verdict::Ignore;
        }
        Verdict::Refresh { rebuild_panel, refilter }
    }
}

fn is_own_write(record: &MutationSummary) -> bool {
    if record.inside_panel {
        return true;
    }
    record.kind.contains(MutationKind::ATTRIBUTES)
        && record.attribute_name.as_deref() == Some(VISIBILITY_ATTRIBUTE)
}

// =============================================================================
// Filter Session
// =============================================================================

/// How the session began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Startup {
    /// Panel built and first pass done.
    Ready(FilterSummary),
    /// Items are not there yet; tick [`FilterSession::poll_tick`] on the
    /// configured interval until it leaves `Searching`.
    Polling,
}

/// Everything one injected page needs: engine, allow-set, controller and
/// marker poll. Owned by the binding's event callbacks.
pub struct FilterSession {
    engine: FilterEngine,
    controller: SyncController,
    poll: MarkerPoll,
    config: FilterConfig,
    passes: usize,
}

impl FilterSession {
    pub fn new(context: PageContext, config: FilterConfig) -> Self {
        Self {
            engine: FilterEngine::new(context),
            controller: SyncController::new(context),
            poll: MarkerPoll::new(config.poll_attempts),
            config,
            passes: 0,
        }
    }

    pub fn context(&self) -> PageContext {
        self.engine.context()
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn state(&self) -> &FilterState {
        self.engine.state()
    }

    /// Number of filter passes run so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn poll_state(&self) -> PollState {
        self.poll.state()
    }

    /// Initial trigger, once the document has been parsed.
    pub fn start<H: Page + ControlPanel>(&mut self, host: &H) -> Startup {
        if self.context().polls_for_items() {
            return Startup::Polling;
        }
        self.ensure_panel(host);
        Startup::Ready(self.refilter(host))
    }

    /// One marker check. Returns the poll state after the check; callers
    /// schedule another tick only while it is `Searching`.
    pub fn poll_tick<H: Page + ControlPanel>(&mut self, host: &H) -> PollState {
        if !self.poll.state().is_searching() {
            return self.poll.state();
        }

        let found = self.items_present(host);
        let state = self.poll.tick(found);
        match state {
            PollState::Found => {
                self.ensure_panel(host);
                self.refilter(host);
            }
            PollState::TimedOut => {
                log::debug!("no map markers found; showing the panel anyway");
                self.ensure_panel(host);
            }
            PollState::Searching { .. } => {}
        }
        state
    }

    /// React to one mutation batch. Returns the summary if a pass ran.
    pub fn on_mutations<H: Page + ControlPanel>(
        &mut self,
        host: &H,
        batch: &[MutationSummary],
    ) -> Option<FilterSummary> {
        match self.controller.review(batch, host.panel_present()) {
            Verdict::Ignore => None,
            Verdict::Refresh { rebuild_panel, refilter } => {
                if rebuild_panel {
                    self.ensure_panel(host);
                }
                refilter.then(|| self.refilter(host))
            }
        }
    }

    /// Follow-up after an in-page route change settled.
    pub fn on_hash_settled<H: Page + ControlPanel>(&mut self, host: &H) -> Option<FilterSummary> {
        self.items_present(host).then(|| self.refilter(host))
    }

    /// Checkbox toggle.
    pub fn set_color<H: Page + ControlPanel>(
        &mut self,
        host: &H,
        id: &str,
        allowed: bool,
    ) -> FilterSummary {
        if !self.engine.state_mut().set_allowed(id, allowed) {
            log::debug!("ignoring toggle for unknown color id {id:?}");
        }
        self.refilter(host)
    }

    pub fn select_all<H: Page + ControlPanel>(&mut self, host: &H) -> FilterSummary {
        self.engine.state_mut().select_all();
        host.sync_checkboxes(self.engine.state());
        self.refilter(host)
    }

    pub fn deselect_all<H: Page + ControlPanel>(&mut self, host: &H) -> FilterSummary {
        self.engine.state_mut().deselect_all();
        host.sync_checkboxes(self.engine.state());
        self.refilter(host)
    }

    /// Run one filter pass.
    pub fn refilter<H: Page>(&mut self, host: &H) -> FilterSummary {
        self.passes += 1;
        self.engine.apply(host)
    }

    fn ensure_panel<H: ControlPanel>(&self, host: &H) {
        if !host.panel_present() && !host.build_panel(self.engine.state()) {
            log::debug!("no insertion point for the {} control panel yet", self.context().name());
        }
    }

    fn items_present<H: Page>(&self, host: &H) -> bool {
        !host.query_all(self.context().item_selector()).is_empty()
    }
}
