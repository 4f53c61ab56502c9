//! Timers and lifecycle events that drive the session.

use std::cell::RefCell;
use std::rc::Rc;

use fc_core::{FilterSession, PollState};
use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use web_sys::{Document, Window};

use crate::dom::{self, DomPage};

/// Run `f` once the document has been parsed.
pub fn when_parsed(document: &Document, f: impl FnOnce() + 'static) {
    if document.ready_state() == "loading" {
        let mut f = Some(f);
        EventListener::once(document, "DOMContentLoaded", move |_| {
            if let Some(f) = f.take() {
                f();
            }
        })
        .forget();
    } else {
        f();
    }
}

/// Check for map markers every `interval_ms` until the session stops
/// searching. Each tick schedules the next, so nothing outlives the search.
pub fn poll_markers(page: DomPage, session: Rc<RefCell<FilterSession>>, interval_ms: u32) {
    Timeout::new(interval_ms, move || {
        let state = dom::with_session(&session, |s| s.poll_tick(&page));
        match state {
            // Busy: try again next interval.
            None | Some(PollState::Searching { .. }) => poll_markers(page, session, interval_ms),
            Some(PollState::Found) => log::debug!("map markers found"),
            Some(PollState::TimedOut) => log::debug!("gave up waiting for map markers"),
        }
    })
    .forget();
}

/// Re-filter `delay_ms` after every hash route change.
pub fn follow_hash_changes(
    window: &Window,
    page: DomPage,
    session: Rc<RefCell<FilterSession>>,
    delay_ms: u32,
) {
    EventListener::new(window, "hashchange", move |_| {
        let page = page.clone();
        let session = session.clone();
        Timeout::new(delay_ms, move || {
            if let Some(Some(summary)) = dom::with_session(&session, |s| s.on_hash_settled(&page)) {
                log::debug!("route change pass: {}/{}", summary.shown, summary.total);
            }
        })
        .forget();
    })
    .forget();
}
