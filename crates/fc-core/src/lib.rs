//! Favorite-Color Filter Core Library
//!
//! This crate provides the filtering engine behind the favorite-color
//! content script for the circle catalog site. It never touches a browser:
//! the page is reached through the [`page::Page`], [`page::Element`] and
//! [`page::ControlPanel`] traits, which the wasm binding implements over
//! `web_sys`.
//!
//! # Architecture
//!
//! Every filter pass starts from scratch. The host page's own framework
//! re-renders rows and markers at will, so items are enumerated, their
//! colors resolved and their row groups shown or hidden on every pass, and
//! the status label is only written when its text changes.
//!
//! # Modules
//!
//! - `colors`: Static favorite-color catalog
//! - `model`: Embedded `#TheModel` JSON reader
//! - `resolver`: Model-then-markup color resolution strategies
//! - `grouper`: Sibling rows belonging to one item
//! - `state`: Allow-set of colors
//! - `engine`: One filter pass
//! - `context`: Per-page selectors, layouts and panel identity
//! - `sync`: Mutation review and the per-page session
//! - `poll`: Bounded marker discovery
//! - `links`: Direct icon link targets
//! - `config`: Runtime tunables
//! - `types`: Shared type definitions

pub mod colors;
pub mod config;
pub mod context;
pub mod engine;
pub mod grouper;
pub mod links;
pub mod model;
pub mod page;
pub mod poll;
pub mod resolver;
pub mod state;
pub mod sync;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use colors::{ColorDefinition, BLANK_COLOR_ID, COLOR_DEFINITIONS};
pub use config::FilterConfig;
pub use context::PageContext;
pub use engine::FilterEngine;
pub use model::{read_model, Model, ModelError};
pub use page::{ControlPanel, Element, Page};
pub use poll::{MarkerPoll, PollState};
pub use state::FilterState;
pub use sync::{FilterSession, Startup, SyncController, Verdict};
pub use types::{FilterSummary, MutationKind, MutationSummary, ResolvedColor};
