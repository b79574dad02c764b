//! # Folio Architecture
//!
//! Folio is the core of a static photo gallery: the catalog of images, the
//! metadata attached to them, filtering and search, masonry layout and
//! lightbox navigation. None of it renders anything. A browser front end, a
//! site generator or the bundled CLI drive it and draw the results.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, print.rs)                           │
//! │  - Parses arguments, formats output, terminal I/O           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, returns CmdResult             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Opens a Gallery from a store and drives it with events   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Gallery core                                               │
//! │  - gallery: state + events       - catalog, model           │
//! │  - filter, query, tags           - layout, lazy             │
//! │  - lightbox, debounce                                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - GalleryStore trait                                       │
//! │  - FileStore (built site), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State and events
//!
//! A [`gallery::Gallery`] is built once per session and owns everything that
//! changes: the catalog, loaded metadata, the active query, viewport size and
//! the lightbox. Inputs arrive as [`gallery::GalleryEvent`]s and
//! [`gallery::Gallery::update`] reports what needs re-deriving. Layout and
//! filtering themselves are pure functions over the catalog.
//!
//! ## No I/O in the core
//!
//! From `api.rs` inward nothing writes to stdout/stderr or exits the process.
//! Diagnostics go through `tracing`; the binary decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per operation
//! - [`gallery`]: Session state and the event loop entry point
//! - [`catalog`]: Ordered image records, years, locations
//! - [`model`]: Raw items, records, metadata schema
//! - [`query`], [`filter`]: Search syntax and visibility rules
//! - [`tags`]: Suggestion index
//! - [`layout`]: Masonry engine and column breakpoints
//! - [`lightbox`]: Navigation over the visible subset
//! - [`debounce`], [`lazy`]: Resize coalescing and load windows
//! - [`store`]: Content sources
//! - [`config`]: `folio.json` settings
//! - [`error`]: Error types

pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod gallery;
pub mod layout;
pub mod lazy;
pub mod lightbox;
pub mod model;
pub mod query;
pub mod store;
pub mod tags;
