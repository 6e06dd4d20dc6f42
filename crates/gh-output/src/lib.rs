//! `gh-output` — what a run looks like from the outside.
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`report`]   | `RunReport` — end-of-run stdout analytics              |
//! | [`display`]  | ASCII board renderer                                   |
//! | [`csv`]      | `TickCsv` — per-tick append-only log                   |
//! | [`observer`] | `CsvObserver` — bridges `SimObserver` to `TickCsv`     |
//! | [`error`]    | `OutputError`, `OutputResult`                          |
//!
//! Observer methods cannot return errors, so `CsvObserver` stores the first
//! write failure internally; drivers surface it with `take_error()` after
//! the run.

pub mod csv;
pub mod display;
pub mod error;
pub mod observer;
pub mod report;


// ── Re-exports ────────────────────────────────────────────────────────────────

// `self::` disambiguates the csv module from the csv crate.
pub use self::csv::{TickCsv, TickRow};
pub use display::render;
pub use error::{OutputError, OutputResult};
pub use observer::CsvObserver;
pub use report::RunReport;
