//! Comparison engine for test harnesses.
//!
//! Given two arbitrary runtime values and a named check, produce a
//! `(matched, diagnostic)` verdict. Checkers are stateless singletons and
//! never let an internal fault escape to the caller; the suite runner that
//! schedules tests and renders results is a collaborator, not part of this
//! crate.

pub mod checkers;
pub mod compare;
pub mod diff;
pub mod render;
pub mod value;

pub use checkers::{apply_rewrite, not, run_checker, Checker, CheckerInfo, Rewrite, Verdict};
pub use value::{ErrorValue, FuncValue, Interface, Kind, Value};
