//! Test-run reporting: an atomic, mutex-guarded output writer with plain and
//! TeamCity service-message styles, plus a JSON event export.
//!
//! The writer renders each event fully before taking the sink lock, so
//! concurrent test calls never interleave. Style selection is an explicit
//! [`MessageStyle`] configuration; the label table is immutable and built
//! once.

pub mod call;
pub mod json;
pub mod labels;
pub mod teamcity;
pub mod writer;

pub use call::Call;
pub use json::{write_events, EventRow};
pub use labels::{style_label, MessageStyle, STD_LABELS};
pub use writer::{OutputWriter, ReportError};
