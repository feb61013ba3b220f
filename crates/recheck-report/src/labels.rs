//! Outcome labels and the immutable label table.

use std::collections::HashMap;

use lazy_static::lazy_static;

lazy_static! {
    /// Maps raw outcome labels to the `go test`-style prefixes used by the
    /// decorated message style. Constructed once, never mutated.
    pub static ref STD_LABELS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("FAIL EXPECTED", "--- FAIL: ");
        m.insert("FAIL", "--- FAIL: ");
        m.insert("MISS", "--- SKIP: ");
        m.insert("PANIC", "--- FAIL: ");
        m.insert("PASS", "--- PASS: ");
        m.insert("SKIP", "--- SKIP: ");
        m.insert("START", "=== RUN");
        m
    };
}

/// Rendering convention for call headers. `Plain` writes the raw label with
/// a colon; `TeamCity` writes the mapped label and appends a CI service
/// message after the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageStyle {
    #[default]
    Plain,
    TeamCity,
}

pub fn style_label(style: MessageStyle, label: &str) -> String {
    if style == MessageStyle::TeamCity {
        if let Some(mapped) = STD_LABELS.get(label) {
            return (*mapped).to_string();
        }
    }
    format!("{label}:")
}
