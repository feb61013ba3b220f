//! JSON export of reporter events.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::call::Call;
use crate::teamcity::time_format;

/// One reporter event, flattened for machine consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRow {
    pub label: String,
    pub test_name: String,
    pub func_path: String,
    pub func_name: String,
    pub timestamp: String,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl EventRow {
    pub fn from_call(label: &str, call: &Call, details: Vec<String>) -> Self {
        EventRow {
            label: label.to_string(),
            test_name: call.test_name.clone(),
            func_path: call.func_path.clone(),
            func_name: call.func_name.clone(),
            timestamp: time_format(call.started_at),
            duration_ms: call.duration.as_millis() as u64,
            details,
        }
    }
}

pub fn write_events(events: &[EventRow], out: &Path) -> anyhow::Result<()> {
    let v = serde_json::json!({ "events": events });
    std::fs::write(out, serde_json::to_string_pretty(&v)?)?;
    Ok(())
}
