//! Per-call metadata carried alongside every reporter event.

use std::time::Duration;

use chrono::{DateTime, Local};

/// Identifies one test call: the name CI services key on, the source
/// location pair printed in headers, and the call's timing. A non-empty
/// `reason` annotates skipped or expected-failure calls.
#[derive(Debug, Clone)]
pub struct Call {
    pub test_name: String,
    pub func_path: String,
    pub func_name: String,
    pub reason: String,
    pub started_at: DateTime<Local>,
    pub duration: Duration,
}

impl Call {
    pub fn new(
        test_name: impl Into<String>,
        func_path: impl Into<String>,
        func_name: impl Into<String>,
    ) -> Self {
        Call {
            test_name: test_name.into(),
            func_path: func_path.into(),
            func_name: func_name.into(),
            reason: String::new(),
            started_at: Local::now(),
            duration: Duration::ZERO,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_started_at(mut self, started_at: DateTime<Local>) -> Self {
        self.started_at = started_at;
        self
    }

    /// The `0.000s` wall-clock suffix printed after successful calls.
    pub fn timer_string(&self) -> String {
        format!("{:.3}s", self.duration.as_secs_f64())
    }
}
