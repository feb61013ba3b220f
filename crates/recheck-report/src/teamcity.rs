//! TeamCity service-message rendering.
//!
//! One timestamp format and one escaping table serve every event kind.
//! `PASS` emits only `testFinished`; any label other than the known outcome
//! set is reported as a panic failure.

use chrono::{DateTime, Local};

use crate::call::Call;

pub const TEAMCITY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

pub fn time_format(t: DateTime<Local>) -> String {
    t.format(TEAMCITY_TIMESTAMP_FORMAT).to_string()
}

/// Service-message value escaping. `\r` collapses into `|n` like `\n` does.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '|' => out.push_str("||"),
            '\n' | '\r' => out.push_str("|n"),
            '\'' => out.push_str("|'"),
            ']' => out.push_str("|]"),
            '[' => out.push_str("|["),
            c => out.push(c),
        }
    }
    out
}

pub fn escape_lines(lines: &[String]) -> String {
    escape(&lines.join("\n"))
}

/// Renders the service message(s) for one labelled call event.
pub fn render_event(label: &str, call: &Call, details: &[String]) -> String {
    let now = time_format(Local::now());
    let test_name = escape(&call.test_name);

    if label == "START" {
        return format!(
            "##teamcity[testStarted timestamp='{}' name='{test_name}' captureStandardOutput='true']",
            time_format(call.started_at)
        );
    }
    if label == "SKIP" || label == "MISS" {
        return format!("##teamcity[testIgnored timestamp='{now}' name='{test_name}']");
    }

    let mut out = String::new();
    match label {
        "FAIL" => out.push_str(&format!(
            "##teamcity[testFailed timestamp='{now}' name='{test_name}' details='{}']",
            escape_lines(details)
        )),
        "PASS" => {}
        _ => out.push_str(&format!(
            "##teamcity[testFailed timestamp='{now}' name='{test_name}' message='Test ended in panic.' details='{}']",
            escape_lines(details)
        )),
    }
    out.push_str(&format!(
        "##teamcity[testFinished timestamp='{now}' name='{test_name}' duration='{}']",
        call.duration.as_millis()
    ));
    out
}
