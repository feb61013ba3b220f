//! Atomic, mutex-guarded reporter sink.
//!
//! Every event renders its full text before the lock is taken, then writes
//! in one locked section, so concurrent test calls never interleave their
//! output. The lock also guards the problem-separator flag: after a problem
//! block, the next success line in non-stream mode is preceded by a
//! separator line so it stands apart from the problem's log.

use std::io::Write;
use std::sync::Mutex;

use thiserror::Error;

use crate::call::Call;
use crate::labels::{style_label, MessageStyle};
use crate::teamcity;

const SEPARATOR: &str = "\n-----------------------------------\
-----------------------------------\n";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report sink write failed: {0}")]
    Io(#[from] std::io::Error),
}

struct SinkState<W> {
    sink: W,
    wrote_call_problem_last: bool,
}

pub struct OutputWriter<W: Write> {
    state: Mutex<SinkState<W>>,
    stream: bool,
    verbose: bool,
    style: MessageStyle,
}

impl<W: Write> OutputWriter<W> {
    pub fn new(sink: W, stream: bool, verbose: bool, style: MessageStyle) -> Self {
        OutputWriter {
            state: Mutex::new(SinkState { sink, wrote_call_problem_last: false }),
            stream,
            verbose,
            style,
        }
    }

    /// Writes raw bytes under the sink lock, for log output produced by a
    /// running call in stream mode.
    pub fn write_raw(&self, content: &[u8]) -> Result<(), ReportError> {
        let mut state = self.lock();
        state.sink.write_all(content)?;
        Ok(())
    }

    /// A call began. Only stream mode announces starts.
    pub fn write_call_started(&self, label: &str, call: &Call) -> Result<(), ReportError> {
        if !self.stream {
            return Ok(());
        }
        let header = self.render_call_header(label, call, "", "\n", &[]);
        let mut state = self.lock();
        state.sink.write_all(header.as_bytes())?;
        tracing::trace!(label, test = %call.test_name, "call started");
        Ok(())
    }

    /// A call failed, panicked or otherwise needs its log shown. In
    /// non-stream mode the header is preceded by a separator and followed by
    /// the call's accumulated log.
    pub fn write_call_problem(&self, label: &str, call: &Call, log: &str) -> Result<(), ReportError> {
        let prefix = if self.stream { "" } else { SEPARATOR };
        let details: Vec<String> = log.lines().map(str::to_string).collect();
        let header = self.render_call_header(label, call, prefix, "\n\n", &details);
        let mut state = self.lock();
        state.wrote_call_problem_last = true;
        state.sink.write_all(header.as_bytes())?;
        if !self.stream {
            state.sink.write_all(log.as_bytes())?;
        }
        tracing::trace!(label, test = %call.test_name, "call problem");
        Ok(())
    }

    /// A call finished without a problem (passed, skipped, missed, or failed
    /// expectedly). Written in stream mode or when verbose; a timer suffix
    /// is added only for passing calls.
    pub fn write_call_success(&self, label: &str, call: &Call) -> Result<(), ReportError> {
        if !(self.stream || self.verbose) {
            return Ok(());
        }
        let mut suffix = String::new();
        if !call.reason.is_empty() {
            suffix.push_str(&format!(" ({})", call.reason));
        }
        if label == "PASS" {
            suffix.push('\t');
            suffix.push_str(&call.timer_string());
        }
        suffix.push('\n');
        if self.stream {
            suffix.push('\n');
        }
        let header = self.render_call_header(label, call, "", &suffix, &[]);
        let mut state = self.lock();
        // The separator must be decided under the lock; a concurrent problem
        // write may flip the flag between render and write.
        let full = if !self.stream && state.wrote_call_problem_last {
            format!("{SEPARATOR}{header}")
        } else {
            header
        };
        state.wrote_call_problem_last = false;
        state.sink.write_all(full.as_bytes())?;
        tracing::trace!(label, test = %call.test_name, "call success");
        Ok(())
    }

    fn render_call_header(
        &self,
        label: &str,
        call: &Call,
        prefix: &str,
        suffix: &str,
        details: &[String],
    ) -> String {
        let mut out = format!(
            "{prefix}{} {}: {}{suffix}",
            style_label(self.style, label),
            call.func_path,
            call.func_name
        );
        if self.style == MessageStyle::TeamCity {
            out.push_str(&teamcity::render_event(label, call, details));
            out.push('\n');
        }
        out
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SinkState<W>> {
        // Poisoning only happens if a holder panicked mid-write; the state
        // is still structurally sound, so keep reporting.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer(stream: bool, verbose: bool) -> OutputWriter<Vec<u8>> {
        OutputWriter::new(Vec::new(), stream, verbose, MessageStyle::Plain)
    }

    fn output(w: OutputWriter<Vec<u8>>) -> String {
        String::from_utf8(w.state.into_inner().unwrap().sink).unwrap()
    }

    fn call() -> Call {
        Call::new("MySuite.TestOne", "my_suite.rs:42", "MySuite.TestOne")
    }

    #[test]
    fn started_writes_only_in_stream_mode() {
        let w = writer(false, false);
        w.write_call_started("START", &call()).unwrap();
        assert_eq!(output(w), "");

        let w = writer(true, false);
        w.write_call_started("START", &call()).unwrap();
        assert_eq!(output(w), "START: my_suite.rs:42: MySuite.TestOne\n");
    }

    #[test]
    fn problem_prepends_separator_and_appends_log() {
        let w = writer(false, false);
        w.write_call_problem("FAIL", &call(), "assertion log\n").unwrap();
        assert_eq!(
            output(w),
            format!("{SEPARATOR}FAIL: my_suite.rs:42: MySuite.TestOne\n\nassertion log\n")
        );
    }

    #[test]
    fn problem_in_stream_mode_skips_separator_and_log() {
        let w = writer(true, false);
        w.write_call_problem("FAIL", &call(), "assertion log\n").unwrap();
        assert_eq!(output(w), "FAIL: my_suite.rs:42: MySuite.TestOne\n\n");
    }

    #[test]
    fn success_is_silent_unless_stream_or_verbose() {
        let w = writer(false, false);
        w.write_call_success("PASS", &call()).unwrap();
        assert_eq!(output(w), "");
    }

    #[test]
    fn success_after_problem_gets_a_separator() {
        let w = writer(false, true);
        w.write_call_problem("FAIL", &call(), "log\n").unwrap();
        w.write_call_success("PASS", &call()).unwrap();
        w.write_call_success("PASS", &call()).unwrap();
        let out = output(w);
        // Two separators total: one before the problem, one before the first
        // success after it. The second success runs with the flag cleared.
        assert_eq!(out.matches(SEPARATOR).count(), 2);
    }

    #[test]
    fn skip_reason_and_pass_timer_suffixes() {
        let w = writer(false, true);
        let skipped = call().with_reason("not today");
        w.write_call_success("SKIP", &skipped).unwrap();
        w.write_call_success("PASS", &call()).unwrap();
        let out = output(w);
        assert!(out.contains("SKIP: my_suite.rs:42: MySuite.TestOne (not today)\n"));
        assert!(out.contains("PASS: my_suite.rs:42: MySuite.TestOne\t0.000s\n"));
    }

    #[test]
    fn teamcity_style_appends_service_messages() {
        let w = OutputWriter::new(Vec::new(), true, false, MessageStyle::TeamCity);
        w.write_call_started("START", &call()).unwrap();
        let out = output(w);
        assert!(out.starts_with("=== RUN my_suite.rs:42: MySuite.TestOne\n"));
        assert!(out.contains("##teamcity[testStarted "));
    }
}
