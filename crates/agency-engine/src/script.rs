//! Batch script runner
//!
//! Executes a script one line at a time through [`apply_command`]:
//! - comment and blank lines are no-ops
//! - malformed lines are skipped without output
//! - store failures are recorded and the run continues
//! - a stop line (`0`) ends the run; later lines are never read
//!
//! Nothing is printed here. The report carries every line's outcome so the
//! caller can echo it, summarise it, or ignore it.

use crate::commands::{apply_command, CommandOutcome};
use agency_core::errors::ExError;
use agency_core::{parse_line, Command};
use agency_core_types::correlation::RunId;
use agency_store::errors::{io_error, Result};
use rusqlite::Connection;
use serde::Serialize;
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum LineResult {
    /// Comment or blank line
    Noop,
    /// Malformed line; nothing was applied
    Rejected { code: String, message: String },
    Applied { outcome: CommandOutcome },
    /// The store rejected the command. A registered row stays in place when
    /// only a step after its insert failed; the message names it.
    StoreFailed { code: String, message: String },
    Stopped,
}

impl LineResult {
    fn from_error(err: &ExError) -> (String, String) {
        (err.code().to_string(), err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineOutcome {
    /// 1-based
    pub line_no: usize,
    pub text: String,
    #[serde(flatten)]
    pub result: LineResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptReport {
    pub run_id: RunId,
    pub executed: usize,
    pub skipped: usize,
    pub store_failed: usize,
    /// Line number of the stop command, if one was reached
    pub stopped_at: Option<usize>,
    pub lines: Vec<LineOutcome>,
}

impl ScriptReport {
    fn new(run_id: RunId) -> Self {
        Self {
            run_id,
            executed: 0,
            skipped: 0,
            store_failed: 0,
            stopped_at: None,
            lines: Vec::new(),
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped_at.is_some()
    }
}

fn run_line(conn: &Connection, run_id: &RunId, line_no: usize, text: &str) -> LineResult {
    let command = match parse_line(text) {
        Ok(None) => return LineResult::Noop,
        Ok(Some(command)) => command,
        Err(err) => {
            let err = ExError::from(err).with_line_no(line_no);
            tracing::debug!(run_id = %run_id, line_no, error = %err, "line skipped");
            let (code, message) = LineResult::from_error(&err);
            return LineResult::Rejected { code, message };
        }
    };

    if matches!(command, Command::Stop) {
        tracing::debug!(run_id = %run_id, line_no, "stop line reached");
        return LineResult::Stopped;
    }

    let command_name = command.op_name();
    match apply_command(conn, command) {
        Ok(outcome) => {
            tracing::debug!(run_id = %run_id, line_no, command = command_name, "line applied");
            LineResult::Applied { outcome }
        }
        Err(err) => {
            let err = err.with_line_no(line_no);
            tracing::debug!(run_id = %run_id, line_no, error = %err, "store failure suppressed");
            let (code, message) = LineResult::from_error(&err);
            if err.is_rejection() {
                LineResult::Rejected { code, message }
            } else {
                LineResult::StoreFailed { code, message }
            }
        }
    }
}

/// Run every line of `reader` against the store
///
/// Bytes that are not valid UTF-8 are replaced, so such a line is decoded
/// like any other. Only a read failure on the input itself is returned as an
/// error; lines already executed stay applied.
pub fn run_script<R: BufRead>(conn: &Connection, mut reader: R) -> Result<ScriptReport> {
    let mut report = ScriptReport::new(RunId::new());
    tracing::info!(run_id = %report.run_id, "script run started");

    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| io_error("read_script", e).with_line_no(line_no + 1))?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let text = String::from_utf8_lossy(&buf)
            .trim_end_matches(['\n', '\r'])
            .to_string();
        let result = run_line(conn, &report.run_id, line_no, &text);

        match &result {
            LineResult::Noop | LineResult::Rejected { .. } => report.skipped += 1,
            LineResult::Applied { .. } => report.executed += 1,
            LineResult::StoreFailed { .. } => report.store_failed += 1,
            LineResult::Stopped => report.stopped_at = Some(line_no),
        }
        report.lines.push(LineOutcome {
            line_no,
            text,
            result,
        });
        if report.is_stopped() {
            break;
        }
    }

    tracing::info!(
        run_id = %report.run_id,
        executed = report.executed,
        skipped = report.skipped,
        store_failed = report.store_failed,
        stopped = report.is_stopped(),
        "script run finished"
    );
    Ok(report)
}

/// [`run_script`] over an in-memory script
pub fn run_script_text(conn: &Connection, text: &str) -> Result<ScriptReport> {
    run_script(conn, text.as_bytes())
}
