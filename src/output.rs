//! Output mode and JSON envelopes
//!
//! Commands print either human output or a single JSON envelope:
//! `{ "ok": true, "command": ..., "data": ... }` on success and
//! `{ "ok": false, "error": ... }` on failure.

use std::io::Write;
use std::sync::OnceLock;
use crate::Result;

static QUIET: OnceLock<bool> = OnceLock::new();

/// Whether informational human output is suppressed (`NOTELINK_QUIET=1`)
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("NOTELINK_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json { OutputMode::Json } else { OutputMode::Human }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

pub fn success_envelope(command: &str, data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    })
}

pub fn error_envelope(message: &str) -> serde_json::Value {
    serde_json::json!({
        "ok": false,
        "error": message,
    })
}

/// Write a success envelope in JSON mode; human mode writes nothing
pub fn write_success<W: Write>(
    out: &mut W,
    output_mode: OutputMode,
    command: &str,
    data: serde_json::Value,
) -> Result<()> {
    if output_mode == OutputMode::Json {
        let envelope = success_envelope(command, data);
        writeln!(out, "{}", serde_json::to_string_pretty(&envelope)?)?;
    }
    Ok(())
}

pub fn write_error<W: Write>(out: &mut W, message: &str) -> Result<()> {
    writeln!(out, "{}", error_envelope(message))?;
    Ok(())
}

/// [`write_success`] to stdout
pub fn emit_success(output_mode: OutputMode, command: &str, data: serde_json::Value) -> Result<()> {
    write_success(&mut std::io::stdout().lock(), output_mode, command, data)
}
