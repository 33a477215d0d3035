//! Schedule time conversion.
//!
//! TrainerCentral wants scheduled times as milliseconds since the Unix
//! epoch, but the LLM-facing tool contract accepts human-readable
//! `"DD-MM-YYYY HH:MMAM/PM"` strings. The conversion is strict: anything
//! that does not match the format is a hard error, never a guess.

use chrono::NaiveDateTime;

use super::error::TcError;

const SCHEDULE_FORMAT: &str = "%d-%m-%Y %I:%M%p";

/// Convert `"DD-MM-YYYY HH:MMAM/PM"` (e.g. `"29-11-2025 4:30PM"`) to epoch
/// milliseconds. Times are interpreted as UTC.
///
/// Rejects 24-hour input ("16:30"), missing AM/PM markers, and any other
/// deviation from the format with a descriptive error.
pub fn convert_schedule_time(input: &str) -> Result<i64, TcError> {
    let parsed = NaiveDateTime::parse_from_str(input.trim(), SCHEDULE_FORMAT).map_err(|e| {
        TcError::Schedule(format!(
            "expected \"DD-MM-YYYY HH:MMAM/PM\" (e.g. \"29-11-2025 4:30PM\"), got {:?}: {}",
            input, e
        ))
    })?;
    Ok(parsed.and_utc().timestamp_millis())
}
