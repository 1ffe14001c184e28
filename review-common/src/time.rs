//! Timestamp utilities

use chrono::{DateTime, Utc};

/// Display format used for submission times in JSON and spreadsheets
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Render a timestamp as `YYYY-MM-DD HH:MM:SS`
pub fn format_display(ts: &DateTime<Utc>) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}
