// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Conversion between server timestamps and local date-times
//!
//! The server speaks `YYYY-MM-DD HH:MM:SS` in UTC without a zone suffix.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use crate::error::{Error, Result};

/// Timestamp format used by the server
pub const SERVER_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a server timestamp into a local date-time
pub fn from_server(time: &str) -> Result<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(time.trim(), SERVER_FORMAT).map_err(|e| {
        Error::DateParse {
            input: time.to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok(Utc.from_utc_datetime(&naive).with_timezone(&Local))
}

/// Format a date-time in any zone as a server timestamp
pub fn to_server<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    date.with_timezone(&Utc).format(SERVER_FORMAT).to_string()
}
