//! Stored object types and operations
//!
//! All repository content is stored as objects identified by SHA-1 digests.
//! There are two kinds:
//!
//! - **Blob**: one file's bytes captured at staging time
//! - **Commit**: a history node with a full file-name→blob snapshot
//!
//! Both serialize to the on-disk format `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

use anyhow::Context;
use chrono::{DateTime, FixedOffset};

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Render a timestamp as `<unix-seconds> <utc-offset>` for object bodies.
pub(crate) fn format_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    format!("{} {}", timestamp.timestamp(), timestamp.format("%z"))
}

/// Parse a timestamp previously written by [`format_timestamp`].
pub(crate) fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    let (seconds, offset) = value
        .split_once(' ')
        .context("Invalid timestamp: missing offset")?;
    let seconds = seconds
        .parse::<i64>()
        .context("Invalid timestamp: seconds not an integer")?;
    let utc = DateTime::from_timestamp(seconds, 0).context("Invalid timestamp: out of range")?;

    Ok(utc.with_timezone(&parse_offset(offset)?))
}

/// Parse a `±hhmm` offset as rendered by `%z`.
fn parse_offset(value: &str) -> anyhow::Result<FixedOffset> {
    anyhow::ensure!(
        value.len() == 5 && value.is_char_boundary(1),
        "Invalid timestamp offset: {value}"
    );
    let (sign, digits) = value.split_at(1);
    let hours: i32 = digits[..2]
        .parse()
        .with_context(|| format!("Invalid timestamp offset: {value}"))?;
    let minutes: i32 = digits[2..]
        .parse()
        .with_context(|| format!("Invalid timestamp offset: {value}"))?;

    let total = hours * 3600 + minutes * 60;
    match sign {
        "+" => FixedOffset::east_opt(total),
        "-" => FixedOffset::west_opt(total),
        _ => None,
    }
    .with_context(|| format!("Invalid timestamp offset: {value}"))
}
