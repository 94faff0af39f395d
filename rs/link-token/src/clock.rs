//! Absolute expiry instants.
//!
//! Expiry is always computed and compared in UTC, and serialized with an explicit offset.

use std::time::Duration;

use chrono::{DateTime, Datelike, SecondsFormat, TimeDelta, Utc};

use crate::{Error, Result};

const MAX_YEAR: i32 = 9999;

/// The current wall clock time.
pub fn now() -> DateTime<Utc> {
	Utc::now()
}

/// The instant `ttl` after `now`.
///
/// A zero `ttl` is allowed; the token will have expired by the time anybody checks it.
/// The expiry must fall within a four digit year, otherwise it could not be parsed back.
pub fn expires_at(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>> {
	let ttl = TimeDelta::from_std(ttl).map_err(|_| Error::Clock(format!("ttl out of range: {ttl:?}")))?;
	let expiry = now
		.checked_add_signed(ttl)
		.ok_or_else(|| Error::Clock("expiry out of range".to_string()))?;

	if expiry.year() > MAX_YEAR {
		return Err(Error::Clock(format!("expiry after year {MAX_YEAR}")));
	}

	Ok(expiry)
}

/// Returns true if `expiry` is strictly before `now`.
pub fn is_expired(expiry: DateTime<Utc>, now: DateTime<Utc>) -> bool {
	expiry < now
}

/// Serialize as ISO-8601 with a `+00:00` offset.
///
/// The fraction is six digits of microseconds, and omitted entirely on a whole second.
pub fn format(expiry: DateTime<Utc>) -> String {
	let precision = match expiry.timestamp_subsec_micros() {
		0 => SecondsFormat::Secs,
		_ => SecondsFormat::Micros,
	};

	expiry.to_rfc3339_opts(precision, false)
}

/// Same as [`format`], but with a space between the date and time, for people to read.
pub fn display(expiry: DateTime<Utc>) -> String {
	format(expiry).replacen('T', " ", 1)
}

/// Parse an ISO-8601 timestamp, which must include a UTC offset.
pub fn parse(s: &str) -> Result<DateTime<Utc>> {
	let parsed = DateTime::parse_from_rfc3339(s).map_err(|err| Error::Clock(err.to_string()))?;
	Ok(parsed.with_timezone(&Utc))
}
