//! `YYYY-MM-DD` calendar dates as used by exemption expiry and gate reports.

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serializer};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn parse_iso_date(text: &str) -> Result<Date, time::error::Parse> {
    Date::parse(text.trim(), ISO_DATE)
}

pub fn format_iso_date(date: Date) -> String {
    // The format has no fallible components for a valid `Date`.
    date.format(ISO_DATE).unwrap_or_else(|_| date.to_string())
}

pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    let text = date.format(ISO_DATE).map_err(S::Error::custom)?;
    serializer.serialize_str(&text)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
    let text = String::deserialize(deserializer)?;
    parse_iso_date(&text).map_err(D::Error::custom)
}
