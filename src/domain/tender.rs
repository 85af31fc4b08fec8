use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use super::SourceName;

pub const NOT_SPECIFIED: &str = "Not specified";
pub const NO_TITLE: &str = "No title";
pub const UNKNOWN_BUYER: &str = "Unknown";

/// Descriptions are cut to this many characters
pub const DESCRIPTION_LIMIT: usize = 300;

/// Amounts beyond this are treated as garbage rather than formatted
pub const MAX_FORMATTED_AMOUNT: f64 = 1e15;

/// A matching notice projected into the shape every source shares
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTender {
    pub id: String,
    pub title: String,
    pub description: String,
    pub buyer: String,
    pub value: String,
    pub deadline: String,
    pub source: SourceName,
    pub url: String,
    pub publish_date: String,
}

/// Where a tender lands when sorting by deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeadlineOrder {
    Dated(DateTime<Utc>),
    Unparseable,
    NotSpecified,
}

impl NormalizedTender {
    pub fn deadline_order(&self) -> DeadlineOrder {
        if self.deadline == NOT_SPECIFIED {
            return DeadlineOrder::NotSpecified;
        }

        parse_date(&self.deadline)
            .map(DeadlineOrder::Dated)
            .unwrap_or(DeadlineOrder::Unparseable)
    }
}

/// Parse RFC 3339, a zone-less timestamp (read as UTC) or a bare date
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// `£` plus the grouped amount, or the placeholder when there is no usable amount.
/// Zero, non-finite and out-of-range amounts count as no amount.
pub fn format_value(amount: Option<f64>) -> String {
    match amount {
        Some(a) if a != 0.0 && a.abs() <= MAX_FORMATTED_AMOUNT => {
            format!("£{}", group_thousands(a))
        }
        _ => NOT_SPECIFIED.to_string(),
    }
}

/// Comma-grouped integer part, at most three rounded fraction digits
fn group_thousands(amount: f64) -> String {
    let thousandths = (amount.abs() * 1000.0).round() as u128;
    let whole = thousandths / 1000;
    let fraction = thousandths % 1000;

    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 5);

    if amount < 0.0 && thousandths > 0 {
        out.push('-');
    }

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if fraction > 0 {
        out.push('.');
        out.push_str(format!("{:03}", fraction).trim_end_matches('0'));
    }

    out
}

/// Keep at most `max_chars` characters, respecting char boundaries
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
