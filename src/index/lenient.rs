//! Tolerant field decoding for hand-edited or legacy index files
//!
//! Older tooling wrote `null` for non-numeric counts and stored dates
//! without validation. These helpers accept such values instead of
//! rejecting the whole document.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A record date; values that are not `YYYY-MM-DD` are kept verbatim
#[derive(Debug, Clone, PartialEq)]
pub enum IssueDate {
    Valid(NaiveDate),
    Unparsed(Value),
}

impl IssueDate {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            IssueDate::Valid(date) => Some(*date),
            IssueDate::Unparsed(_) => None,
        }
    }

    /// Valid dates ascending, unparsed dates after all of them
    pub fn sort_key(&self) -> (bool, Option<NaiveDate>) {
        let date = self.as_date();
        (date.is_none(), date)
    }
}

impl From<NaiveDate> for IssueDate {
    fn from(date: NaiveDate) -> Self {
        IssueDate::Valid(date)
    }
}

impl Default for IssueDate {
    fn default() -> Self {
        IssueDate::Unparsed(Value::Null)
    }
}

impl Serialize for IssueDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            IssueDate::Valid(date) => date.format("%Y-%m-%d").to_string().serialize(serializer),
            IssueDate::Unparsed(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for IssueDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let parsed = value
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok());
        Ok(match parsed {
            Some(date) => IssueDate::Valid(date),
            None => IssueDate::Unparsed(value),
        })
    }
}

/// Non-negative integer count; `null`, negatives and junk read as zero
pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let count = match &value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    };
    Ok(count)
}

/// Text field; `null` reads as empty, other scalars as their JSON text
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_bool().unwrap_or(false))
}

/// Optional path; anything but a string reads as absent
pub fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}
