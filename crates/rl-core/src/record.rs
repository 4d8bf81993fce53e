//! Raw and normalized race records.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::category::RaceCategory;
use crate::types::RecordId;

/// A race result as supplied by the record source.
///
/// The source is untrusted: missing or `null` text fields become empty
/// strings, numbers are stringified, and any other JSON shape is dropped to
/// empty rather than failing the whole record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    /// Caller-preserved identity, reused by the normalizer when present.
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub event: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pace: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub overall: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gender: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub division: String,
    #[serde(
        default,
        deserialize_with = "lenient_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<i32>,
    /// Manual category override, e.g. `"10K"` or `"Auto Detect"`.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub distance_type: Option<String>,
}

impl RawRecord {
    /// City part of `"City, Region"`.
    pub fn city(&self) -> &str {
        self.location.split(',').next().unwrap_or_default().trim()
    }
}

/// A race record with parsed fields and a resolved category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    pub id: RecordId,
    #[serde(flatten)]
    pub raw: RawRecord,
    /// `None` when the date text could not be parsed.
    pub parsed_date: Option<NaiveDate>,
    /// Seconds per mile, 0 when unknown.
    pub pace_seconds: f64,
    /// Finish time in minutes, 0 when unknown.
    pub total_minutes: f64,
    pub category: RaceCategory,
    pub distance_label: String,
    pub distance_miles: f64,
}

impl NormalizedRecord {
    /// Year of the race, from the parsed date or else the source's year column.
    pub fn year(&self) -> Option<i32> {
        use chrono::Datelike;

        self.parsed_date.map(|d| d.year()).or(self.raw.year)
    }

    pub fn has_pace(&self) -> bool {
        self.pace_seconds > 0.0
    }

    pub fn has_time(&self) -> bool {
        self.total_minutes > 0.0
    }
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(Value::deserialize(deserializer)?).filter(|s| !s.trim().is_empty()))
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}
