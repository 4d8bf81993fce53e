//! Race distance categories and the category-to-miles table.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const CATEGORY_COUNT: usize = 15;

/// Closed set of race distance categories.
///
/// The string form of each variant is also its canonical display label and the
/// value accepted as a manual override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RaceCategory {
    Ultra100Mile,
    Ultra50Mile,
    Ultra50K,
    Marathon,
    MetricMarathon,
    Half,
    TenMile,
    TenK,
    EightK,
    FiveMile,
    FiveK,
    TwoMile,
    ThreeK,
    OneMile,
    Other,
}

impl RaceCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; CATEGORY_COUNT] = [
        Self::Ultra100Mile,
        Self::Ultra50Mile,
        Self::Ultra50K,
        Self::Marathon,
        Self::MetricMarathon,
        Self::Half,
        Self::TenMile,
        Self::TenK,
        Self::EightK,
        Self::FiveMile,
        Self::FiveK,
        Self::TwoMile,
        Self::ThreeK,
        Self::OneMile,
        Self::Other,
    ];

    /// Standard categories in the order personal bests are listed, shortest first.
    pub const BY_DISTANCE: [Self; 14] = [
        Self::OneMile,
        Self::ThreeK,
        Self::TwoMile,
        Self::FiveK,
        Self::FiveMile,
        Self::EightK,
        Self::TenK,
        Self::TenMile,
        Self::Half,
        Self::MetricMarathon,
        Self::Marathon,
        Self::Ultra50K,
        Self::Ultra50Mile,
        Self::Ultra100Mile,
    ];

    /// Canonical label, e.g. `"Half Marathon"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ultra100Mile => "100 Miler",
            Self::Ultra50Mile => "50 Miler",
            Self::Ultra50K => "50K",
            Self::Marathon => "Marathon",
            Self::MetricMarathon => "Metric Marathon",
            Self::Half => "Half Marathon",
            Self::TenMile => "10 Miler",
            Self::TenK => "10K",
            Self::EightK => "8K",
            Self::FiveMile => "5 Miler",
            Self::FiveK => "5K",
            Self::TwoMile => "2 Miler",
            Self::ThreeK => "3K",
            Self::OneMile => "1 Mile",
            Self::Other => "Other",
        }
    }

    /// Whether this is one of the ultra distances.
    #[must_use]
    pub const fn is_ultra(self) -> bool {
        matches!(self, Self::Ultra50K | Self::Ultra50Mile | Self::Ultra100Mile)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RaceCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl Serialize for RaceCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for RaceCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown category labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown race category: {0}")]
pub struct UnknownCategory(String);

/// Errors building a [`DistanceTable`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistanceTableError {
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),

    #[error("distance for {category} must be a finite, non-negative number of miles, got {miles}")]
    InvalidMiles { category: RaceCategory, miles: f64 },
}

/// Immutable mapping from every [`RaceCategory`] to its canonical distance in miles.
///
/// The table is populated for every category by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceTable {
    miles: [f64; CATEGORY_COUNT],
}

impl DistanceTable {
    /// The standard distances.
    ///
    /// `Other` maps to 0 here; the categorizer's fallback uses its own default.
    #[must_use]
    pub const fn standard() -> Self {
        let mut miles = [0.0; CATEGORY_COUNT];
        miles[RaceCategory::Ultra100Mile.index()] = 100.0;
        miles[RaceCategory::Ultra50Mile.index()] = 50.0;
        miles[RaceCategory::Ultra50K.index()] = 31.07;
        miles[RaceCategory::Marathon.index()] = 26.2;
        miles[RaceCategory::MetricMarathon.index()] = 16.3;
        miles[RaceCategory::Half.index()] = 13.1;
        miles[RaceCategory::TenMile.index()] = 10.0;
        miles[RaceCategory::TenK.index()] = 6.2;
        miles[RaceCategory::EightK.index()] = 4.97;
        miles[RaceCategory::FiveMile.index()] = 5.0;
        miles[RaceCategory::FiveK.index()] = 3.1;
        miles[RaceCategory::TwoMile.index()] = 2.0;
        miles[RaceCategory::ThreeK.index()] = 1.86;
        miles[RaceCategory::OneMile.index()] = 1.0;
        miles[RaceCategory::Other.index()] = 0.0;
        Self { miles }
    }

    /// Standard table with per-category overrides keyed by label.
    pub fn with_overrides(overrides: &BTreeMap<String, f64>) -> Result<Self, DistanceTableError> {
        let mut table = Self::standard();
        for (label, &miles) in overrides {
            let category: RaceCategory = label.parse()?;
            if !miles.is_finite() || miles < 0.0 {
                return Err(DistanceTableError::InvalidMiles { category, miles });
            }
            table.miles[category.index()] = miles;
        }
        Ok(table)
    }

    /// Canonical miles for a category.
    #[must_use]
    pub const fn miles(&self, category: RaceCategory) -> f64 {
        self.miles[category.index()]
    }
}

impl Default for DistanceTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_roundtrip_all_variants() {
        for category in RaceCategory::ALL {
            let parsed: RaceCategory = category.label().parse().expect("should parse");
            assert_eq!(parsed, category, "roundtrip failed for {category:?}");
        }
    }

    #[test]
    fn unknown_label_errors() {
        let err = "Auto Detect".parse::<RaceCategory>().unwrap_err();
        assert_eq!(err.to_string(), "unknown race category: Auto Detect");
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert!("marathon".parse::<RaceCategory>().is_err());
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&RaceCategory::Half).unwrap();
        assert_eq!(json, "\"Half Marathon\"");
        let parsed: RaceCategory = serde_json::from_str("\"10 Miler\"").unwrap();
        assert_eq!(parsed, RaceCategory::TenMile);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "table values are exact literals")]
    fn standard_table_values() {
        let table = DistanceTable::standard();
        assert_eq!(table.miles(RaceCategory::Marathon), 26.2);
        assert_eq!(table.miles(RaceCategory::Ultra50K), 31.07);
        assert_eq!(table.miles(RaceCategory::EightK), 4.97);
        assert_eq!(table.miles(RaceCategory::ThreeK), 1.86);
        assert_eq!(table.miles(RaceCategory::Other), 0.0);
    }

    #[test]
    fn standard_table_covers_every_standard_category() {
        let table = DistanceTable::standard();
        for category in RaceCategory::BY_DISTANCE {
            assert!(table.miles(category) > 0.0, "{category} has no distance");
        }
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "override values are exact literals")]
    fn overrides_replace_single_entries() {
        let mut overrides = BTreeMap::new();
        overrides.insert("50K".to_string(), 31.1);
        let table = DistanceTable::with_overrides(&overrides).unwrap();
        assert_eq!(table.miles(RaceCategory::Ultra50K), 31.1);
        assert_eq!(table.miles(RaceCategory::Marathon), 26.2);
    }

    #[test]
    fn overrides_reject_unknown_labels() {
        let mut overrides = BTreeMap::new();
        overrides.insert("Ultra".to_string(), 40.0);
        let err = DistanceTable::with_overrides(&overrides).unwrap_err();
        assert!(matches!(err, DistanceTableError::UnknownCategory(_)));
    }

    #[test]
    fn overrides_reject_negative_and_nan() {
        for miles in [-1.0, f64::NAN, f64::INFINITY] {
            let mut overrides = BTreeMap::new();
            overrides.insert("5K".to_string(), miles);
            let err = DistanceTable::with_overrides(&overrides).unwrap_err();
            assert!(matches!(err, DistanceTableError::InvalidMiles { .. }));
        }
    }
}
