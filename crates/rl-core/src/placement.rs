//! Placement strings such as `"12 of 340"` or `"3/57"`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::record::RawRecord;

/// `<rank> of <total>` or `<rank>/<total>` anywhere in the string.
static PLACEMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:of|/)\s*(\d+)").unwrap());

/// `<rank> of` at the very start of the string.
static LEADING_RANK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+of").unwrap());

/// Highest rank that counts as a podium finish.
pub const PODIUM_RANK: u32 = 3;

/// A finishing position within a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub rank: u32,
    pub total: u32,
}

impl Placement {
    /// Parses the first placement found in `text`.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = PLACEMENT_RE.captures(text)?;
        let rank = caps[1].parse().ok()?;
        let total = caps[2].parse().ok()?;
        Some(Self { rank, total })
    }

    /// Fraction of the field finishing at or ahead of this rank.
    ///
    /// `None` for an empty field.
    pub fn percentile(&self) -> Option<f64> {
        (self.total > 0).then(|| f64::from(self.rank) / f64::from(self.total))
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank, self.total)
    }
}

/// Coarse performance bucket derived from a placement percentile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PerformanceTier {
    #[serde(rename = "Top 10%")]
    Top10,
    #[serde(rename = "Top 25%")]
    Top25,
    #[serde(rename = "Top 50%")]
    Top50,
    Finisher,
}

impl PerformanceTier {
    pub const ALL: [Self; 4] = [Self::Top10, Self::Top25, Self::Top50, Self::Finisher];

    pub fn from_percentile(percentile: f64) -> Self {
        if percentile <= 0.10 {
            Self::Top10
        } else if percentile <= 0.25 {
            Self::Top25
        } else if percentile <= 0.50 {
            Self::Top50
        } else {
            Self::Finisher
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Top10 => "Top 10%",
            Self::Top25 => "Top 25%",
            Self::Top50 => "Top 50%",
            Self::Finisher => "Finisher",
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tier for a record, from the overall placement or else the gender placement.
pub fn tier(record: &RawRecord) -> Option<PerformanceTier> {
    [&record.overall, &record.gender]
        .into_iter()
        .find_map(|text| Placement::parse(text).and_then(|p| p.percentile()))
        .map(PerformanceTier::from_percentile)
}

/// Whether a placement string starts with a rank of 3 or better.
fn leading_podium(text: &str) -> bool {
    LEADING_RANK_RE
        .captures(text.trim())
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .is_some_and(|rank| rank <= PODIUM_RANK)
}

/// Whether the record placed on the podium in its division, gender or overall.
pub fn is_podium(record: &RawRecord) -> bool {
    [&record.division, &record.gender, &record.overall]
        .into_iter()
        .any(|text| leading_podium(text))
}
