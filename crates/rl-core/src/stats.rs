//! Aggregate statistics over a normalized record set.
//!
//! Every function treats a pace or time of 0 as "not available" and leaves
//! such records out of averages and bests.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, Month, Weekday};
use serde::Serialize;

use crate::category::RaceCategory;
use crate::placement::{self, PerformanceTier};
use crate::record::NormalizedRecord;

/// NY to LA, in miles.
pub const CROSS_COUNTRY_MILES: f64 = 2790.0;
/// Full Appalachian Trail thru-hike, in miles.
pub const APPALACHIAN_TRAIL_MILES: f64 = 2190.0;
/// Earth's circumference at the equator, in miles.
pub const EQUATOR_MILES: f64 = 24901.0;
/// One marathon, in miles.
pub const MARATHON_MILES: f64 = 26.2;

/// Headline numbers for the whole record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_races: usize,
    pub total_miles: f64,
    pub average_miles: f64,
    /// Mean pace over races with a known pace.
    pub average_pace_seconds: Option<f64>,
    pub total_minutes: f64,
}

#[allow(clippy::cast_precision_loss)]
pub fn summarize(records: &[NormalizedRecord]) -> Summary {
    let total_races = records.len();
    let total_miles: f64 = records.iter().map(|r| r.distance_miles).sum();
    let average_miles = if total_races > 0 {
        total_miles / total_races as f64
    } else {
        0.0
    };
    let paces: Vec<f64> = records
        .iter()
        .filter(|r| r.has_pace())
        .map(|r| r.pace_seconds)
        .collect();
    let average_pace_seconds =
        (!paces.is_empty()).then(|| paces.iter().sum::<f64>() / paces.len() as f64);

    Summary {
        total_races,
        total_miles,
        average_miles,
        average_pace_seconds,
        total_minutes: records.iter().map(|r| r.total_minutes).sum(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Races per distance label, most common first, ties by label.
pub fn distance_counts(records: &[NormalizedRecord]) -> Vec<LabelCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.distance_label.as_str()).or_insert(0) += 1;
    }

    let mut counts: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    counts
}

/// Fastest finish in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalBest<'a> {
    pub category: RaceCategory,
    pub record: &'a NormalizedRecord,
}

/// Fastest timed race per standard category, shortest distance first.
///
/// Equal times keep the record that appears first in `records`.
pub fn personal_bests(records: &[NormalizedRecord]) -> Vec<PersonalBest<'_>> {
    RaceCategory::BY_DISTANCE
        .into_iter()
        .filter_map(|category| {
            records
                .iter()
                .filter(|r| r.category == category && r.has_time())
                .min_by(|a, b| a.total_minutes.total_cmp(&b.total_minutes))
                .map(|record| PersonalBest { category, record })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaceByDistance {
    pub label: String,
    pub distance_miles: f64,
    pub average_pace_seconds: f64,
    pub races: usize,
}

/// Mean pace per distance label over races with a known pace, shortest first.
#[allow(clippy::cast_precision_loss)]
pub fn pace_by_distance(records: &[NormalizedRecord]) -> Vec<PaceByDistance> {
    // label -> (miles of first record seen, pace sum, count)
    let mut acc: HashMap<&str, (f64, f64, usize)> = HashMap::new();
    for record in records.iter().filter(|r| r.has_pace()) {
        let entry = acc
            .entry(record.distance_label.as_str())
            .or_insert((record.distance_miles, 0.0, 0));
        entry.1 += record.pace_seconds;
        entry.2 += 1;
    }

    let mut rows: Vec<PaceByDistance> = acc
        .into_iter()
        .map(|(label, (distance_miles, sum, races))| PaceByDistance {
            label: label.to_string(),
            distance_miles,
            average_pace_seconds: sum / races as f64,
            races,
        })
        .collect();
    rows.sort_by(|a, b| {
        a.distance_miles
            .total_cmp(&b.distance_miles)
            .then_with(|| a.label.cmp(&b.label))
    });
    rows
}

/// Race count per year. Records with no known year are left out.
pub fn races_per_year(records: &[NormalizedRecord]) -> BTreeMap<i32, usize> {
    let mut years = BTreeMap::new();
    for year in records.iter().filter_map(NormalizedRecord::year) {
        *years.entry(year).or_insert(0) += 1;
    }
    years
}

/// Miles raced per year. Records with no known year are left out.
pub fn miles_per_year(records: &[NormalizedRecord]) -> BTreeMap<i32, f64> {
    let mut years = BTreeMap::new();
    for record in records {
        if let Some(year) = record.year() {
            *years.entry(year).or_insert(0.0) += record.distance_miles;
        }
    }
    years
}

/// Race count per weekday, Sunday first.
pub fn weekday_counts(records: &[NormalizedRecord]) -> [(Weekday, usize); 7] {
    let mut counts = [
        (Weekday::Sun, 0),
        (Weekday::Mon, 0),
        (Weekday::Tue, 0),
        (Weekday::Wed, 0),
        (Weekday::Thu, 0),
        (Weekday::Fri, 0),
        (Weekday::Sat, 0),
    ];
    for date in records.iter().filter_map(|r| r.parsed_date) {
        counts[date.weekday().num_days_from_sunday() as usize].1 += 1;
    }
    counts
}

/// Month with the most races; ties go to the earlier month.
pub fn favorite_month(records: &[NormalizedRecord]) -> Option<(Month, usize)> {
    let mut counts = [0usize; 12];
    for date in records.iter().filter_map(|r| r.parsed_date) {
        counts[date.month0() as usize] += 1;
    }

    let (index, &count) = counts
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|(_, count)| **count)?;
    if count == 0 {
        return None;
    }
    let month = u8::try_from(index + 1).ok().and_then(|m| Month::try_from(m).ok())?;
    Some((month, count))
}

/// Distinct cities raced in (case-sensitive, empty locations ignored).
pub fn unique_cities(records: &[NormalizedRecord]) -> usize {
    records
        .iter()
        .map(|r| r.raw.city())
        .filter(|city| !city.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

/// Races finished in the top three of the division, gender or overall field.
pub fn podium_count(records: &[NormalizedRecord]) -> usize {
    records.iter().filter(|r| placement::is_podium(&r.raw)).count()
}

/// Performance tier distribution over races with a usable placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub ranked: usize,
    pub tiers: BTreeMap<PerformanceTier, usize>,
}

pub fn tier_counts(records: &[NormalizedRecord]) -> TierCounts {
    let mut tiers = BTreeMap::new();
    for tier in records.iter().filter_map(|r| placement::tier(&r.raw)) {
        *tiers.entry(tier).or_insert(0) += 1;
    }
    TierCounts {
        ranked: tiers.values().sum(),
        tiers,
    }
}

/// Total mileage restated against familiar distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceEquivalents {
    pub cross_country_trips: f64,
    pub appalachian_trails: f64,
    pub equators: f64,
    pub marathons: f64,
}

impl DistanceEquivalents {
    pub fn from_miles(miles: f64) -> Self {
        Self {
            cross_country_trips: miles / CROSS_COUNTRY_MILES,
            appalachian_trails: miles / APPALACHIAN_TRAIL_MILES,
            equators: miles / EQUATOR_MILES,
            marathons: miles / MARATHON_MILES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::record::RawRecord;

    fn raw(event: &str, date: &str, time: &str, pace: &str) -> RawRecord {
        RawRecord {
            event: event.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            pace: pace.to_string(),
            ..RawRecord::default()
        }
    }

    fn fixture() -> Vec<NormalizedRecord> {
        let mut input = vec![
            raw("Spring 5K", "2021-04-10", "22:30", "7:15"),
            raw("Turkey Trot 5K", "2021-11-25", "21:40", "7:00"),
            raw("Boston Marathon", "2023-04-17", "3:45:00", "8:35"),
            raw("Parkway Half", "2022-09-18", "1:45:00", "8:01"),
            raw("Mystery Run", "someday", "--", "--"),
        ];
        input[0].location = "Columbia, MD".to_string();
        input[1].location = "Columbia, MD".to_string();
        input[2].location = "Boston, MA".to_string();
        input[0].overall = "3 of 210".to_string();
        input[2].overall = "9000 of 30000".to_string();
        input[3].gender = "40 of 900".to_string();
        input[4].year = Some(2019);
        normalize(&input)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn summary_totals() {
        let summary = summarize(&fixture());
        assert_eq!(summary.total_races, 5);
        // 3.1 + 3.1 + 26.2 + 13.1 + 5 (fallback)
        assert!(close(summary.total_miles, 50.5));
        assert!(close(summary.average_miles, 10.1));
        // (435 + 420 + 515 + 481) / 4
        assert!(close(summary.average_pace_seconds.unwrap(), 462.75));
        assert!(close(summary.total_minutes, 22.5 + 21.67 + 225.0 + 105.0));
    }

    #[test]
    fn summary_of_nothing() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_races, 0);
        assert!(close(summary.average_miles, 0.0));
        assert_eq!(summary.average_pace_seconds, None);
    }

    #[test]
    fn counts_by_label() {
        let counts = distance_counts(&fixture());
        assert_eq!(
            counts[0],
            LabelCount {
                label: "5K".to_string(),
                count: 2
            }
        );
        let labels: Vec<&str> = counts.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["5K", "Half Marathon", "Marathon", "Other"]);
    }

    #[test]
    fn bests_pick_fastest_in_distance_order() {
        let records = fixture();
        let bests = personal_bests(&records);
        let summary: Vec<(RaceCategory, &str)> = bests
            .iter()
            .map(|b| (b.category, b.record.raw.event.as_str()))
            .collect();
        assert_eq!(
            summary,
            [
                (RaceCategory::FiveK, "Turkey Trot 5K"),
                (RaceCategory::Half, "Parkway Half"),
                (RaceCategory::Marathon, "Boston Marathon"),
            ]
        );
    }

    #[test]
    fn bests_skip_untimed_and_other() {
        let records = normalize(&[raw("Spring 5K", "2021-04-10", "--", "--")]);
        assert!(personal_bests(&records).is_empty());
    }

    #[test]
    fn paces_ordered_by_distance() {
        let rows = pace_by_distance(&fixture());
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["5K", "Half Marathon", "Marathon"]);
        assert!(close(rows[0].average_pace_seconds, 427.5));
        assert_eq!(rows[0].races, 2);
    }

    #[test]
    fn yearly_totals_fall_back_to_raw_year() {
        let records = fixture();
        let races = races_per_year(&records);
        assert_eq!(
            races.into_iter().collect::<Vec<_>>(),
            [(2019, 1), (2021, 2), (2022, 1), (2023, 1)]
        );
        let miles = miles_per_year(&records);
        assert!(close(miles[&2021], 6.2));
        assert!(close(miles[&2019], 5.0));
    }

    #[test]
    fn weekdays_start_on_sunday() {
        let counts = weekday_counts(&fixture());
        assert_eq!(counts[0].0, Weekday::Sun);
        // 2021-04-10 Sat, 2021-11-25 Thu, 2023-04-17 Mon, 2022-09-18 Sun
        let by_day: Vec<usize> = counts.iter().map(|(_, c)| *c).collect();
        assert_eq!(by_day, [1, 1, 0, 0, 1, 0, 1]);
    }

    #[test]
    fn favorite_month_prefers_earlier_on_tie() {
        // April twice, September and November once
        assert_eq!(favorite_month(&fixture()), Some((Month::April, 2)));
        assert_eq!(favorite_month(&[]), None);
    }

    #[test]
    fn cities_and_podiums() {
        let records = fixture();
        assert_eq!(unique_cities(&records), 2);
        assert_eq!(podium_count(&records), 1);
    }

    #[test]
    fn tiers() {
        let counts = tier_counts(&fixture());
        assert_eq!(counts.ranked, 3);
        assert_eq!(counts.tiers[&PerformanceTier::Top10], 2);
        assert_eq!(counts.tiers[&PerformanceTier::Top50], 1);
        assert!(!counts.tiers.contains_key(&PerformanceTier::Finisher));
    }

    #[test]
    fn equivalents() {
        let eq = DistanceEquivalents::from_miles(2790.0);
        assert!(close(eq.cross_country_trips, 1.0));
        assert!(close(DistanceEquivalents::from_miles(52.4).marathons, 2.0));
    }
}
