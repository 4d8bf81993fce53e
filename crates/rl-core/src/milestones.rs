//! Career milestones found by replaying races in date order.

use chrono::NaiveDate;
use serde::Serialize;

use crate::category::RaceCategory;
use crate::record::NormalizedRecord;

/// Cumulative mileage markers, ascending.
pub const MILE_MARKERS: [u32; 5] = [100, 500, 1000, 2000, 5000];

/// Race counts that earn a milestone.
pub const RACE_COUNT_MARKERS: [usize; 2] = [50, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MilestoneKind {
    FirstRace,
    MileClub(u32),
    FirstHalf,
    FirstMarathon,
    FirstUltra,
    RaceCount(usize),
}

impl MilestoneKind {
    pub fn title(self) -> String {
        match self {
            Self::FirstRace => "The Journey Begins".to_string(),
            Self::MileClub(miles) => format!("{miles} Mile Club"),
            Self::FirstHalf => "First Half Marathon".to_string(),
            Self::FirstMarathon => "First Marathon".to_string(),
            Self::FirstUltra => "Ultra Runner Status".to_string(),
            Self::RaceCount(100) => "100th Race Hall of Fame".to_string(),
            Self::RaceCount(n) => format!("{n}th Race"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Milestone<'a> {
    pub kind: MilestoneKind,
    pub date: NaiveDate,
    pub record: &'a NormalizedRecord,
}

impl Milestone<'_> {
    pub fn title(&self) -> String {
        self.kind.title()
    }

    /// One-line description of the race that earned the milestone.
    pub fn detail(&self) -> String {
        match self.kind {
            MilestoneKind::MileClub(_) => format!("Crossed at {}", self.record.raw.event),
            _ => self.record.raw.event.clone(),
        }
    }
}

/// Milestones in the record set, newest first.
///
/// Races without a parsed date can't be placed in the timeline and are skipped.
pub fn milestones(records: &[NormalizedRecord]) -> Vec<Milestone<'_>> {
    let mut timeline: Vec<(NaiveDate, &NormalizedRecord)> = records
        .iter()
        .filter_map(|r| r.parsed_date.map(|d| (d, r)))
        .collect();
    timeline.sort_by_key(|(date, _)| *date);

    let mut found = Vec::new();
    let mut total_miles = 0.0;
    let mut next_marker = 0;
    let (mut has_half, mut has_marathon, mut has_ultra) = (false, false, false);

    for (index, &(date, record)) in timeline.iter().enumerate() {
        let mut push = |kind| found.push(Milestone { kind, date, record });

        if index == 0 {
            push(MilestoneKind::FirstRace);
        }

        total_miles += record.distance_miles;
        while let Some(&marker) = MILE_MARKERS.get(next_marker) {
            if total_miles < f64::from(marker) {
                break;
            }
            push(MilestoneKind::MileClub(marker));
            next_marker += 1;
        }

        if !has_half && record.category == RaceCategory::Half {
            push(MilestoneKind::FirstHalf);
            has_half = true;
        }
        if !has_marathon && record.category == RaceCategory::Marathon {
            push(MilestoneKind::FirstMarathon);
            has_marathon = true;
        }
        if !has_ultra && record.category.is_ultra() {
            push(MilestoneKind::FirstUltra);
            has_ultra = true;
        }

        if RACE_COUNT_MARKERS.contains(&(index + 1)) {
            push(MilestoneKind::RaceCount(index + 1));
        }
    }

    // Stable: same-day milestones keep the order they were earned in
    found.sort_by_key(|m| std::cmp::Reverse(m.date));
    found
}
