//! Batch normalization of raw race records.

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::categorize::Categorizer;
use crate::parse::{parse_date, parse_duration, parse_pace};
use crate::record::{NormalizedRecord, RawRecord};
use crate::types::RecordId;

/// How IDs are synthesized for records that don't carry one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IdScheme {
    /// `race-{index}`: identical across runs over the same input.
    #[default]
    Positional,
    /// `race-{index}-{token}`: unique per batch token.
    Token(String),
}

impl IdScheme {
    fn synthesize(&self, index: usize) -> RecordId {
        match self {
            Self::Positional => RecordId::synthesized(index, None),
            Self::Token(token) => RecordId::synthesized(index, Some(token)),
        }
    }
}

/// Turns raw records into the canonical normalized set.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    categorizer: Categorizer,
    ids: IdScheme,
}

impl Normalizer {
    pub const fn new(categorizer: Categorizer, ids: IdScheme) -> Self {
        Self { categorizer, ids }
    }

    pub const fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    /// Normalizes one record without assigning a unique ID.
    fn normalize_one(&self, raw: &RawRecord, id: RecordId) -> NormalizedRecord {
        let categorization = self.categorizer.categorize(
            &raw.event,
            &raw.time,
            &raw.pace,
            raw.distance_type.as_deref(),
        );
        let parsed_date = parse_date(&raw.date);
        if parsed_date.is_none() {
            tracing::debug!(id = %id, date = %raw.date, "unparsable race date");
        }

        NormalizedRecord {
            id,
            raw: raw.clone(),
            parsed_date,
            pace_seconds: parse_pace(&raw.pace),
            total_minutes: parse_duration(&raw.time),
            category: categorization.category,
            distance_label: categorization.label.to_string(),
            distance_miles: categorization.distance_miles,
        }
    }

    /// Normalizes every record, most recent first.
    ///
    /// Every input produces exactly one output. Records with unparsable dates
    /// sort after all dated records and keep their input order.
    pub fn normalize(&self, records: &[RawRecord]) -> Vec<NormalizedRecord> {
        let mut seen: HashSet<RecordId> = HashSet::with_capacity(records.len());
        let mut normalized: Vec<NormalizedRecord> = records
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let id = self.assign_id(index, raw, &seen);
                seen.insert(id.clone());
                self.normalize_one(raw, id)
            })
            .collect();

        // Stable: ties and undated records keep input order
        normalized.sort_by_key(|record| (record.parsed_date.is_none(), Reverse(record.parsed_date)));

        tracing::debug!(count = normalized.len(), "normalized race records");
        normalized
    }

    /// Caller ID when present and unused, else a synthesized one, suffixed
    /// until it is unique.
    fn assign_id(&self, index: usize, raw: &RawRecord, seen: &HashSet<RecordId>) -> RecordId {
        let caller = raw
            .id
            .as_deref()
            .and_then(|id| RecordId::new(id).ok())
            .filter(|id| !seen.contains(id));
        if let Some(id) = caller {
            return id;
        }
        if raw.id.is_some() {
            tracing::debug!(index, id = raw.id.as_deref(), "duplicate record id, synthesizing");
        }

        let base = self.ids.synthesize(index);
        if !seen.contains(&base) {
            return base;
        }
        (1..)
            .filter_map(|n| RecordId::new(format!("{base}-{n}")).ok())
            .find(|id| !seen.contains(id))
            .unwrap_or(base)
    }
}

/// Normalizes records with the standard categorizer and positional IDs.
pub fn normalize(records: &[RawRecord]) -> Vec<NormalizedRecord> {
    Normalizer::default().normalize(records)
}
