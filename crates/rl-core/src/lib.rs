//! Core domain logic for the race log.
//!
//! This crate contains the fundamental types and logic for:
//! - Parsing: finish times, paces and dates from free text
//! - Categorization: resolving event names to distance categories
//! - Normalization: turning raw records into the canonical record set
//! - Analytics: summaries, personal bests and milestones over that set

pub mod categorize;
pub mod category;
pub mod format;
pub mod milestones;
pub mod normalize;
pub mod parse;
pub mod placement;
pub mod record;
pub mod stats;
pub mod types;

pub use categorize::{Categorization, Categorizer, categorize};
pub use category::{DistanceTable, DistanceTableError, RaceCategory, UnknownCategory};
pub use normalize::{IdScheme, Normalizer, normalize};
pub use parse::{parse_date, parse_duration, parse_pace};
pub use record::{NormalizedRecord, RawRecord};
pub use types::{RecordId, ValidationError};
