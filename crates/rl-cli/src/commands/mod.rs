//! CLI subcommand implementations.

pub mod bests;
pub mod categorize;
pub mod milestones;
pub mod normalize;
pub mod summary;
