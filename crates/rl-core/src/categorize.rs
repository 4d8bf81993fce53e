//! Race categorization.
//!
//! Resolves a free-form event name (plus its finish time) into a distance
//! category, a display label and a distance in miles.
//!
//! Resolution is an ordered cascade where the first match wins:
//! 1. A recognized manual override.
//! 2. [`STANDARD_RULES`], grouped into [`Stage`]s: named events, dual-distance
//!    events, ultra keywords, then generic distance keywords.
//! 3. The fallback (`Other`, 5 miles).
//!
//! Order matters throughout. A generic keyword checked before a named
//! exception would shadow it, so rules must only ever be inserted at the
//! position they apply to.

use serde::Serialize;

use crate::category::{DistanceTable, RaceCategory};
use crate::parse::{parse_duration, parse_pace};

/// Override value meaning "no override, detect from the event name".
pub const AUTO_DETECT: &str = "Auto Detect";

/// Label assigned when no rule matches.
pub const FALLBACK_LABEL: &str = "Other";

/// Miles assigned when no rule matches.
pub const FALLBACK_MILES: f64 = 5.0;

/// Rock 'n' Roll USA hosts a marathon and a half under one name.
pub const ROCK_N_ROLL_USA_MARATHON_MINUTES: f64 = 150.0;

/// The Hamptons Marathon weekend also runs a half.
pub const HAMPTONS_MARATHON_MINUTES: f64 = 150.0;

/// National Police Challenge runs both a 5K and a 50K.
pub const POLICE_CHALLENGE_ULTRA_MINUTES: f64 = 120.0;

/// Baltimore and Annapolis trail marathon and half.
pub const B_AND_A_MARATHON_MINUTES: f64 = 140.0;

/// Baltimore Running Festival entries that don't say "half".
pub const BALTIMORE_FESTIVAL_MARATHON_MINUTES: f64 = 145.0;

/// Generic "X Marathon and Half Marathon" event names.
pub const COMBINED_EVENT_MARATHON_MINUTES: f64 = 150.0;

/// Distance used by the 50K keyword rules. Differs from the table's 31.07.
pub const ULTRA_50K_RULE_MILES: f64 = 31.1;

/// Result of categorizing one race.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Categorization {
    pub category: RaceCategory,
    pub label: &'static str,
    pub distance_miles: f64,
}

/// Facts about a race that rules match against.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceFacts {
    /// Lowercased event name.
    pub event: String,
    /// Finish time in minutes, 0 when unknown.
    pub minutes: f64,
    /// Pace in seconds per mile, 0 when unknown.
    pub pace_seconds: f64,
}

impl RaceFacts {
    pub fn new(event: &str, time: &str, pace: &str) -> Self {
        Self {
            event: event.to_lowercase(),
            minutes: parse_duration(time),
            pace_seconds: parse_pace(pace),
        }
    }

    fn contains(&self, needle: &str) -> bool {
        self.event.contains(needle)
    }
}

/// Substring conditions on the lowercased event name.
///
/// A matcher fires when every `all` needle is present, at least one `any`
/// needle is present (if any are listed), and no `none` needle is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matcher {
    all: &'static [&'static str],
    any: &'static [&'static str],
    none: &'static [&'static str],
}

impl Matcher {
    /// Matches when the name contains any of `needles`.
    pub const fn any(needles: &'static [&'static str]) -> Self {
        Self {
            all: &[],
            any: needles,
            none: &[],
        }
    }

    /// Matches when the name contains every one of `needles`.
    pub const fn all(needles: &'static [&'static str]) -> Self {
        Self {
            all: needles,
            any: &[],
            none: &[],
        }
    }

    /// Additionally requires at least one of `needles`.
    pub const fn and_any(self, needles: &'static [&'static str]) -> Self {
        Self {
            any: needles,
            ..self
        }
    }

    /// Additionally requires none of `needles`.
    pub const fn excluding(self, needles: &'static [&'static str]) -> Self {
        Self {
            none: needles,
            ..self
        }
    }

    pub fn matches(&self, facts: &RaceFacts) -> bool {
        self.all.iter().all(|n| facts.contains(n))
            && (self.any.is_empty() || self.any.iter().any(|n| facts.contains(n)))
            && !self.none.iter().any(|n| facts.contains(n))
    }
}

/// A resolved distance before it is turned into a [`Categorization`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// A category whose label and miles come from the category itself and the
    /// distance table.
    Category(RaceCategory),
    /// A named exception with a literal label and distance.
    Fixed {
        category: RaceCategory,
        label: &'static str,
        miles: f64,
    },
}

const ULTRA_50K_RULE: Resolution = Resolution::Fixed {
    category: RaceCategory::Ultra50K,
    label: "50K",
    miles: ULTRA_50K_RULE_MILES,
};

/// What a rule resolves to once its matcher fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Always(Resolution),
    /// `longer` when the finish time exceeds `over_minutes`, `shorter` otherwise
    /// (including when the time is unknown).
    ByDuration {
        over_minutes: f64,
        longer: Resolution,
        shorter: Resolution,
    },
}

impl Outcome {
    const fn category(category: RaceCategory) -> Self {
        Self::Always(Resolution::Category(category))
    }

    const fn marathon_or_half(over_minutes: f64) -> Self {
        Self::ByDuration {
            over_minutes,
            longer: Resolution::Category(RaceCategory::Marathon),
            shorter: Resolution::Category(RaceCategory::Half),
        }
    }

    fn resolve(&self, facts: &RaceFacts) -> Resolution {
        match *self {
            Self::Always(resolution) => resolution,
            Self::ByDuration {
                over_minutes,
                longer,
                shorter,
            } => {
                if facts.minutes > over_minutes {
                    longer
                } else {
                    shorter
                }
            }
        }
    }
}

/// Groups of rules, in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Historically known events whose names don't state a distance.
    NamedEvent,
    /// Events hosting more than one distance under one name, plus the
    /// fixed-mile exceptions interleaved with them.
    DualDistance,
    /// Ultra keywords, longest first.
    Ultra,
    /// Generic distance keywords, longest first.
    Generic,
}

/// One entry of the cascade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub name: &'static str,
    pub stage: Stage,
    pub matcher: Matcher,
    pub outcome: Outcome,
}

impl Rule {
    const fn new(name: &'static str, stage: Stage, matcher: Matcher, outcome: Outcome) -> Self {
        Self {
            name,
            stage,
            matcher,
            outcome,
        }
    }

    /// Applies this rule alone, returning its resolution if it matches.
    pub fn apply(&self, facts: &RaceFacts) -> Option<Resolution> {
        self.matcher
            .matches(facts)
            .then(|| self.outcome.resolve(facts))
    }
}

use Outcome as O;
use RaceCategory as C;
use Stage::{DualDistance, Generic, NamedEvent, Ultra};

/// The standard cascade.
#[rustfmt::skip]
pub const STANDARD_RULES: &[Rule] = &[
    // Named events
    Rule::new("club challenge", NamedEvent, Matcher::any(&["club challenge"]), O::category(C::TenMile)),
    Rule::new("turkey burnoff", NamedEvent, Matcher::any(&["turkey burnoff"]), O::category(C::TenMile)),
    Rule::new("jingle bell jog", NamedEvent, Matcher::any(&["jingle bell jog"]), O::category(C::EightK)),
    Rule::new("warrior dash", NamedEvent, Matcher::any(&["warrior dash"]), O::category(C::FiveK)),
    Rule::new(
        "june bugs cross country",
        NamedEvent,
        Matcher::any(&["june bugs cross country"]),
        O::category(C::FiveK),
    ),
    Rule::new("kensington parkrun", NamedEvent, Matcher::any(&["kensington parkrun"]), O::category(C::FiveK)),
    Rule::new("damien's run", NamedEvent, Matcher::any(&["damien's run"]), O::category(C::FiveK)),
    Rule::new(
        "rotary remembrance run",
        NamedEvent,
        Matcher::any(&["rotary remembrance run"]),
        O::category(C::FiveK),
    ),
    Rule::new(
        "going green track meet",
        NamedEvent,
        Matcher::any(&["going green track meet"]),
        O::category(C::TwoMile),
    ),
    Rule::new("firebirds mile", NamedEvent, Matcher::any(&["firebirds mile"]), O::category(C::OneMile)),
    Rule::new("piece of cake", NamedEvent, Matcher::any(&["piece of cake"]), O::category(C::TenK)),
    // Dual-distance events and fixed-mile exceptions
    Rule::new(
        "rock n roll usa",
        DualDistance,
        Matcher::any(&["rock n roll usa", "rock 'n' roll usa"]),
        O::marathon_or_half(ROCK_N_ROLL_USA_MARATHON_MINUTES),
    ),
    Rule::new(
        "hamptons marathon",
        DualDistance,
        Matcher::any(&["hamptons marathon"]),
        O::marathon_or_half(HAMPTONS_MARATHON_MINUTES),
    ),
    Rule::new(
        "seneca slopes 9k",
        DualDistance,
        Matcher::any(&["seneca slopes 9k"]),
        O::Always(Resolution::Fixed {
            category: C::Other,
            label: "9K",
            miles: 5.59,
        }),
    ),
    Rule::new(
        "seneca slopes 8.5k",
        DualDistance,
        Matcher::any(&["seneca slopes 8.5k"]),
        O::Always(Resolution::Fixed {
            category: C::Other,
            label: "8.5K",
            miles: 5.28,
        }),
    ),
    Rule::new(
        "national police challenge",
        DualDistance,
        Matcher::any(&["national police challenge", "npc"]),
        O::ByDuration {
            over_minutes: POLICE_CHALLENGE_ULTRA_MINUTES,
            longer: ULTRA_50K_RULE,
            shorter: Resolution::Category(C::FiveK),
        },
    ),
    Rule::new("country road run", DualDistance, Matcher::any(&["country road run"]), O::category(C::FiveMile)),
    Rule::new("ymca turkey chase", DualDistance, Matcher::all(&["ymca", "turkey chase"]), O::category(C::TenK)),
    Rule::new(
        "baltimore and annapolis",
        DualDistance,
        Matcher::any(&["baltimore and annapolis", "b&a", "b & a"]),
        O::marathon_or_half(B_AND_A_MARATHON_MINUTES),
    ),
    Rule::new(
        "baltimore running festival half",
        DualDistance,
        Matcher::all(&["baltimore running festival", "half"]),
        O::category(C::Half),
    ),
    Rule::new(
        "baltimore running festival",
        DualDistance,
        Matcher::any(&["baltimore running festival"]),
        O::marathon_or_half(BALTIMORE_FESTIVAL_MARATHON_MINUTES),
    ),
    // Ultras, longest first
    Rule::new(
        "100 miler",
        Ultra,
        Matcher::all(&["100"]).and_any(&["mile", "endurance", "vermont"]),
        O::category(C::Ultra100Mile),
    ),
    Rule::new("50 miler", Ultra, Matcher::any(&["50 mile", "50 mi", "jfk"]), O::category(C::Ultra50Mile)),
    Rule::new(
        "50k",
        Ultra,
        Matcher::any(&["50k", "50 k", "endurance challenge"]),
        O::Always(ULTRA_50K_RULE),
    ),
    // Generic keywords, longest first
    Rule::new("metric marathon", Generic, Matcher::any(&["metric marathon"]), O::category(C::MetricMarathon)),
    Rule::new(
        "marathon and half",
        Generic,
        Matcher::all(&["marathon", "half"]),
        O::marathon_or_half(COMBINED_EVENT_MARATHON_MINUTES),
    ),
    Rule::new("half", Generic, Matcher::any(&["half"]), O::category(C::Half)),
    Rule::new("marathon", Generic, Matcher::any(&["marathon"]), O::category(C::Marathon)),
    Rule::new(
        "10 mile",
        Generic,
        Matcher::any(&["10 mile", "10-mile", "10m", "cherry blossom", "army ten"]),
        O::category(C::TenMile),
    ),
    Rule::new("10k", Generic, Matcher::any(&["10k"]), O::category(C::TenK)),
    Rule::new("8k", Generic, Matcher::any(&["8k"]), O::category(C::EightK)),
    Rule::new("5 mile", Generic, Matcher::any(&["5 mile", "5-miler"]), O::category(C::FiveMile)),
    Rule::new("5k", Generic, Matcher::any(&["5k"]), O::category(C::FiveK)),
    Rule::new("3k", Generic, Matcher::any(&["3k"]), O::category(C::ThreeK)),
    Rule::new("2 mile", Generic, Matcher::any(&["2 miler", "2 mile"]), O::category(C::TwoMile)),
    Rule::new(
        "mile",
        Generic,
        Matcher::all(&["mile"]).excluding(&["10", "5", "50", "100"]),
        O::category(C::OneMile),
    ),
];

/// Categorizes races against a distance table and an ordered rule list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Categorizer {
    table: DistanceTable,
    rules: &'static [Rule],
}

impl Categorizer {
    /// Categorizer using [`STANDARD_RULES`] and the given table.
    pub const fn new(table: DistanceTable) -> Self {
        Self {
            table,
            rules: STANDARD_RULES,
        }
    }

    pub const fn table(&self) -> &DistanceTable {
        &self.table
    }

    pub const fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Categorizes one race. Never fails; unmatched names fall back to `Other`.
    pub fn categorize(
        &self,
        event: &str,
        time: &str,
        pace: &str,
        manual_override: Option<&str>,
    ) -> Categorization {
        if let Some(categorization) = manual_override.and_then(|m| self.manual(m)) {
            tracing::trace!(event, label = categorization.label, "manual override");
            return categorization;
        }

        let facts = RaceFacts::new(event, time, pace);
        for rule in self.rules {
            if let Some(resolution) = rule.apply(&facts) {
                tracing::trace!(event, rule = rule.name, stage = ?rule.stage, "rule matched");
                return self.finish(resolution);
            }
        }

        tracing::debug!(event, "no categorization rule matched, using fallback");
        Categorization {
            category: RaceCategory::Other,
            label: FALLBACK_LABEL,
            distance_miles: FALLBACK_MILES,
        }
    }

    /// Resolves a manual override, ignoring empty, "Auto Detect" and unknown labels.
    pub fn manual(&self, value: &str) -> Option<Categorization> {
        if value.is_empty() || value == AUTO_DETECT {
            return None;
        }
        value
            .parse::<RaceCategory>()
            .ok()
            .map(|category| self.finish(Resolution::Category(category)))
    }

    /// Turns a resolution into a categorization using this table.
    pub const fn finish(&self, resolution: Resolution) -> Categorization {
        match resolution {
            Resolution::Category(category) => Categorization {
                category,
                label: category.label(),
                distance_miles: self.table.miles(category),
            },
            Resolution::Fixed {
                category,
                label,
                miles,
            } => Categorization {
                category,
                label,
                distance_miles: miles,
            },
        }
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(DistanceTable::standard())
    }
}

/// Categorizes one race with the standard table and rules.
pub fn categorize(
    event: &str,
    time: &str,
    pace: &str,
    manual_override: Option<&str>,
) -> Categorization {
    Categorizer::default().categorize(event, time, pace, manual_override)
}
