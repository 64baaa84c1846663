//! Tier classifier: maps a category percentage to a human-readable level.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assessment::catalog::Category;

/// Whether a higher category percentage is favourable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    // higher is better
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
    // lower is better
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsImprovement => "Needs Improvement",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    pub fn style(&self) -> StyleHint {
        match self {
            Self::Excellent | Self::Low => StyleHint::Green,
            Self::Good => StyleHint::Blue,
            Self::Fair | Self::Moderate => StyleHint::Yellow,
            Self::High => StyleHint::Orange,
            Self::NeedsImprovement | Self::VeryHigh => StyleHint::Red,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Colour a front end should use for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleHint {
    Green,
    Blue,
    Yellow,
    Orange,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub level: Tier,
    pub style: StyleHint,
}

/// Classify a percentage in `[0, 100]` for the given category.
///
/// Boundaries are inclusive toward the better tier: 75 is Excellent for
/// focus and 25 is Low for the other categories.
pub fn classify(category: Category, percentage: f64) -> Classification {
    let level = match category.polarity() {
        Polarity::HigherIsBetter => {
            if percentage >= 75.0 {
                Tier::Excellent
            } else if percentage >= 50.0 {
                Tier::Good
            } else if percentage >= 25.0 {
                Tier::Fair
            } else {
                Tier::NeedsImprovement
            }
        }
        Polarity::LowerIsBetter => {
            if percentage <= 25.0 {
                Tier::Low
            } else if percentage <= 50.0 {
                Tier::Moderate
            } else if percentage <= 75.0 {
                Tier::High
            } else {
                Tier::VeryHigh
            }
        }
    };
    Classification {
        level,
        style: level.style(),
    }
}
