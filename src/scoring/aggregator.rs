//! Metric aggregation and badge rules

use crate::models::{Badge, MetricVector};
use serde::Serialize;
use tracing::debug;

/// Average at or above this earns "Balanced Diet"
pub const BALANCED_DIET_THRESHOLD: f64 = 70.0;
/// Fact density at or above this earns "Fact Checker"
pub const FACT_CHECKER_THRESHOLD: f64 = 80.0;
/// Diversity at or above this earns "Perspective Seeker"
pub const PERSPECTIVE_SEEKER_THRESHOLD: f64 = 80.0;

pub const BALANCED_DIET: Badge = Badge {
    id: "balanced-diet",
    name: "Balanced Diet",
    description: "Consuming diverse content",
};

pub const FACT_CHECKER: Badge = Badge {
    id: "fact-checker",
    name: "Fact Checker",
    description: "High fact density preference",
};

pub const PERSPECTIVE_SEEKER: Badge = Badge {
    id: "perspective-seeker",
    name: "Perspective Seeker",
    description: "Values diverse viewpoints",
};

/// Average plus the badges a vector earns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Mean of the six metrics, rounded to two decimals
    pub average: f64,
    pub badges: Vec<Badge>,
}

/// Summarize a metric vector.
///
/// Badge rules are independent and inclusive (`>=`); the output keeps rule
/// order: Balanced Diet, Fact Checker, Perspective Seeker. Balanced Diet is
/// judged on the unrounded mean; rounding only applies to `average`.
pub fn summarize(metrics: &MetricVector) -> Summary {
    let values = metrics.values();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let average = (mean * 100.0).round() / 100.0;

    let mut badges = Vec::new();
    if mean >= BALANCED_DIET_THRESHOLD {
        badges.push(BALANCED_DIET);
    }
    if metrics.fact_density >= FACT_CHECKER_THRESHOLD {
        badges.push(FACT_CHECKER);
    }
    if metrics.diversity >= PERSPECTIVE_SEEKER_THRESHOLD {
        badges.push(PERSPECTIVE_SEEKER);
    }

    debug!("Summary: average={:.2}, {} badge(s)", average, badges.len());
    Summary { average, badges }
}

/// Coarse reading of a single score, used to colour values on the label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    /// 0 to 33
    Low,
    /// above 33 up to 66
    Medium,
    /// above 66
    High,
}

impl Band {
    pub fn of(value: f64) -> Band {
        match value {
            v if v <= 33.0 => Band::Low,
            v if v <= 66.0 => Band::Medium,
            _ => Band::High,
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Band::Low => write!(f, "low"),
            Band::Medium => write!(f, "medium"),
            Band::High => write!(f, "high"),
        }
    }
}
