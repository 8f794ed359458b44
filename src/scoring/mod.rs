//! Nutrition summary scoring
//!
//! Turns a [`MetricVector`](crate::models::MetricVector) into an average and
//! a set of badges. Pure and stateless: badges are recomputed every time a
//! vector is shown, never stored.
//!
//! # Badges
//!
//! ```text
//! Balanced Diet       average of all six metrics >= 70
//! Fact Checker        fact density >= 80
//! Perspective Seeker  perspective diversity >= 80
//! ```
//!
//! # Example
//!
//! fact 85, bias 10, emotion 10, diversity 85, complexity 10, source 90
//! → average 48.33 → Fact Checker + Perspective Seeker, no Balanced Diet.

mod aggregator;

pub use aggregator::{
    summarize, Band, Summary, BALANCED_DIET, BALANCED_DIET_THRESHOLD, FACT_CHECKER,
    FACT_CHECKER_THRESHOLD, PERSPECTIVE_SEEKER, PERSPECTIVE_SEEKER_THRESHOLD,
};
