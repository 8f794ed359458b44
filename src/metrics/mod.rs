//! Content nutrition metrics
//!
//! Six independent heuristics, each mapping page text (or its URL) to a
//! score in [0, 100]:
//!
//! ```text
//! Fact density          = sentences with a digit / sentences × 100
//! Bias level            = polarizing words / words × 500      (cap 100)
//! Emotional intensity   = emotion words / words × 300         (cap 100)
//! Perspective diversity = distinct words / 10                  (cap 100)
//! Complexity            = (avg word length - 3) × 20           (0..=100)
//! Source credibility    = first matching URL rule, else 70
//! ```
//!
//! None of these claim linguistic accuracy. They are cheap, deterministic
//! signals meant to be read together on a nutrition label.

mod heuristics;
mod lexicon;
mod sources;

pub use heuristics::{
    bias_level, complexity, emotional_intensity, fact_density, perspective_diversity,
    source_credibility, HeuristicAnalyzer,
};
pub use lexicon::{Lexicon, EMOTIONAL, POLARIZING};
pub use sources::{SourceRegistry, SourceRule, DEFAULT_FALLBACK};
