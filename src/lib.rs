//! nutrilabel - nutrition facts for web content
//!
//! Scores a page of text on six metrics (fact density, bias, emotional
//! manipulation, perspective diversity, complexity, source credibility),
//! either with local heuristics or through a remote language model, and
//! summarizes the result into an average and a set of badges.
//!
//! ```rust,ignore
//! use nutrilabel::metrics::HeuristicAnalyzer;
//! use nutrilabel::models::{Analysis, AnalysisSource, PageContent};
//!
//! let page = PageContent::new(text, "https://www.bbc.com/news/x", "Title");
//! let metrics = HeuristicAnalyzer::default().analyze(&page);
//! let analysis = Analysis::new(&page, AnalysisSource::Heuristic, metrics);
//! println!("{:.2}", analysis.summary.average);
//! ```

pub mod ai;
pub mod cli;
pub mod config;
pub mod metrics;
pub mod models;
pub mod reporters;
pub mod scoring;
pub mod text;
