// Core algorithm exports
pub mod error;
pub mod explain;
pub mod features;
pub mod matcher;
pub mod scoring;
pub mod similarity;

pub use error::{EntityKind, MatchError};
pub use explain::{describe_breakdown, explain, FALLBACK_REASON};
pub use features::{extract_skill_keywords, FeatureProvider, FeatureStore, NoFeatures};
pub use matcher::{AlumniComparison, MatchExplanation, Matcher, RankResult, StudentRecommendations, Verdict};
pub use scoring::{build_strategy, HierarchicalPoints, ScoringPolicy, ScoringStrategy, WeightedFraction};
pub use similarity::{cosine_similarity, jaccard};
