use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::ScoringPolicy;
use crate::models::{FractionWeights, PointWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub data: DataSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    /// Dataset file with `students` and `alumni` (.json or .toml)
    pub profiles_path: PathBuf,
    /// Optional JSON map of entity id to embedding vector
    pub embeddings_path: Option<PathBuf>,
    /// Append skills found in free text to the declared skill lists
    #[serde(default)]
    pub extract_skills: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default)]
    pub strategy: ScoringPolicy,
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
    #[serde(default = "default_max_top_n")]
    pub max_top_n: usize,
    /// Per-request scoring deadline; unset means no deadline
    pub deadline_ms: Option<u64>,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            strategy: ScoringPolicy::default(),
            default_top_n: default_top_n(),
            max_top_n: default_max_top_n(),
            deadline_ms: None,
        }
    }
}

fn default_top_n() -> usize { 5 }
fn default_max_top_n() -> usize { 50 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub fraction: FractionWeightsConfig,
    #[serde(default)]
    pub points: PointWeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FractionWeightsConfig {
    #[serde(default = "default_semantic_weight")]
    pub semantic: f64,
    #[serde(default = "default_semantic_fallback")]
    pub semantic_fallback: f64,
    #[serde(default = "default_skills_weight")]
    pub skills: f64,
    #[serde(default = "default_industry_weight")]
    pub industry: f64,
    #[serde(default = "default_interests_weight")]
    pub interests: f64,
    #[serde(default = "default_university_weight")]
    pub university: f64,
    #[serde(default = "default_degree_weight")]
    pub degree: f64,
}

impl Default for FractionWeightsConfig {
    fn default() -> Self {
        Self {
            semantic: default_semantic_weight(),
            semantic_fallback: default_semantic_fallback(),
            skills: default_skills_weight(),
            industry: default_industry_weight(),
            interests: default_interests_weight(),
            university: default_university_weight(),
            degree: default_degree_weight(),
        }
    }
}

impl From<&FractionWeightsConfig> for FractionWeights {
    fn from(c: &FractionWeightsConfig) -> Self {
        Self {
            semantic: c.semantic,
            semantic_fallback: c.semantic_fallback,
            skills: c.skills,
            industry: c.industry,
            interests: c.interests,
            university: c.university,
            degree: c.degree,
        }
    }
}

fn default_semantic_weight() -> f64 { 0.4 }
fn default_semantic_fallback() -> f64 { 0.2 }
fn default_skills_weight() -> f64 { 0.3 }
fn default_industry_weight() -> f64 { 0.15 }
fn default_interests_weight() -> f64 { 0.05 }
fn default_university_weight() -> f64 { 0.08 }
fn default_degree_weight() -> f64 { 0.02 }

#[derive(Debug, Clone, Deserialize)]
pub struct PointWeightsConfig {
    #[serde(default = "default_university_points")]
    pub university: u32,
    #[serde(default = "default_industry_points")]
    pub industry: u32,
    #[serde(default = "default_degree_points")]
    pub degree: u32,
    #[serde(default = "default_skill_points")]
    pub skill: u32,
    #[serde(default = "default_interest_points")]
    pub interest: u32,
    #[serde(default = "default_bonus_points")]
    pub mentoring: u32,
    #[serde(default = "default_bonus_points")]
    pub company: u32,
    #[serde(default = "default_bonus_points")]
    pub availability: u32,
}

impl Default for PointWeightsConfig {
    fn default() -> Self {
        Self {
            university: default_university_points(),
            industry: default_industry_points(),
            degree: default_degree_points(),
            skill: default_skill_points(),
            interest: default_interest_points(),
            mentoring: default_bonus_points(),
            company: default_bonus_points(),
            availability: default_bonus_points(),
        }
    }
}

impl From<&PointWeightsConfig> for PointWeights {
    fn from(c: &PointWeightsConfig) -> Self {
        Self {
            university: c.university,
            industry: c.industry,
            degree: c.degree,
            skill: c.skill,
            interest: c.interest,
            mentoring: c.mentoring,
            company: c.company,
            availability: c.availability,
        }
    }
}

fn default_university_points() -> u32 { 200 }
fn default_industry_points() -> u32 { 160 }
fn default_degree_points() -> u32 { 100 }
fn default_skill_points() -> u32 { 90 }
fn default_interest_points() -> u32 { 70 }
fn default_bonus_points() -> u32 { 50 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MENTOR_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MENTOR__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("MENTOR")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
