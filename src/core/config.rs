//! Generator configuration, loadable from RON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::core::pairing::PairingStrategy;
use crate::core::section_choice::SectionChoice;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// A name on the command line that matches no known option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// How a `Setup` pairs participants and picks detail sections.
///
/// ```ron
/// (
///     pairing: RandomCoverage,
///     section_choice: RoundRobin,
///     seed: Some(7),
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub pairing: PairingStrategy,
    pub section_choice: SectionChoice,
    /// Fixed seed for reproducible tables; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn load_from_ron(path: &Path) -> Result<GeneratorConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<GeneratorConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }
}

/// Lower-case, with `_` and spaces treated like `-`.
fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['_', ' '], "-")
}

impl FromStr for PairingStrategy {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "ring" | "circular" => Ok(Self::Ring),
            "all-combinations" | "all" => Ok(Self::AllCombinations),
            "random-coverage" | "random" => Ok(Self::RandomCoverage),
            _ => Err(UnknownVariant {
                kind: "pairing strategy",
                value: s.to_string(),
                expected: "ring, all-combinations, random-coverage",
            }),
        }
    }
}

impl FromStr for SectionChoice {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "round-robin" | "cycle" => Ok(Self::RoundRobin),
            "random" => Ok(Self::Random),
            _ => Err(UnknownVariant {
                kind: "section choice",
                value: s.to_string(),
                expected: "round-robin, random",
            }),
        }
    }
}
