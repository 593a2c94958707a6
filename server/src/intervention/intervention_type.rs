use std::{fmt, str::FromStr};

use log::warn;
use thiserror::Error;

/// How strongly the black box may act on the car
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InterventionType {
    /// Neither indicate nor intervene
    #[default]
    NoSignals,
    /// Indicate only
    OnlySignals,
    /// Indicate and intervene on allowed axes ("perform when needed")
    SharedControl,
    /// Neutral baseline cues, then indicate and intervene ("always intervene")
    CompleteTakeover,
    /// Indicate and intervene, plus straight-steer and accelerate cues
    AutonomousAI,
}

impl InterventionType {
    pub const ALL: [InterventionType; 5] = [
        InterventionType::NoSignals,
        InterventionType::OnlySignals,
        InterventionType::SharedControl,
        InterventionType::CompleteTakeover,
        InterventionType::AutonomousAI,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InterventionType::NoSignals => "NoSignals",
            InterventionType::OnlySignals => "OnlySignals",
            InterventionType::SharedControl => "SharedControl",
            InterventionType::CompleteTakeover => "CompleteTakeover",
            InterventionType::AutonomousAI => "AutonomousAI",
        }
    }

    /// Numeric setting from a parameter file. Out of range falls back to `NoSignals`.
    pub fn from_index(index: i64) -> Self {
        usize::try_from(index)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .unwrap_or_else(|| {
                warn!("Unknown intervention type index {index}, using NoSignals");
                InterventionType::NoSignals
            })
    }

    /// Setting by name. Unknown names fall back to `NoSignals`.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|error: UnknownInterventionType| {
            warn!("{error}, using NoSignals");
            InterventionType::NoSignals
        })
    }
}

impl fmt::Display for InterventionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown intervention type {name:?}")]
pub struct UnknownInterventionType {
    pub name: String,
}

impl FromStr for InterventionType {
    type Err = UnknownInterventionType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("PerformWhenNeeded") {
            return Ok(InterventionType::SharedControl);
        }
        if value.eq_ignore_ascii_case("AlwaysIntervene") {
            return Ok(InterventionType::CompleteTakeover);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownInterventionType {
                name: value.to_string(),
            })
    }
}
