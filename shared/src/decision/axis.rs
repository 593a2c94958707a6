use std::{fmt, str::FromStr};

use thiserror::Error;

/// The control axes a black box can decide on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DecisionAxis {
    Accel,
    Brake,
    Steer,
    Gear,
    Lights,
}

impl DecisionAxis {
    pub const ALL: [DecisionAxis; 5] = [
        DecisionAxis::Accel,
        DecisionAxis::Brake,
        DecisionAxis::Steer,
        DecisionAxis::Gear,
        DecisionAxis::Lights,
    ];

    /// Name used in ACTIONORDER
    pub fn name(&self) -> &'static str {
        match self {
            DecisionAxis::Accel => "Accel",
            DecisionAxis::Brake => "Brake",
            DecisionAxis::Steer => "Steer",
            DecisionAxis::Gear => "Gear",
            DecisionAxis::Lights => "Lights",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            DecisionAxis::Accel => 0,
            DecisionAxis::Brake => 1,
            DecisionAxis::Steer => 2,
            DecisionAxis::Gear => 3,
            DecisionAxis::Lights => 4,
        }
    }
}

impl fmt::Display for DecisionAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown decision axis {name:?}")]
pub struct DecisionAxisParseError {
    pub name: String,
}

impl FromStr for DecisionAxis {
    type Err = DecisionAxisParseError;

    /// Case-insensitive
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        DecisionAxis::ALL
            .into_iter()
            .find(|axis| axis.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| DecisionAxisParseError {
                name: value.to_string(),
            })
    }
}
