//! Fork Registry
//!
//! The protocol versions ("forks") a versioned beacon object may be tagged
//! with. Versions are ordered chronologically so fork-gated features can be
//! checked with a comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Beacon chain fork a piece of data belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataVersion {
    /// Tag of an uninitialised wrapper; supported by nothing
    #[default]
    Unknown,
    Phase0,
    Altair,
    Bellatrix,
    Capella,
    Deneb,
    Electra,
    Fulu,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown fork name: {0}")]
pub struct UnknownFork(pub String);

impl DataVersion {
    /// Every known fork, oldest first
    pub const ALL: [Self; 7] = [
        Self::Phase0,
        Self::Altair,
        Self::Bellatrix,
        Self::Capella,
        Self::Deneb,
        Self::Electra,
        Self::Fulu,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Phase0 => "phase0",
            Self::Altair => "altair",
            Self::Bellatrix => "bellatrix",
            Self::Capella => "capella",
            Self::Deneb => "deneb",
            Self::Electra => "electra",
            Self::Fulu => "fulu",
        }
    }

    /// Prefix of the fork's container names, e.g. `ElectraBeaconBlockBody`
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Phase0 => "Phase0",
            Self::Altair => "Altair",
            Self::Bellatrix => "Bellatrix",
            Self::Capella => "Capella",
            Self::Deneb => "Deneb",
            Self::Electra => "Electra",
            Self::Fulu => "Fulu",
        }
    }

    /// True for every fork at or after `fork`; never true for `Unknown`
    #[must_use]
    pub fn is_at_least(self, fork: Self) -> bool {
        self != Self::Unknown && self >= fork
    }

    /// Forks from Bellatrix on carry an execution payload
    #[must_use]
    pub fn has_execution_payload(self) -> bool {
        self.is_at_least(Self::Bellatrix)
    }
}

impl fmt::Display for DataVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataVersion {
    type Err = UnknownFork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|version| version.name() == lower)
            .ok_or_else(|| UnknownFork(s.to_string()))
    }
}
