use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::K3PiError;

/// Charge-correlation tag of a D → K π π π candidate.
///
/// A right-sign (RS) candidate pairs a D0 with a negative kaon (or a D0bar
/// with a positive kaon); wrong-sign (WS) is the opposite pairing. `Both` is
/// used when selecting samples without separating the two.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    /// Right-sign candidates.
    RS,
    /// Wrong-sign candidates.
    WS,
    /// No tag separation.
    Both,
}

impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tag::RS => write!(f, "RS"),
            Tag::WS => write!(f, "WS"),
            Tag::Both => write!(f, "BOTH"),
        }
    }
}

impl FromStr for Tag {
    type Err = K3PiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rs" | "right-sign" | "rightsign" => Ok(Self::RS),
            "ws" | "wrong-sign" | "wrongsign" => Ok(Self::WS),
            "both" => Ok(Self::Both),
            _ => Err(K3PiError::ParseError {
                name: s.to_string(),
                object: "Tag".to_string(),
            }),
        }
    }
}

/// Flavor of the neutral D meson.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flavor {
    D0,
    D0Bar,
}

impl Flavor {
    /// Infer the flavor from the PDG id of the slow pion in D*± → D0 π±.
    ///
    /// A positive slow pion tags a D0.
    pub fn from_slow_pion_id(slow_pion_id: i32) -> Self {
        if slow_pion_id > 0 {
            Self::D0
        } else {
            Self::D0Bar
        }
    }
}

impl Display for Flavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Flavor::D0 => write!(f, "D0"),
            Flavor::D0Bar => write!(f, "D0bar"),
        }
    }
}

impl FromStr for Flavor {
    type Err = K3PiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "d0" => Ok(Self::D0),
            "d0bar" | "d~0" | "anti-d0" => Ok(Self::D0Bar),
            _ => Err(K3PiError::ParseError {
                name: s.to_string(),
                object: "Flavor".to_string(),
            }),
        }
    }
}

/// Quadrant of the (sin 2θ_A, sin 2θ_C) plane.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quadrant {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quadrant {
    /// The quadrant number, 1 through 4.
    pub fn index(&self) -> u8 {
        match self {
            Quadrant::Q1 => 1,
            Quadrant::Q2 => 2,
            Quadrant::Q3 => 3,
            Quadrant::Q4 => 4,
        }
    }
}

impl Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index())
    }
}
