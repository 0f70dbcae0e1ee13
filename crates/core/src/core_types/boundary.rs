//! Boundary policy applied at the tank walls.

use crate::core_types::error::WaveTankError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the integrated field is clipped at the tank walls.
///
/// - `Reflective`: the wall and every obstacle zero the field, so waves bounce.
/// - `Absorbing`: obstacles still reflect, the outer wall is replaced by a
///   linear taper that soaks up energy over the last few cells.
/// - `Open`: no clipping and no taper; waves leave the domain unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryType {
    #[default]
    Reflective,
    Absorbing,
    Open,
}

impl BoundaryType {
    /// All supported boundary types, in UI order.
    pub const ALL: [BoundaryType; 3] = [Self::Reflective, Self::Absorbing, Self::Open];

    /// Lowercase name as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reflective => "reflective",
            Self::Absorbing => "absorbing",
            Self::Open => "open",
        }
    }
}

impl fmt::Display for BoundaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoundaryType {
    type Err = WaveTankError;

    /// Parse a boundary type name. Matching ignores ASCII case and
    /// surrounding whitespace, so UI labels like `"Absorbing"` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| WaveTankError::InvalidBoundaryType(s.to_string()))
    }
}
