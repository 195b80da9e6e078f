//! Terrain tile types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of terrain tile types produced by the world generator.
///
/// Ordering is stable and used for deterministic terrain-group iteration
/// during resource generation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TerrainType {
    /// Open grassland.
    Grass,
    /// Lakes, rivers, ocean.
    Water,
    /// Beaches and dunes.
    Sand,
    /// Exposed rock.
    Stone,
    /// Bare earth.
    Dirt,
    /// Placeholder for cells the generator has not classified.
    Unspecified,
}

impl TerrainType {
    /// All concrete terrain types (excludes [`TerrainType::Unspecified`]).
    pub const ALL: [TerrainType; 5] = [
        TerrainType::Grass,
        TerrainType::Water,
        TerrainType::Sand,
        TerrainType::Stone,
        TerrainType::Dirt,
    ];

    /// Stable string name used in persistence and wire payloads.
    pub fn name(self) -> &'static str {
        match self {
            TerrainType::Grass => "grass",
            TerrainType::Water => "water",
            TerrainType::Sand => "sand",
            TerrainType::Stone => "stone",
            TerrainType::Dirt => "dirt",
            TerrainType::Unspecified => "unknown",
        }
    }
}

impl fmt::Display for TerrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unrecognized terrain name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized terrain type: {0:?}")]
pub struct TerrainParseError(String);

impl FromStr for TerrainType {
    type Err = TerrainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grass" => Ok(TerrainType::Grass),
            "water" => Ok(TerrainType::Water),
            "sand" => Ok(TerrainType::Sand),
            "stone" => Ok(TerrainType::Stone),
            "dirt" => Ok(TerrainType::Dirt),
            "unknown" => Ok(TerrainType::Unspecified),
            other => Err(TerrainParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for terrain in TerrainType::ALL {
            let parsed: TerrainType = terrain.name().parse().unwrap();
            assert_eq!(parsed, terrain);
        }
        let unknown: TerrainType = "unknown".parse().unwrap();
        assert_eq!(unknown, TerrainType::Unspecified);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("lava".parse::<TerrainType>().is_err());
        assert!("".parse::<TerrainType>().is_err());
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&TerrainType::Grass).unwrap();
        assert_eq!(json, "\"grass\"");
    }
}
