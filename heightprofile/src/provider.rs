use crate::{Cartographic, HeightQueryError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Which heights a [`HeightProvider`] should report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElevationType {
    /// Bare-earth terrain only.
    #[default]
    Terrain,

    /// Terrain combined with surface models (buildings, vegetation).
    Both,
}

impl fmt::Display for ElevationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terrain => f.write_str("terrain"),
            Self::Both => f.write_str("both"),
        }
    }
}

impl FromStr for ElevationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "terrain" => Ok(Self::Terrain),
            "both" => Ok(Self::Both),
            other => Err(format!("unknown elevation type '{other}'")),
        }
    }
}

/// Source of terrain and surface heights.
///
/// The sampler issues one query at a time per run and awaits it before
/// issuing the next. Concurrent runs share a provider and may query
/// it concurrently.
#[async_trait]
pub trait HeightProvider: Send + Sync {
    /// Returns `point` with its height replaced by the height found
    /// for `mode`.
    async fn query_height(
        &self,
        point: Cartographic,
        mode: ElevationType,
    ) -> Result<Cartographic, HeightQueryError>;
}
