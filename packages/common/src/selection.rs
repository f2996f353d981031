#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a winner was chosen.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMethod {
    /// Uniform draw from the eligible pool.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "random"))]
    Random,
    /// Operator picked a specific entry.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "manual"))]
    Manual,
}

impl SelectionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for SelectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid selection method '{0}', expected random or manual")]
pub struct ParseSelectionMethodError(String);

impl FromStr for SelectionMethod {
    type Err = ParseSelectionMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Self::Random),
            "manual" => Ok(Self::Manual),
            other => Err(ParseSelectionMethodError(other.to_string())),
        }
    }
}
