//! Analysis modes. Each mode owns its own catalog and selection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SitingError;

/// Which family of criteria the user is weighting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Region based priority (administrative areas)
    #[default]
    Region,
    /// Drain based priority (drain outlets and their catchments)
    Drain,
}

impl SelectionMode {
    pub const ALL: [SelectionMode; 2] = [SelectionMode::Region, SelectionMode::Drain];

    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::Region => "region",
            SelectionMode::Drain => "drain",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            SelectionMode::Region => "Region Based",
            SelectionMode::Drain => "Drain Based",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SelectionMode {
    type Err = SitingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "region" | "regions" => Ok(SelectionMode::Region),
            "drain" | "drains" => Ok(SelectionMode::Drain),
            _ => Err(SitingError::UnknownMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("region".parse::<SelectionMode>().unwrap(), SelectionMode::Region);
        assert_eq!("Drain".parse::<SelectionMode>().unwrap(), SelectionMode::Drain);
        assert!("river".parse::<SelectionMode>().is_err());
    }

    #[test]
    fn test_mode_serialization() {
        let json = serde_json::to_string(&SelectionMode::Drain).unwrap();
        assert_eq!(json, "\"drain\"");
    }
}
