//! Action types entering the load combinations.

use serde::{Deserialize, Serialize};

/// Characteristic actions on the frame
///
/// # Example
/// ```
/// use timber_core::loads::LoadType;
///
/// assert_eq!(LoadType::Dead.code(), "G");
/// assert_eq!(LoadType::VARIABLE[0], LoadType::Imposed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadType {
    /// G - Permanent action (slab self-weight)
    Dead,
    /// Q - Imposed floor load
    Imposed,
    /// S - Snow load
    Snow,
    /// W - Wind load
    Wind,
}

impl LoadType {
    /// All load types in combination order
    pub const ALL: [LoadType; 4] = [
        LoadType::Dead,
        LoadType::Imposed,
        LoadType::Snow,
        LoadType::Wind,
    ];

    /// Variable actions, in the order used to rank leading/accompanying
    pub const VARIABLE: [LoadType; 3] = [LoadType::Imposed, LoadType::Snow, LoadType::Wind];

    /// Symbol used in combination equations
    pub fn code(&self) -> &'static str {
        match self {
            LoadType::Dead => "G",
            LoadType::Imposed => "Q",
            LoadType::Snow => "S",
            LoadType::Wind => "W",
        }
    }
}

impl std::fmt::Display for LoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
