use serde::{Deserialize, Serialize};

/// Default number of places returned for a search when the model does not
/// specify one.
pub const DEFAULT_PLACE_LIMIT: u8 = 5;

/// Upper bound on the place result limit.
pub const MAX_PLACE_LIMIT: u8 = 10;

/// Classified purpose of a user message, plus its required parameters.
///
/// Constructed only by the intent resolver; immutable afterwards and
/// consumed once by the orchestration driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// Search for places matching a free-text query near a location.
    FindPlaces {
        /// What to search for (e.g. "ramen").
        query: String,
        /// Where to search (e.g. "Sudirman Jakarta").
        location: String,
        /// Maximum number of results, in [1, MAX_PLACE_LIMIT].
        limit: u8,
    },
    /// Look up a route between two free-text locations.
    GetDirections {
        origin: String,
        destination: String,
    },
}

impl Intent {
    /// The wire name of this intent kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Intent::FindPlaces { .. } => "find_places",
            Intent::GetDirections { .. } => "get_directions",
        }
    }
}
