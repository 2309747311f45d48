use serde::{Deserialize, Serialize};

use super::geo::{Place, Route};

/// Canonical result envelope returned to callers.
///
/// Serializes with an `intent` tag so the HTTP layer can hand it to clients
/// unchanged. Cached by the orchestration driver, so it must stay cheap to
/// clone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum ResultEnvelope {
    FindPlaces {
        summary: String,
        places: Vec<Place>,
    },
    GetDirections {
        summary: String,
        route: Route,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_with_intent_tag() {
        let envelope = ResultEnvelope::FindPlaces {
            summary: "Ramen places near Sudirman Jakarta".to_string(),
            places: Vec::new(),
        };

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["intent"], "find_places");
        assert!(json["places"].as_array().unwrap().is_empty());
    }

    #[test]
    fn directions_envelope_round_trips() {
        let envelope = ResultEnvelope::GetDirections {
            summary: "Directions from Monas to Sudirman".to_string(),
            route: Route {
                distance_meters: 3200.0,
                duration_seconds: 540.0,
                geometry: serde_json::json!({"type": "LineString", "coordinates": []}),
            },
        };

        let json = serde_json::to_string(&envelope).unwrap();
        let back: ResultEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(back, envelope);
    }
}
