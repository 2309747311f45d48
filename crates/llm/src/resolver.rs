//! Intent resolver: prompt construction and strict output validation.

use serde::Deserialize;
use std::sync::Arc;

use wayfinder_core::{
    Error, Intent, ModelBackend, Result, DEFAULT_PLACE_LIMIT, MAX_PLACE_LIMIT,
};

use crate::extract::first_json_object;

/// Fixed instruction embedding the intent grammar and a few-shot example.
const SYSTEM_PROMPT: &str = r#"You are an API planner.

Convert the user request into JSON ONLY.
Do not explain.
Do not include markdown.
Do not include text outside JSON.

Supported intents:
- find_places
- get_directions

Rules:
- For intent "find_places", you MUST include:
  - query (string)
  - location (string)
- For intent "get_directions", you MUST include:
  - origin (string)
  - destination (string)

If the user does not specify a location explicitly,
infer a reasonable city or area from the message.

Always return ALL required fields.

Example:

User: Where can I eat ramen near Sudirman Jakarta?

Response:
{
  "intent": "find_places",
  "query": "ramen",
  "location": "Sudirman Jakarta",
  "limit": 5
}"#;

/// Loosely-typed decode target for the model's JSON object.
///
/// Field presence and ranges are validated after decoding so every
/// deviation maps to a precise error kind instead of a serde message.
#[derive(Debug, Deserialize)]
struct RawIntent {
    intent: String,
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    origin: Option<String>,
    #[serde(default)]
    destination: Option<String>,
    #[serde(default)]
    limit: Option<u8>,
}

/// Resolves free-form messages into typed intents via the model backend.
pub struct IntentResolver {
    backend: Arc<dyn ModelBackend>,
}

impl IntentResolver {
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        Self { backend }
    }

    /// Classify `message` into a typed intent.
    ///
    /// Never panics on model output: every syntactically-invalid completion
    /// maps to `MalformedModelOutput`, `SchemaViolation`, or
    /// `UnsupportedIntent`.
    pub async fn resolve(&self, message: &str) -> Result<Intent> {
        let prompt = format!("{SYSTEM_PROMPT}\n\nUser: {message}");
        let completion = self.backend.generate(&prompt).await?;

        let intent = parse_intent(&completion)?;
        tracing::debug!(kind = intent.kind(), "Resolved intent");
        Ok(intent)
    }
}

/// Two-stage parse: isolate the first balanced JSON object, then decode and
/// validate it against the intent grammar.
fn parse_intent(completion: &str) -> Result<Intent> {
    let object = first_json_object(completion)
        .ok_or_else(|| Error::malformed_output("completion contains no JSON object"))?;

    let value: serde_json::Value = serde_json::from_str(object)
        .map_err(|e| Error::malformed_output(format!("extracted object does not parse: {e}")))?;

    let raw: RawIntent = serde_json::from_value(value)
        .map_err(|e| Error::schema_violation(e.to_string()))?;

    match raw.intent.as_str() {
        "find_places" => {
            let query = require_field("query", raw.query)?;
            let location = require_field("location", raw.location)?;
            let limit = raw.limit.unwrap_or(DEFAULT_PLACE_LIMIT);
            if !(1..=MAX_PLACE_LIMIT).contains(&limit) {
                return Err(Error::schema_violation(format!(
                    "limit must be within 1..={MAX_PLACE_LIMIT}, got {limit}"
                )));
            }
            Ok(Intent::FindPlaces {
                query,
                location,
                limit,
            })
        }
        "get_directions" => {
            let origin = require_field("origin", raw.origin)?;
            let destination = require_field("destination", raw.destination)?;
            Ok(Intent::GetDirections {
                origin,
                destination,
            })
        }
        other => Err(Error::unsupported_intent(other)),
    }
}

fn require_field(name: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::schema_violation(format!(
            "missing required field '{name}'"
        ))),
    }
}
