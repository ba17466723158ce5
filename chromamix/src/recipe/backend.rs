//! Recipe backend seam
//!
//! A backend turns a target hex color into the raw JSON text of a recipe.
//! It knows nothing about caching, demo mode or decoding; those live in
//! [`super::RecipeService`].

use async_trait::async_trait;
use chromamix_common::Pigment;
use serde_json::{json, Value};
use thiserror::Error;

/// Failure reported by a backend before classification
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// Request never produced an HTTP response
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with an error status or error payload
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response envelope could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Response carried no recipe text (e.g. blocked or empty candidates)
    #[error("Empty response: {0}")]
    Empty(String),
}

impl BackendError {
    /// Whether this failure means the credential was rejected
    ///
    /// Matches HTTP 401/403 and the backend's `PERMISSION_DENIED` /
    /// `API key not valid` signals, which it also sends with status 400.
    pub fn is_authorization_denied(&self) -> bool {
        match self {
            BackendError::Api { status, message } => {
                *status == 401
                    || *status == 403
                    || message.contains("PERMISSION_DENIED")
                    || message.contains("API key not valid")
            }
            _ => false,
        }
    }
}

/// Something that can generate a mixing recipe for a color
#[async_trait]
pub trait RecipeBackend: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Ask for a recipe approximating `target_hex`
    ///
    /// Returns the backend's raw JSON text, expected to be an array of
    /// `{colorName, colorHex, parts}` objects. Exactly one request per call.
    async fn generate_recipe(&self, target_hex: &str) -> Result<String, BackendError>;
}

/// Instructions sent with every request
///
/// Restricts the answer to the five pigments and integer proportions.
pub fn recipe_prompt(target_hex: &str) -> String {
    let pigments = Pigment::ALL
        .iter()
        .map(|p| format!("{}: {}", p.name(), p.hex()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are an art teacher who specializes in color theory. \
         Write a paint-mixing recipe a beginner can follow to mix the color {target_hex}. \
         The painter only has these paints: {pigments}. \
         Answer with a list of the paints to use and how many parts of each, as whole numbers. \
         For example, an orange could be 2 parts Yellow and 1 part Red; \
         a dark green could be 3 parts Yellow, 2 parts Blue and 1 part Black. \
         Be as precise as you can with the proportions so the mix comes close to {target_hex}. \
         Respond with the JSON array only."
    )
}

/// Response schema enforced on the backend's JSON output
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "colorName": {
                    "type": "STRING",
                    "description": "Name of the base paint to mix (e.g. 'Yellow', 'Red', 'White')."
                },
                "colorHex": {
                    "type": "STRING",
                    "description": "Hex code of the base paint (e.g. '#FFFF00')."
                },
                "parts": {
                    "type": "INTEGER",
                    "description": "How many parts of this paint go into the mix."
                }
            },
            "required": ["colorName", "colorHex", "parts"]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_signals() {
        let forbidden = BackendError::Api {
            status: 403,
            message: "PERMISSION_DENIED: caller lacks permission".to_string(),
        };
        assert!(forbidden.is_authorization_denied());

        let bad_key = BackendError::Api {
            status: 400,
            message: "INVALID_ARGUMENT: API key not valid. Please pass a valid API key.".to_string(),
        };
        assert!(bad_key.is_authorization_denied());

        let unauthorized = BackendError::Api {
            status: 401,
            message: "UNAUTHENTICATED".to_string(),
        };
        assert!(unauthorized.is_authorization_denied());
    }

    #[test]
    fn test_other_failures_are_not_authorization() {
        let overloaded = BackendError::Api {
            status: 503,
            message: "UNAVAILABLE: model overloaded".to_string(),
        };
        assert!(!overloaded.is_authorization_denied());
        assert!(!BackendError::Network("connection refused".to_string()).is_authorization_denied());
        // the phrase only counts when the backend itself reports it
        assert!(!BackendError::Parse("API key not valid".to_string()).is_authorization_denied());
    }

    #[test]
    fn test_prompt_names_target_and_all_pigments() {
        let prompt = recipe_prompt("#FF5733");
        assert!(prompt.contains("#FF5733"));
        for pigment in Pigment::ALL {
            assert!(prompt.contains(pigment.name()));
            assert!(prompt.contains(pigment.hex()));
        }
    }

    #[test]
    fn test_schema_requires_step_fields() {
        let schema = response_schema();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(
            schema["items"]["required"],
            json!(["colorName", "colorHex", "parts"])
        );
        assert_eq!(schema["items"]["properties"]["parts"]["type"], "INTEGER");
    }
}
