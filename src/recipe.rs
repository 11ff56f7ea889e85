use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Servings fall back to this when the user leaves the prompt blank and
/// when a stored record is missing the field.
pub const DEFAULT_SERVINGS: &str = "1";

/// A single recipe record.
///
/// The name is not part of the record; it is the key the store files the
/// record under. Both lists keep their insertion order — for
/// `instructions` that order is the cooking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Free-form user text, not guaranteed numeric ("2", "4-6", ...).
    pub servings: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl Recipe {
    pub fn new(
        servings: impl Into<String>,
        ingredients: Vec<String>,
        instructions: Vec<String>,
    ) -> Self {
        Self {
            servings: servings.into(),
            ingredients,
            instructions,
        }
    }

    /// Validate one stored record into the fixed shape.
    ///
    /// The file is user-editable, so records are not trusted to have the
    /// right shape. Missing fields are repaired (`servings` to
    /// [`DEFAULT_SERVINGS`], the lists to empty); a field of the wrong
    /// JSON type rejects the whole record.
    pub fn from_stored(value: Value) -> Option<Recipe> {
        #[derive(Deserialize)]
        struct Stored {
            servings: Option<String>,
            ingredients: Option<Vec<String>>,
            instructions: Option<Vec<String>>,
        }

        let stored: Stored = serde_json::from_value(value).ok()?;
        Some(Recipe {
            servings: stored
                .servings
                .unwrap_or_else(|| DEFAULT_SERVINGS.to_string()),
            ingredients: stored.ingredients.unwrap_or_default(),
            instructions: stored.instructions.unwrap_or_default(),
        })
    }
}
