use std::fmt;

use crate::errors::MenuError;

/// Value the cuisine control shows before the user picks anything.
pub const DEFAULT_PLACEHOLDER: &str = "Open to select cuisine";

/// Notice shown when the generator is triggered without a cuisine.
pub const SELECT_NOTICE: &str = "Please select a category.";

/// Cuisines offered by the standard generator page.
pub const CUISINES: &[&str] = &[
    "African",
    "American",
    "British",
    "Cajun",
    "Caribbean",
    "Chinese",
    "Eastern European",
    "European",
    "French",
    "German",
    "Greek",
    "Indian",
    "Irish",
    "Italian",
    "Japanese",
    "Jewish",
    "Korean",
    "Latin American",
    "Mediterranean",
    "Mexican",
    "Middle Eastern",
    "Nordic",
    "Southern",
    "Spanish",
    "Thai",
    "Vietnamese",
];

/// A validated cuisine selection. Never empty and never the placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cuisine(String);

impl Cuisine {
    pub fn parse(raw: &str, placeholder: &str) -> Result<Cuisine, MenuError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(MenuError::Validation("no cuisine selected".to_string()));
        }
        if value == placeholder.trim() {
            return Err(MenuError::Validation(format!(
                "placeholder '{value}' is not a cuisine"
            )));
        }

        Ok(Cuisine(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
