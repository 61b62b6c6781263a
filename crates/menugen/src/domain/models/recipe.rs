use serde::{Deserialize, Deserializer, Serialize};

use super::Course;

/// Body of the recipes resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub menu: Vec<Recipe>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Raw course identifier; routed through [`Course::parse`] at render time.
    pub course: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub servings: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ready_in_minutes: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instructions: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
}

impl Recipe {
    pub fn course(&self) -> Option<Course> {
        Course::parse(&self.course)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
    pub name: String,
}

impl Ingredient {
    /// Quantity, unit and name as one readable line. Empty parts are left out.
    pub fn line(&self) -> String {
        let amount = format_amount(self.amount);
        [amount.as_str(), self.unit.trim(), self.name.trim()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<&str>>()
            .join(" ")
    }
}

fn format_amount(amount: f64) -> String {
    if !amount.is_finite() || amount <= 0.0 {
        return String::new();
    }
    let rounded = (amount * 100.0).round() / 100.0;
    format!("{rounded}")
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
