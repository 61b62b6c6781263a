use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, EnumVariantNames};

/// Closed set of menu courses. Each one owns exactly one region on the page.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumVariantNames,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Course {
    Starter,
    Main,
    Dessert,
}

impl Course {
    pub fn parse(s: &str) -> Option<Course> {
        Course::from_str(s.trim()).ok()
    }

    pub fn container_id(&self) -> String {
        format!("course_{self}")
    }

    pub fn region_id(&self, field: CourseField) -> String {
        format!("{self}_{field}")
    }
}

/// Sub-regions of a course container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum CourseField {
    /// Extra slot for the recipe title. Pages without it are still complete.
    Title,
    Header,
    Img,
    Ingredients,
    Instructions,
    Summary,
}

impl CourseField {
    /// Whether a page missing this region should be reported.
    pub fn is_expected(&self) -> bool {
        !matches!(self, CourseField::Title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Course::parse("starter"), Some(Course::Starter));
        assert_eq!(Course::parse(" Main "), Some(Course::Main));
        assert_eq!(Course::parse("DESSERT"), Some(Course::Dessert));
        assert_eq!(Course::parse("side"), None);
        assert_eq!(Course::parse(""), None);
    }

    #[test]
    fn test_region_ids_follow_page_naming() {
        assert_eq!(Course::Main.container_id(), "course_main");
        assert_eq!(Course::Dessert.region_id(CourseField::Img), "dessert_img");
        assert_eq!(
            Course::Starter.region_id(CourseField::Ingredients),
            "starter_ingredients"
        );
        assert_eq!(Course::iter().count(), 3);
    }

    #[test]
    fn test_title_is_the_only_unexpected_field() {
        let unexpected = CourseField::iter()
            .filter(|field| !field.is_expected())
            .collect::<Vec<CourseField>>();
        assert_eq!(unexpected, vec![CourseField::Title]);
    }
}
