use std::collections::HashMap;

use strum::IntoEnumIterator;

use crate::domain::models::{Course, CourseField, Page};
use crate::errors::MenuError;

pub const SEARCH_GENERATOR: &str = "search_generator";
pub const GENERATOR_BUTTON: &str = "generator_btn";
pub const GENERATED_CONTENT: &str = "generated_content";
pub const EMBEDDED_PLAYER: &str = "embedded_player";

/// Handles for one course container and its optional sub-regions.
#[derive(Debug, Clone)]
pub struct CourseRegions<E> {
    pub container: E,
    fields: HashMap<CourseField, E>,
}

impl<E> CourseRegions<E> {
    pub fn field(&self, field: CourseField) -> Option<&E> {
        self.fields.get(&field)
    }
}

/// Every region the generator touches, resolved once against a page.
///
/// The selector control, trigger, result container and player are required; course
/// containers and their sub-regions are optional and reported when rendering.
#[derive(Debug, Clone)]
pub struct PageLayout<E> {
    pub selector: E,
    pub trigger: E,
    pub content: E,
    pub player: E,
    courses: HashMap<Course, CourseRegions<E>>,
}

impl<E: Clone> PageLayout<E> {
    pub fn resolve<P>(page: &P) -> Result<Self, MenuError>
    where
        P: Page<Element = E>,
    {
        let required = |id: &str| {
            page.element_by_id(id)
                .ok_or_else(|| MenuError::MissingRegion(id.to_string()))
        };

        let search = required(SEARCH_GENERATOR)?;
        let selector = page
            .select_in(&search)
            .ok_or_else(|| MenuError::MissingRegion(format!("{SEARCH_GENERATOR} select")))?;
        let trigger = required(GENERATOR_BUTTON)?;
        let content = required(GENERATED_CONTENT)?;
        let player = required(EMBEDDED_PLAYER)?;

        let mut courses = HashMap::new();
        for course in Course::iter() {
            let Some(container) = page.element_by_id(&course.container_id()) else {
                tracing::debug!(course = %course, "course container not on page");
                continue;
            };

            let fields = CourseField::iter()
                .filter_map(|field| {
                    page.element_by_id(&course.region_id(field))
                        .map(|element| (field, element))
                })
                .collect();

            courses.insert(course, CourseRegions { container, fields });
        }

        Ok(PageLayout {
            selector,
            trigger,
            content,
            player,
            courses,
        })
    }

    pub fn course(&self, course: Course) -> Option<&CourseRegions<E>> {
        self.courses.get(&course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::document::Document;

    #[test]
    fn test_resolves_standard_page() {
        let document = Document::standard();
        let layout = PageLayout::resolve(&document).unwrap();

        for course in Course::iter() {
            let regions = layout.course(course).unwrap();
            for field in CourseField::iter() {
                assert!(regions.field(field).is_some(), "{course} {field}");
            }
        }
    }

    #[test]
    fn test_missing_required_region_is_an_error() {
        let mut document = Document::standard();
        document.remove(EMBEDDED_PLAYER);

        let err = PageLayout::resolve(&document).unwrap_err();
        assert_eq!(err, MenuError::MissingRegion(EMBEDDED_PLAYER.to_string()));
    }

    #[test]
    fn test_missing_select_is_an_error() {
        let mut document = Document::standard();
        let search = document.element_by_id(SEARCH_GENERATOR).unwrap();
        let select = document.select_in(&search).unwrap();
        document.remove_element(select);

        assert!(matches!(
            PageLayout::resolve(&document),
            Err(MenuError::MissingRegion(_))
        ));
    }

    #[test]
    fn test_optional_regions_are_recorded_as_absent() {
        let mut document = Document::standard();
        document.remove("course_dessert");
        document.remove("main_summary");

        let layout = PageLayout::resolve(&document).unwrap();
        assert!(layout.course(Course::Dessert).is_none());
        let main = layout.course(Course::Main).unwrap();
        assert!(main.field(CourseField::Summary).is_none());
        assert!(main.field(CourseField::Header).is_some());
    }
}
