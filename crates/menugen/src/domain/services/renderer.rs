use maud::{html, Markup, PreEscaped};

use crate::domain::models::{
    Course, CourseField, Menu, Page, PlaylistRef, Recipe, RenderDiagnostic, RenderReport,
};

use super::{CourseRegions, PageLayout};

pub const EMBED_BASE_URL: &str = "https://open.spotify.com/embed/playlist";

pub fn embed_url(playlist: &PlaylistRef) -> String {
    format!("{EMBED_BASE_URL}/{}?utm_source=generator", playlist.id())
}

pub struct Renderer {}

impl Renderer {
    /// Routes every recipe to its course region. Misses are logged, collected in the
    /// report and never stop the rest of the batch.
    pub fn render_menu<P: Page>(
        page: &mut P,
        layout: &PageLayout<P::Element>,
        menu: &Menu,
    ) -> RenderReport {
        let mut report = RenderReport::default();

        for recipe in &menu.menu {
            let Some(course) = recipe.course() else {
                tracing::warn!(course = %recipe.course, title = %recipe.title, "unknown course, recipe dropped");
                report
                    .diagnostics
                    .push(RenderDiagnostic::UnknownCourse(recipe.course.clone()));
                continue;
            };

            let Some(regions) = layout.course(course) else {
                let diagnostic = RenderDiagnostic::MissingCourse(course);
                tracing::warn!(course = %course, "{diagnostic}");
                report.diagnostics.push(diagnostic);
                continue;
            };

            Renderer::render_recipe(page, course, regions, recipe, &mut report);
            report.rendered.push(course);
        }

        report
    }

    pub fn render_playlist<P: Page>(
        page: &mut P,
        layout: &PageLayout<P::Element>,
        playlist: &PlaylistRef,
    ) {
        page.set_attribute(&layout.player, "src", &embed_url(playlist));
    }

    fn render_recipe<P: Page>(
        page: &mut P,
        course: Course,
        regions: &CourseRegions<P::Element>,
        recipe: &Recipe,
        report: &mut RenderReport,
    ) {
        for field in [
            CourseField::Title,
            CourseField::Header,
            CourseField::Img,
            CourseField::Ingredients,
            CourseField::Instructions,
            CourseField::Summary,
        ] {
            let Some(element) = regions.field(field) else {
                if field.is_expected() {
                    let diagnostic = RenderDiagnostic::MissingField(course, field);
                    tracing::warn!(course = %course, field = %field, "{diagnostic}");
                    report.diagnostics.push(diagnostic);
                } else {
                    tracing::debug!(course = %course, field = %field, "no slot on page");
                }
                continue;
            };

            match field {
                CourseField::Img => {
                    page.set_attribute(element, "src", &recipe.image);
                    page.set_attribute(element, "alt", &format!("{course} image"));
                }
                _ => page.set_inner_html(element, &field_html(field, recipe).into_string()),
            }
        }
    }
}

/// Markup for a text region. Instructions and summaries arrive as HTML from the
/// backend and are spliced in unescaped.
pub fn field_html(field: CourseField, recipe: &Recipe) -> Markup {
    match field {
        CourseField::Title => html! { (recipe.title) },
        CourseField::Header => header_html(recipe),
        CourseField::Img => html! {},
        CourseField::Ingredients => ingredients_html(recipe),
        CourseField::Instructions => html! {
            h4 { "Instructions" }
            (PreEscaped(&recipe.instructions))
        },
        CourseField::Summary => html! {
            h4 { "Summary" }
            (PreEscaped(&recipe.summary))
        },
    }
}

pub fn header_html(recipe: &Recipe) -> Markup {
    html! {
        "Course: " (recipe.course) " " br; " Servings: " (recipe.servings) " " br;
        " Ready in: " (recipe.ready_in_minutes) " minutes " br;
        " URL: " a href=(recipe.url) { (recipe.url) }
    }
}

pub fn ingredients_html(recipe: &Recipe) -> Markup {
    html! {
        h4 { "Ingredients" }
        @for (index, ingredient) in recipe.ingredients.iter().enumerate() {
            @if index > 0 { br; }
            (ingredient.line())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Ingredient;
    use crate::infrastructure::document::Document;

    fn recipe(course: &str, title: &str) -> Recipe {
        Recipe {
            course: course.to_string(),
            title: title.to_string(),
            url: format!("https://recipes.example/{title}"),
            servings: 2,
            ready_in_minutes: 30,
            image: format!("https://img.example/{title}.jpg"),
            ingredients: vec![
                Ingredient {
                    amount: 200.0,
                    unit: "g".to_string(),
                    name: "rice".to_string(),
                },
                Ingredient {
                    amount: 1.0,
                    unit: String::new(),
                    name: "lemon".to_string(),
                },
            ],
            instructions: format!("Cook the {title}."),
            summary: format!("<b>{title}</b> summary"),
        }
    }

    fn full_menu() -> Menu {
        Menu {
            menu: vec![
                recipe("starter", "bruschetta"),
                recipe("main", "risotto"),
                recipe("dessert", "panna-cotta"),
            ],
        }
    }

    #[test]
    fn test_full_menu_populates_every_region() {
        let mut document = Document::standard();
        let layout = PageLayout::resolve(&document).unwrap();

        let report = Renderer::render_menu(&mut document, &layout, &full_menu());

        assert!(report.is_clean(), "{:?}", report.diagnostics);
        assert_eq!(
            report.rendered,
            vec![Course::Starter, Course::Main, Course::Dessert]
        );

        assert_eq!(document.inner_html("main_title"), Some("risotto"));
        assert_eq!(
            document.inner_html("main_header"),
            Some("Course: main <br> Servings: 2 <br> Ready in: 30 minutes <br> URL: <a href=\"https://recipes.example/risotto\">https://recipes.example/risotto</a>")
        );
        assert_eq!(
            document.attribute("starter_img", "src"),
            Some("https://img.example/bruschetta.jpg")
        );
        assert_eq!(
            document.attribute("starter_img", "alt"),
            Some("starter image")
        );
        assert_eq!(
            document.inner_html("dessert_ingredients"),
            Some("<h4>Ingredients</h4>200 g rice<br>1 lemon")
        );
        assert_eq!(
            document.inner_html("dessert_instructions"),
            Some("<h4>Instructions</h4>Cook the panna-cotta.")
        );
        assert_eq!(
            document.inner_html("starter_summary"),
            Some("<h4>Summary</h4><b>bruschetta</b> summary")
        );
    }

    #[test]
    fn test_unknown_and_missing_courses_do_not_stop_batch() {
        let mut document = Document::standard();
        document.remove("course_dessert");
        let layout = PageLayout::resolve(&document).unwrap();

        let mut menu = full_menu();
        menu.menu.insert(0, recipe("side", "fries"));

        let report = Renderer::render_menu(&mut document, &layout, &menu);

        assert_eq!(report.rendered, vec![Course::Starter, Course::Main]);
        assert_eq!(
            report.diagnostics,
            vec![
                RenderDiagnostic::UnknownCourse("side".to_string()),
                RenderDiagnostic::MissingCourse(Course::Dessert),
            ]
        );
        assert_eq!(document.inner_html("main_title"), Some("risotto"));
    }

    #[test]
    fn test_missing_field_skips_only_that_field() {
        let mut document = Document::standard();
        document.remove("main_ingredients");
        let layout = PageLayout::resolve(&document).unwrap();

        let report = Renderer::render_menu(&mut document, &layout, &full_menu());

        assert_eq!(
            report.diagnostics,
            vec![RenderDiagnostic::MissingField(
                Course::Main,
                CourseField::Ingredients
            )]
        );
        assert_eq!(
            report.diagnostics[0].to_string(),
            "main_ingredients was not found"
        );
        assert!(document.inner_html("main_header").unwrap().contains("Servings: 2"));
        assert_eq!(
            document.attribute("main_img", "src"),
            Some("https://img.example/risotto.jpg")
        );
        assert!(document
            .inner_html("main_instructions")
            .unwrap()
            .contains("Cook the risotto."));
        assert!(document.inner_html("main_summary").unwrap().contains("summary"));
    }

    #[test]
    fn test_playlist_embed_url() {
        let mut document = Document::standard();
        let layout = PageLayout::resolve(&document).unwrap();

        Renderer::render_playlist(&mut document, &layout, &PlaylistRef::new("abc123"));

        assert_eq!(
            document.attribute("embedded_player", "src"),
            Some("https://open.spotify.com/embed/playlist/abc123?utm_source=generator")
        );
    }

    #[test]
    fn test_page_without_title_slots_renders_clean() {
        let mut document = Document::standard();
        for course in [Course::Starter, Course::Main, Course::Dessert] {
            assert!(document.remove(&course.region_id(CourseField::Title)));
        }
        let layout = PageLayout::resolve(&document).unwrap();

        let report = Renderer::render_menu(&mut document, &layout, &full_menu());

        assert!(report.is_clean(), "{:?}", report.diagnostics);
        assert_eq!(report.rendered.len(), 3);
        assert!(document
            .inner_html("dessert_header")
            .unwrap()
            .starts_with("Course: dessert"));
    }

    #[test]
    fn test_composed_text_is_escaped() {
        let mut recipe = recipe("main", "fish & chips");
        recipe.ingredients = vec![Ingredient {
            amount: 1.0,
            unit: String::new(),
            name: "<script>".to_string(),
        }];
        recipe.url = "https://recipes.example/?a=1&b=\"2\"".to_string();

        assert_eq!(
            ingredients_html(&recipe).into_string(),
            "<h4>Ingredients</h4>1 &lt;script&gt;"
        );
        assert_eq!(
            field_html(CourseField::Title, &recipe).into_string(),
            "fish &amp; chips"
        );
        assert!(header_html(&recipe)
            .into_string()
            .contains("<a href=\"https://recipes.example/?a=1&amp;b=&quot;2&quot;\">"));
        assert_eq!(
            field_html(CourseField::Summary, &recipe).into_string(),
            "<h4>Summary</h4><b>fish & chips</b> summary"
        );
    }
}
