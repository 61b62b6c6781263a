use std::collections::{BTreeMap, HashMap};

use htmlescape::encode_minimal;
use maud::{html, PreEscaped, DOCTYPE};
use serde::{Serialize, Serializer};
use strum::IntoEnumIterator;

use crate::domain::models::{Course, CourseField, Page, CUISINES, DEFAULT_PLACEHOLDER};
use crate::domain::services::{
    EMBEDDED_PLAYER, GENERATED_CONTENT, GENERATOR_BUTTON, SEARCH_GENERATOR,
};

const VOID_TAGS: &[&str] = &["br", "img", "input", "hr"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ElementId(usize);

#[derive(Debug, Clone, Serialize)]
pub struct Element {
    pub id: String,
    pub tag: String,
    #[serde(skip)]
    pub parent: Option<ElementId>,
    pub inner_html: String,
    pub attributes: BTreeMap<String, String>,
    pub visible: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip)]
    detached: bool,
}

/// In-memory page: a flat element arena with parent links, indexed by id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    title: String,
    #[serde(serialize_with = "attached_only")]
    elements: Vec<Element>,
    #[serde(skip)]
    index: HashMap<String, ElementId>,
    alerts: Vec<String>,
}

// Arena indices shift once detached elements are skipped, so parents are written by id.
#[derive(Serialize)]
struct ElementView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<&'a str>,
    #[serde(flatten)]
    element: &'a Element,
}

fn attached_only<S: Serializer>(elements: &[Element], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(
        elements
            .iter()
            .filter(|element| !element.detached)
            .map(|element| ElementView {
                parent: element
                    .parent
                    .map(|parent| elements[parent.0].id.as_str())
                    .filter(|id| !id.is_empty()),
                element,
            }),
    )
}

impl Document {
    pub fn new(title: &str) -> Self {
        Document {
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// The generator page: cuisine selector, trigger, and a hidden result container
    /// holding one region per course plus the embedded player.
    pub fn standard() -> Self {
        let mut document = Document::new("Menu & Playlist Generator");

        let search = document.append(None, "div", SEARCH_GENERATOR);
        let options = std::iter::once(DEFAULT_PLACEHOLDER)
            .chain(CUISINES.iter().copied())
            .map(String::from)
            .collect();
        document.append_select(Some(search), options);

        let button = document.append(None, "button", GENERATOR_BUTTON);
        document.set_inner_html(&button, "Enter");

        let content = document.append(None, "div", GENERATED_CONTENT);
        document.set_visible(&content, false);

        for course in Course::iter() {
            let container = document.append(Some(content), "div", &course.container_id());
            for field in CourseField::iter() {
                let tag = match field {
                    CourseField::Title => "h3",
                    CourseField::Header => "p",
                    CourseField::Img => "img",
                    _ => "div",
                };
                document.append(Some(container), tag, &course.region_id(field));
            }
        }

        document.append(Some(content), "iframe", EMBEDDED_PLAYER);
        document
    }

    pub fn append(&mut self, parent: Option<ElementId>, tag: &str, id: &str) -> ElementId {
        let element_id = ElementId(self.elements.len());
        self.elements.push(Element {
            id: id.to_string(),
            tag: tag.to_string(),
            parent,
            inner_html: String::new(),
            attributes: BTreeMap::new(),
            visible: true,
            options: Vec::new(),
            value: None,
            detached: false,
        });
        if !id.is_empty() {
            self.index.insert(id.to_string(), element_id);
        }
        element_id
    }

    /// Appends an anonymous single-choice control; the first option starts selected.
    pub fn append_select(&mut self, parent: Option<ElementId>, options: Vec<String>) -> ElementId {
        let element_id = self.append(parent, "select", "");
        let element = &mut self.elements[element_id.0];
        element.value = Some(options.first().cloned().unwrap_or_default());
        element.options = options;
        element_id
    }

    /// Selects `value` in the cuisine control. Like a DOM select, an unknown value
    /// leaves the control empty. Returns whether an option matched.
    pub fn choose(&mut self, value: &str) -> bool {
        let Some(search) = self.element_by_id(SEARCH_GENERATOR) else {
            return false;
        };
        let Some(select) = self.select_in(&search) else {
            return false;
        };

        let element = &mut self.elements[select.0];
        let matched = element
            .options
            .iter()
            .find(|option| option.eq_ignore_ascii_case(value.trim()))
            .cloned();
        element.value = Some(matched.clone().unwrap_or_default());
        matched.is_some()
    }

    pub fn options(&self) -> Vec<String> {
        self.element_by_id(SEARCH_GENERATOR)
            .and_then(|search| self.select_in(&search))
            .map(|select| self.elements[select.0].options.clone())
            .unwrap_or_default()
    }

    /// Detaches an element and everything beneath it.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.index.get(id).copied() {
            Some(element_id) => {
                self.remove_element(element_id);
                true
            }
            None => false,
        }
    }

    pub fn remove_element(&mut self, element_id: ElementId) {
        let mut pending = vec![element_id];
        while let Some(current) = pending.pop() {
            pending.extend(self.children(current));
            if let Some(element) = self.elements.get_mut(current.0) {
                element.detached = true;
                if !element.id.is_empty() {
                    self.index.remove(&element.id);
                }
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.index.get(id).map(|element_id| &self.elements[element_id.0])
    }

    pub fn inner_html(&self, id: &str) -> Option<&str> {
        self.get(id).map(|element| element.inner_html.as_str())
    }

    pub fn attribute(&self, id: &str, name: &str) -> Option<&str> {
        self.get(id)
            .and_then(|element| element.attributes.get(name))
            .map(String::as_str)
    }

    pub fn is_shown(&self, id: &str) -> Option<bool> {
        self.get(id).map(|element| element.visible)
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    fn children(&self, parent: ElementId) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| !element.detached && element.parent == Some(parent))
            .map(|(index, _)| ElementId(index))
            .collect()
    }

    /// Renders the attached tree as a standalone HTML page.
    pub fn to_html(&self) -> String {
        let mut body = String::new();
        let roots = self
            .elements
            .iter()
            .enumerate()
            .filter(|(_, element)| !element.detached && element.parent.is_none())
            .map(|(index, _)| ElementId(index))
            .collect::<Vec<ElementId>>();
        for root in roots {
            self.write_element(&mut body, root, 0);
        }

        html! {
            (DOCTYPE)
            html {
                head { title { (self.title) } }
                body { (PreEscaped(body)) }
            }
        }
        .into_string()
    }

    // Tags and attribute names are only known at runtime, so elements are written
    // directly with escaped values rather than through the html! macro.
    fn write_element(&self, out: &mut String, element_id: ElementId, depth: usize) {
        let element = &self.elements[element_id.0];
        let indent = "  ".repeat(depth);

        out.push_str(&format!("\n{indent}<{}", element.tag));
        if !element.id.is_empty() {
            out.push_str(&format!(" id=\"{}\"", encode_minimal(&element.id)));
        }
        for (name, value) in &element.attributes {
            out.push_str(&format!(" {name}=\"{}\"", encode_minimal(value)));
        }
        if !element.visible {
            out.push_str(" style=\"display:none\"");
        }
        out.push('>');

        if VOID_TAGS.contains(&element.tag.as_str()) {
            return;
        }

        let children = self.children(element_id);
        if element.options.is_empty() && children.is_empty() {
            out.push_str(&format!("{}</{}>", element.inner_html, element.tag));
            return;
        }

        let selected = element.value.as_deref().unwrap_or_default();
        for option in &element.options {
            let option_html = html! {
                option selected[option == selected] { (option) }
            };
            out.push_str(&format!("\n{indent}  {}", option_html.into_string()));
        }
        if !element.inner_html.is_empty() {
            out.push_str(&format!("\n{indent}  {}", element.inner_html));
        }
        for child in children {
            self.write_element(out, child, depth + 1);
        }
        out.push_str(&format!("\n{indent}</{}>", element.tag));
    }
}

impl Page for Document {
    type Element = ElementId;

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.index.get(id).copied()
    }

    fn select_in(&self, container: &ElementId) -> Option<ElementId> {
        let mut pending = self.children(*container);
        pending.reverse();
        while let Some(current) = pending.pop() {
            if self.elements[current.0].tag == "select" {
                return Some(current);
            }
            let mut children = self.children(current);
            children.reverse();
            pending.extend(children);
        }
        None
    }

    fn value(&self, control: &ElementId) -> String {
        self.elements
            .get(control.0)
            .and_then(|element| element.value.clone())
            .unwrap_or_default()
    }

    fn set_inner_html(&mut self, element: &ElementId, html: &str) {
        if let Some(element) = self.elements.get_mut(element.0) {
            element.inner_html = html.to_string();
        }
    }

    fn set_attribute(&mut self, element: &ElementId, name: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(element.0) {
            element
                .attributes
                .insert(name.to_string(), value.to_string());
        }
    }

    fn is_visible(&self, element: &ElementId) -> bool {
        self.elements
            .get(element.0)
            .map(|element| element.visible)
            .unwrap_or(false)
    }

    fn set_visible(&mut self, element: &ElementId, visible: bool) {
        if let Some(element) = self.elements.get_mut(element.0) {
            element.visible = visible;
        }
    }

    fn alert(&mut self, message: &str) {
        tracing::info!(notice = message, "alert");
        self.alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_page_starts_hidden_with_placeholder() {
        let document = Document::standard();
        let search = document.element_by_id(SEARCH_GENERATOR).unwrap();
        let select = document.select_in(&search).unwrap();

        assert_eq!(document.value(&select), DEFAULT_PLACEHOLDER);
        assert_eq!(document.is_shown(GENERATED_CONTENT), Some(false));
        assert_eq!(document.inner_html(GENERATOR_BUTTON), Some("Enter"));
        assert!(document.get("main_img").is_some());
    }

    #[test]
    fn test_choose_behaves_like_a_select() {
        let mut document = Document::standard();
        let search = document.element_by_id(SEARCH_GENERATOR).unwrap();
        let select = document.select_in(&search).unwrap();

        assert!(document.choose("italian"));
        assert_eq!(document.value(&select), "Italian");

        assert!(!document.choose("Atlantean"));
        assert_eq!(document.value(&select), "");
    }

    #[test]
    fn test_remove_detaches_subtree() {
        let mut document = Document::standard();
        assert!(document.remove("course_starter"));

        assert!(document.element_by_id("course_starter").is_none());
        assert!(document.element_by_id("starter_header").is_none());
        assert!(document.element_by_id("main_header").is_some());
        assert!(!document.remove("course_starter"));
        assert!(!document.to_html().contains("starter_header"));
    }

    #[test]
    fn test_html_output() {
        let mut document = Document::standard();
        document.choose("Nordic");
        let img = document.element_by_id("dessert_img").unwrap();
        document.set_attribute(&img, "src", "https://img.example/a.jpg?x=1&y=2");

        let html = document.to_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Menu &amp; Playlist Generator</title>"));
        assert!(html.contains("<div id=\"generated_content\" style=\"display:none\">"));
        assert!(html.contains("<option selected>Nordic</option>"));
        assert!(html
            .contains("<img id=\"dessert_img\" src=\"https://img.example/a.jpg?x=1&amp;y=2\">"));
        assert!(html.contains("<iframe id=\"embedded_player\"></iframe>"));
    }

    #[test]
    fn test_json_snapshot_skips_detached() {
        let mut document = Document::standard();
        document.remove("course_main");
        document.alert("hello");

        let value = serde_json::to_value(&document).unwrap();
        let ids = value["elements"]
            .as_array()
            .unwrap()
            .iter()
            .map(|element| element["id"].as_str().unwrap().to_string())
            .collect::<Vec<String>>();

        assert!(ids.contains(&"starter_title".to_string()));
        assert!(!ids.iter().any(|id| id.starts_with("main_")));
        assert_eq!(value["alerts"][0], "hello");
    }

    #[test]
    fn test_json_parents_are_ids_after_removal() {
        let mut document = Document::standard();
        document.remove("course_starter");

        let value = serde_json::to_value(&document).unwrap();
        let elements = value["elements"].as_array().unwrap();
        let parent_of = |id: &str| {
            elements
                .iter()
                .find(|element| element["id"] == id)
                .map(|element| element["parent"].clone())
                .unwrap()
        };

        assert_eq!(parent_of("dessert_img"), "course_dessert");
        assert_eq!(parent_of("course_main"), GENERATED_CONTENT);
        assert_eq!(parent_of(EMBEDDED_PLAYER), GENERATED_CONTENT);
        assert!(parent_of(SEARCH_GENERATOR).is_null());
    }
}
