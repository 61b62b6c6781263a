use std::collections::{HashMap, HashSet};

use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct MenuFixture {
    menus: HashMap<String, Vec<Value>>,
    playlists: HashMap<String, String>,
    default_playlist: String,
    unavailable: HashSet<String>,
}

impl Default for MenuFixture {
    fn default() -> Self {
        Self::create_test_fixture()
    }
}

impl MenuFixture {
    pub fn new() -> Self {
        Self {
            menus: HashMap::new(),
            playlists: HashMap::new(),
            default_playlist: "37i9dQZF1DXbITWG1ZJKYt".to_string(),
            unavailable: HashSet::new(),
        }
    }

    pub fn create_test_fixture() -> Self {
        let mut fixture = Self::new();
        fixture.add_playlist("Italian", "37i9dQZF1DX2sUQwD7tbmL");
        fixture.add_playlist("Mexican", "37i9dQZF1DX10zKzsJ2jva");
        fixture
    }

    pub fn add_menu(&mut self, cuisine: &str, recipes: Vec<Value>) {
        self.menus.insert(cuisine.to_lowercase(), recipes);
    }

    pub fn add_playlist(&mut self, theme: &str, id: &str) {
        self.playlists.insert(theme.to_lowercase(), id.to_string());
    }

    /// Recipe requests for this cuisine answer 503.
    pub fn mark_unavailable(&mut self, cuisine: &str) {
        self.unavailable.insert(cuisine.to_lowercase());
    }

    pub fn is_unavailable(&self, cuisine: &str) -> bool {
        self.unavailable.contains(&cuisine.to_lowercase())
    }

    /// Configured recipes for the cuisine, or a generated three-course menu.
    pub fn menu_for(&self, cuisine: &str) -> Vec<Value> {
        if let Some(recipes) = self.menus.get(&cuisine.to_lowercase()) {
            return recipes.clone();
        }

        ["starter", "main", "dessert"]
            .iter()
            .enumerate()
            .map(|(index, course)| generated_recipe(cuisine, course, index))
            .collect()
    }

    pub fn playlist_for(&self, theme: &str) -> String {
        self.playlists
            .get(&theme.to_lowercase())
            .cloned()
            .unwrap_or_else(|| self.default_playlist.clone())
    }
}

fn generated_recipe(cuisine: &str, course: &str, index: usize) -> Value {
    let slug = format!("{}-{course}", cuisine.to_lowercase().replace(' ', "-"));
    json!({
        "course": course,
        "title": format!("{cuisine} {course}"),
        "url": format!("https://recipes.example/{slug}"),
        "servings": 2 + index * 2,
        "readyInMinutes": 15 + index * 20,
        "image": format!("https://img.example/{slug}.jpg"),
        "ingredients": [
            {"amount": 1.5, "unit": "cups", "name": "stock"},
            {"amount": 2, "unit": "", "name": "shallots"}
        ],
        "instructions": format!("<ol><li>Prepare the {course}.</li></ol>"),
        "summary": format!("A {cuisine} {course} for the generator."),
    })
}
