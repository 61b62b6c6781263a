//! Controller for the cuisine-themed menu and playlist generator page.
//!
//! The crate reads a selected cuisine from a page, fetches a menu and a themed playlist
//! from the generator backend, and renders both into the page's regions. Pages are
//! abstracted behind the [`Page`] trait so the same controller can drive a browser DOM
//! binding, a terminal front end, or the in-memory [`Document`] used by the CLI and tests.

pub mod configuration;
pub mod domain;
pub mod errors;
pub mod infrastructure;

pub use configuration::{Config, ConfigKey};
pub use domain::models::{
    Action, Course, CourseField, Cuisine, Event, FetchStrategy, Ingredient, InvocationId, Menu,
    MenuClient, Outcome, Page, Phase, PlaylistRef, Recipe, RenderDiagnostic,
    RenderReport, CUISINES, DEFAULT_PLACEHOLDER, SELECT_NOTICE,
};
pub use domain::services::{
    embed_url, ActionsService, Generator, PageLayout, Renderer, EMBEDDED_PLAYER,
    GENERATED_CONTENT, GENERATOR_BUTTON, RETRY_NOTICE, SEARCH_GENERATOR,
};
pub use errors::MenuError;
pub use infrastructure::clients::{HttpMenuClient, MenuClientManager};
pub use infrastructure::document::{Document, Element, ElementId};
