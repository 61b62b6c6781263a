//! Mock generator backend for exercising menugen without the real services.
//!
//! Serves the recipes and playlists resources from an in-memory fixture so the CLI and
//! the HTTP client can be run end to end, deterministically and offline.

pub mod fixtures;
pub mod handlers;
pub mod server;

pub use fixtures::MenuFixture;
pub use server::MockServer;
