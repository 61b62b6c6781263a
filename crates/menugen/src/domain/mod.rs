//! Core domain logic for the generator page.
//!
//! This module holds the data models that flow through an invocation and the services that
//! validate, fetch and render them, independent of any concrete page or HTTP backend.

pub mod models;
pub mod services;
