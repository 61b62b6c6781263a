//! Infrastructure layer providing external integrations.
//!
//! This module contains the HTTP client for the generator backend and the in-memory
//! page used by the command-line front end and the tests.

pub mod clients;
pub mod document;
