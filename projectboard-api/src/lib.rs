//! # Project Board API Server Library
//!
//! HTTP surface of the project board: cookie-session authentication and
//! project, task and note endpoints over the shared board operations.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
