/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Signup, login, logout and current user
/// - `projects`: Project CRUD with the nested aggregate
/// - `tasks`: Tasks within a project
/// - `notes`: Notes within a project

pub mod auth;
pub mod health;
pub mod notes;
pub mod projects;
pub mod tasks;
