//! Core business logic module
//!
//! This module contains the domain models, the API client, persisted state and
//! the controller that drives the search/download page.

pub mod api;
pub mod config;
pub mod controller;
pub mod file_sink;
pub mod generation;
pub mod models;
pub mod page;
pub mod runtime;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod api_test;

#[cfg(test)]
mod config_test;



// Re-export commonly used types
pub use self::config::AppConfig;
pub use self::controller::Controller;
