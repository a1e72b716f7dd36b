//! HTTP inbound adapter exposing the JSON API and public page rendering.

pub mod auth;
pub mod cache_control;
pub mod domains;
pub mod error;
pub mod health;
pub mod pages;
pub mod public;
pub mod render;
pub mod routes;
pub mod session;
pub mod session_config;
pub mod sessions;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
