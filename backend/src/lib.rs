//! HTTP front end of the renewable adoption predictor.

pub mod config;
pub mod inference;
pub mod models;
pub mod render;
pub mod routes;

pub use config::ServerConfig;
pub use inference::ModelState;
