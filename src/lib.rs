pub mod aggregation;
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod insight;
pub mod llm;
pub mod models;
pub mod repositories;
pub mod services;

pub use config::Config;
pub use db::connect;
pub use error::{AppError, Result};
