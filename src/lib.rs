pub mod app;
pub mod config;
pub mod db;
pub mod errors;
pub mod http;
pub mod models;
pub mod report;
pub mod store;
pub mod utils;
pub mod workflows;

pub use app::{run, Backend, Utility};
pub use errors::AppError;
