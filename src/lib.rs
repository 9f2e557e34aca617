pub mod config;
pub mod curl;
pub mod error;
pub mod http;
pub mod json;
pub mod logger;
pub mod output;
pub mod runner;
pub mod template;
pub mod utils;

// Re-export commonly used types
pub use curl::{RequestDescriptor, parse_curl};
pub use error::{RecipeError, Result};
