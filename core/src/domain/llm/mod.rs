pub mod payload;
pub mod ports;
pub mod prompts;
pub mod sanitizer;
pub mod schema;
pub mod services;

pub use ports::*;
pub use sanitizer::sanitize;
