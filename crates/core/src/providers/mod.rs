pub mod traits;

// Feed source implementations
pub mod file;
pub mod http;
