pub mod collector;
pub mod config;
pub mod dates;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod pipeline;
pub mod selectors;
pub mod sink;
pub mod types;
