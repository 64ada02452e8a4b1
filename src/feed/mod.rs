//! Post discovery.

pub mod paginator;

pub use paginator::{discover, PostUrls};
