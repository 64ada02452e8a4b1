//! Media module for resolved item representation.

pub mod item;

pub use item::{MediaType, Resolution, ResolvedUrl};
