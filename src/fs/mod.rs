//! Filesystem module.
//!
//! Provides:
//! - Destination directory layout
//! - Filename derivation from URLs

pub mod naming;
pub mod paths;

pub use naming::{file_name_for_url, sanitize_filename, url_basename, url_extension};
pub use paths::{ensure_dir, get_download_path};
