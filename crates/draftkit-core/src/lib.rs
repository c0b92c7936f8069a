//! Draftkit Core Library
//!
//! Document segmentation, citation attribution and locked-paragraph
//! reconciliation for generated proposal sections.

pub mod citation;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod paragraph;
pub mod retrieval;
pub mod section;
pub mod segment;
pub mod tokens;
