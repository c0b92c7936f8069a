//! CLI commands for draftkit

pub mod chunk;
pub mod cite;
pub mod dispatch;
pub mod helpers;
pub mod hits;
pub mod lock;
pub mod merge;
pub mod words;
