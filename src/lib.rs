//! dochint library.
//!
//! Pre-write hook that surfaces relevant local documentation once per edit.

pub mod cli;
pub mod config;
pub mod error;
pub mod matcher;
pub mod storage;

pub use error::Error;
