//! Output module for crawl records
//!
//! This module handles appending discovered links and extracted page
//! content to per-run destinations. Every append opens, writes, and closes
//! its destination, so an interrupted run keeps everything written before
//! the interruption.

mod jsonl;
mod traits;

pub use jsonl::JsonlSink;
pub use traits::{validate_run_key, OutputError, OutputResult, OutputSink};
