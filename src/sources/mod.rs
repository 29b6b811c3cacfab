//! Snapshot acquisition: downloading, caching, and deserializing the two
//! upstream JSON documents the analysis is built from.

mod cache;
mod client;

pub mod classifiers;
pub mod summaries;

pub use cache::Cache;
pub use classifiers::ClassifiersDoc;
pub use client::Fetcher;
pub use summaries::PluginSummary;
