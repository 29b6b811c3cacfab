#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for plugin-pulse
//!
//! This library consolidates all functionality for the plugin-pulse tool, which
//! analyzes the health and sustainability of the napari plugin ecosystem from
//! metadata snapshots published by the npe2api service.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`config`]: Configuration loading and the health scoring policy
//! - [`sources`]: Snapshot fetching, caching, and deserialization
//! - [`dataset`]: The joined plugin table built from the two snapshots
//! - [`metrics`]: Statistic groups computed over the plugin table
//! - [`reports`]: Report generation in multiple formats

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod config;
#[cfg(not(any(debug_assertions, test)))]
mod config;

#[cfg(any(debug_assertions, test))]
pub mod dataset;
#[cfg(not(any(debug_assertions, test)))]
mod dataset;

#[cfg(any(debug_assertions, test))]
pub mod metrics;
#[cfg(not(any(debug_assertions, test)))]
mod metrics;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

#[cfg(any(debug_assertions, test))]
pub mod sources;
#[cfg(not(any(debug_assertions, test)))]
mod sources;

pub use crate::commands::{Host, run};
