//! Tomcat Buildpack
//!
//! Contributes an Apache Tomcat distribution plus supporting artifacts into
//! a shared launch layer: resolves versions against the buildpack catalog,
//! caches fetched artifacts by content checksum, and persists the layer
//! metadata later build and launch stages rely on.

pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod fsutil;
pub mod launch;
pub mod layer;
pub mod plan;
pub mod tomcat;

pub use error::{BuildpackError, BuildpackResult};
