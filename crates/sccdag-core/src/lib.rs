#![forbid(unsafe_code)]
//! sccdag-core library.
//!
//! Strongly connected component decomposition and SCC condensation for
//! directed graphs supplied through the [`graph::HostGraph`] trait.
//!
//! # Conventions
//!
//! - **Errors**: Typed [`GraphError`] values (`thiserror`); every public
//!   operation returns `Result<_, GraphError>`.
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`). The library
//!   never installs a subscriber.

pub mod error;
pub mod graph;

pub use error::{GraphError, GraphKind, PartitionError};
pub use graph::{
    ComponentNode, Condensation, HostGraph, StronglyConnectedComponents, condense, condense_with,
    number_strongly_connected_components, strongly_connected_components,
};
