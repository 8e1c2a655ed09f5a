//! Deadlock detection and avoidance.
//!
//! [`graph`] looks for a cycle in a resource-allocation graph. [`banker`]
//! runs the Banker's safety algorithm over allocation matrices.

pub mod banker;
pub mod graph;

pub use banker::{RequestOutcome, ResourceState, SafetyReport, SafetyStep};
pub use graph::{DetectionReport, Edge, NodeKind, ResourceGraph};
