//! cluster-notify - relay filesystem change notifications from a cluster
//!
//! The binary subscribes to the cluster's recursive change stream, filters
//! events through a watch list, and sends notifications to the console or a
//! chat webhook. This library exposes the pieces for integration tests.

pub mod adapters;
pub mod cli;
pub mod error;
pub mod models;
pub mod monitor;
pub mod policy;
pub mod router;
pub mod sse;
pub mod startup;
pub mod stream;
pub mod traits;
