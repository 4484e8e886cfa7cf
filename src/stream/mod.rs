//! The long-lived connection to the change-notification endpoint.

mod client;
mod state;

pub use client::{StreamClient, StreamItem};
pub use state::ConnectionState;
