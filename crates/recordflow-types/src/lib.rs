//! Shared domain types for recordflow.
//!
//! This crate contains the types exchanged between the webhook pipeline and
//! its collaborators: integration pairs, inbound webhook events, workflow
//! payloads, record updates, configuration and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, secrecy, thiserror.

pub mod config;
pub mod error;
pub mod event;
pub mod ids;
pub mod pair;
pub mod update;
pub mod webhook;
pub mod workflow;
