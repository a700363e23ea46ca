//! Webhook pipeline for recordflow.
//!
//! This crate defines the ports (`WorkflowEngine`, `RecordStore`) that the
//! infrastructure layer implements, plus the pure pieces of the pipeline:
//! pair lookup, field mapping, the retry policy and the handler that ties
//! them together. It depends only on `recordflow-types` -- never on
//! `recordflow-infra` or any HTTP client crate.

pub mod context;
pub mod gateway;
pub mod handler;
pub mod mapping;
pub mod registry;
pub mod retry;
