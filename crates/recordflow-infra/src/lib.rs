//! Infrastructure layer for recordflow.
//!
//! Contains implementations of the ports defined in `recordflow-core`:
//! reqwest clients for the workflow engine and the records API, and the
//! config file loader (YAML or TOML).

pub mod config;
pub mod http;
