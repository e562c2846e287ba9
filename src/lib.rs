//! Cost comparison and efficiency insights for Kubernetes workloads.

pub mod api;
pub mod app_state;
pub mod core;
pub mod debug;
pub mod domain;
pub mod errors;
pub mod routes;
