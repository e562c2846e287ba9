//! Shared table services: stable ranking and page bookkeeping

pub mod pagination;
pub mod ranking;
