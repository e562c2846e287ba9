//! Period-over-period comparison of cumulative cost datasets.

pub mod dto;
pub mod service;
