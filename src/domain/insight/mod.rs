//! Insight endpoints: comparison, efficiency report and top cost drivers.

pub mod dto;
pub mod service;
