//! Window resolution: current bounds and the prior-equivalent period.

pub mod model;
pub mod service;
