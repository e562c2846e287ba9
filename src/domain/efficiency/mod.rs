//! Cost-weighted CPU/memory efficiency per entity and per fleet.

pub mod dto;
pub mod service;
