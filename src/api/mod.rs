//! HTTP layer: controllers, routes and transport DTOs.

pub mod controller;
pub mod dto;
pub mod routes;
pub mod util;
