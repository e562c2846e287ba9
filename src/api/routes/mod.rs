//! API route declarations (e.g., /api/v1/*)

pub mod insight_routes;
pub mod window_routes;
