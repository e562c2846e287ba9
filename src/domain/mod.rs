pub mod common;
pub mod comparison;
pub mod efficiency;
pub mod insight;
pub mod window;
