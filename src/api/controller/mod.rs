pub mod insight;
pub mod window;
