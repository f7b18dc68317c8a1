//! Route handlers organized by resource

pub mod fallback;
pub mod health;
pub mod pokemon;
