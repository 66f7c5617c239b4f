//! HTTP request handlers.

mod system;

pub use system::*;
