//! Git repository integration

pub mod installer;
pub mod repository;

pub use installer::*;
pub use repository::*;
