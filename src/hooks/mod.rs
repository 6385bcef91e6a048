//! Hook discovery and status

pub mod source;
pub mod status;

pub use source::*;
pub use status::*;
