//! Descriptor restore (verb module)
//!
//! Transforms a stored [`WireQuery`](crate::WireQuery) back into a
//! [`QueryDescriptor`](crate::QueryDescriptor).

mod error;
mod invert;

pub use error::RestoreError;
pub use invert::restore_descriptor;
