//! Shared types for the NSL numerical core.
//!
//! Result-type tags, window and derivative enumerations, the error taxonomy
//! used by every kernel, and strided views over caller-owned sample buffers.

pub mod enums;
pub mod error;
pub mod strided;

pub use enums::*;
pub use error::*;
pub use strided::*;
