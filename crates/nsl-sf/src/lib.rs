//! Special functions and window functions for the NSL numerical core.

pub mod basic;
pub mod faddeeva;
pub mod landau;
pub mod window;

pub use basic::*;
pub use faddeeva::*;
pub use landau::*;
pub use window::*;
