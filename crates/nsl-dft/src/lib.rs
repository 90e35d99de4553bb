//! Fourier-domain kernels: real DFT with result post-processing, half-complex
//! packing, inverse transform and the Hilbert transform.

pub mod dft;
pub mod halfcomplex;
pub mod hilbert;

pub use dft::*;
pub use hilbert::*;
