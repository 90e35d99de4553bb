//! Half-complex packing of real-input spectra.
//!
//! A real signal of length `n` has a conjugate-symmetric spectrum, so `n` reals
//! describe it completely:
//!
//! ```text
//!   [ Re0, Re1, Im1, Re2, Im2, ..., Re(n/2) ]    n even
//!   [ Re0, Re1, Im1, ..., Re((n-1)/2), Im((n-1)/2) ]    n odd
//! ```

use nsl_core::{NslError, NslResult};
use num_complex::Complex64;

/// Writes the first half of `spectrum` into `out` in packed order.
pub fn pack(spectrum: &[Complex64], out: &mut [f64]) -> NslResult<()> {
    let n = spectrum.len();
    if out.len() < n {
        return Err(NslError::LengthMismatch {
            expected: n,
            actual: out.len(),
        });
    }
    if n == 0 {
        return Ok(());
    }
    out[0] = spectrum[0].re;
    for k in 1..n.div_ceil(2) {
        out[2 * k - 1] = spectrum[k].re;
        out[2 * k] = spectrum[k].im;
    }
    if n % 2 == 0 {
        out[n - 1] = spectrum[n / 2].re;
    }
    Ok(())
}

/// Rebuilds all `n` complex bins from a packed buffer.
pub fn unpack(packed: &[f64], n: usize) -> NslResult<Vec<Complex64>> {
    if packed.len() < n {
        return Err(NslError::LengthMismatch {
            expected: n,
            actual: packed.len(),
        });
    }
    let mut out = vec![Complex64::new(0.0, 0.0); n];
    if n == 0 {
        return Ok(out);
    }
    out[0] = Complex64::new(packed[0], 0.0);
    for k in 1..n.div_ceil(2) {
        let c = Complex64::new(packed[2 * k - 1], packed[2 * k]);
        out[k] = c;
        out[n - k] = c.conj();
    }
    if n % 2 == 0 {
        out[n / 2] = Complex64::new(packed[n - 1], 0.0);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_pack_even() {
        let spec = [c(10.0, 0.0), c(1.0, 2.0), c(3.0, 0.0), c(1.0, -2.0)];
        let mut out = [0.0; 4];
        pack(&spec, &mut out).unwrap();
        assert_eq!(out, [10.0, 1.0, 2.0, 3.0]);
        assert_eq!(unpack(&out, 4).unwrap(), spec.to_vec());
    }

    #[test]
    fn test_pack_odd() {
        let spec = [c(4.0, 0.0), c(1.0, 2.0), c(-1.0, 0.5), c(-1.0, -0.5), c(1.0, -2.0)];
        let mut out = [0.0; 5];
        pack(&spec, &mut out).unwrap();
        assert_eq!(out, [4.0, 1.0, 2.0, -1.0, 0.5]);
        assert_eq!(unpack(&out, 5).unwrap(), spec.to_vec());
    }

    #[test]
    fn test_short_buffers() {
        let mut out = [0.0; 2];
        assert!(pack(&[c(1.0, 0.0); 3], &mut out).is_err());
        assert!(unpack(&out, 3).is_err());
        assert_eq!(unpack(&[7.0], 1).unwrap(), vec![c(7.0, 0.0)]);
    }
}
