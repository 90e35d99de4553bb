//! Discrete Hilbert transform via the analytic signal.
//!
//! ```text
//!   1.  Spectrum X of the real input
//!   2.  Keep X0 (and X(n/2) for even n), double bins 1 .. ceil(n/2)-1
//!   3.  Zero the negative frequencies n/2+1 .. n-1
//!   4.  Inverse transform, divide by n  ->  z = x + i H(x)
//! ```

use crate::dft::DftPlan;
use nsl_core::{HilbertResultType, NslError, NslResult, StridedMut};
use num_complex::Complex64;

/// Analytic signal of `samples`; its real part reproduces the input.
pub fn analytic_signal(samples: &[f64]) -> NslResult<Vec<Complex64>> {
    let n = samples.len();
    if n < 2 {
        return Err(NslError::InsufficientPoints {
            required: 2,
            actual: n,
        });
    }
    let plan = DftPlan::new(n)?;
    let mut spec = plan.forward(samples)?;

    for z in &mut spec[1..n.div_ceil(2)] {
        *z *= 2.0;
    }
    for z in &mut spec[n / 2 + 1..] {
        *z = Complex64::new(0.0, 0.0);
    }

    plan.inverse(&mut spec)?;
    Ok(spec)
}

/// Replaces `n` samples at `data[i * stride]` with their Hilbert transform
/// (`Imag`) or the envelope of the analytic signal (`Envelope`).
pub fn hilbert_transform(
    data: &mut [f64],
    stride: usize,
    n: usize,
    result: HilbertResultType,
) -> NslResult<()> {
    let mut view = StridedMut::new(data, stride, n)?;
    let z = analytic_signal(&view.to_vec()).map_err(|e| {
        log::warn!("Hilbert transform rejected: {e}");
        e
    })?;
    let values: Vec<f64> = match result {
        HilbertResultType::Imag => z.iter().map(|c| c.im).collect(),
        HilbertResultType::Envelope => z.iter().map(|c| c.norm()).collect(),
    };
    view.write_from(&values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn cosine(n: usize, cycles: f64) -> Vec<f64> {
        (0..n).map(|i| (2.0 * PI * cycles * i as f64 / n as f64).cos()).collect()
    }

    #[test]
    fn test_cosine_to_sine() {
        for n in [16usize, 15] {
            let mut d = cosine(n, 3.0);
            hilbert_transform(&mut d, 1, n, HilbertResultType::Imag).unwrap();
            for (i, v) in d.iter().enumerate() {
                let s = (2.0 * PI * 3.0 * i as f64 / n as f64).sin();
                assert!((v - s).abs() < 1e-12, "n={n} i={i}: {v} vs {s}");
            }
        }
    }

    #[test]
    fn test_envelope_of_tone() {
        let mut d: Vec<f64> = cosine(32, 5.0).iter().map(|v| 2.5 * v).collect();
        hilbert_transform(&mut d, 1, 32, HilbertResultType::Envelope).unwrap();
        assert!(d.iter().all(|v| (v - 2.5).abs() < 1e-12));
    }

    #[test]
    fn test_analytic_real_part_is_input() {
        let x = [0.2, 1.0, -0.7, 3.0, 0.0, 1.5, -2.0];
        let z = analytic_signal(&x).unwrap();
        for (a, b) in z.iter().zip(&x) {
            assert!((a.re - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_constant_has_zero_transform() {
        let mut d = vec![4.0; 9];
        hilbert_transform(&mut d, 1, 9, HilbertResultType::Imag).unwrap();
        assert!(d.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn test_strided_and_errors() {
        let n = 16;
        let mut d = vec![f64::NAN; 3 * n];
        for (i, v) in cosine(n, 2.0).into_iter().enumerate() {
            d[3 * i] = v;
        }
        hilbert_transform(&mut d, 3, n, HilbertResultType::Imag).unwrap();
        assert!((d[3] - (2.0 * PI * 2.0 / 16.0).sin()).abs() < 1e-12);
        assert!(d[1].is_nan());

        let mut one = vec![1.0];
        assert_eq!(
            hilbert_transform(&mut one, 1, 1, HilbertResultType::Imag),
            Err(NslError::InsufficientPoints {
                required: 2,
                actual: 1
            })
        );
    }
}
