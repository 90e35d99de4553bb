//! Faddeeva function w(z) = exp(-z²) erfc(-iz) and the Voigt profile built on it.
//!
//! Uses Weideman's rational expansion with 32 terms (J.A.C. Weideman, SIAM J.
//! Numer. Anal. 31 (1994) 1497). The expansion coefficients come from one FFT
//! which is computed on first use.

use num_complex::Complex64;
use rustfft::FftPlanner;
use std::f64::consts::PI;
use std::sync::OnceLock;

const TERMS: usize = 32;
const FRAC_1_SQRT_PI: f64 = 0.564_189_583_547_756_3;

struct Weideman {
    l: f64,
    coeffs: Vec<f64>,
}

fn weideman() -> &'static Weideman {
    static TABLE: OnceLock<Weideman> = OnceLock::new();
    TABLE.get_or_init(|| {
        let m = 2 * TERMS;
        let size = 2 * m;
        let l = (TERMS as f64 / 2f64.sqrt()).sqrt();

        // f(t) sampled at t_k = L tan(k pi / 2M), k = -M+1 .. M-1, with f = 0 in front
        let mut f = Vec::with_capacity(size);
        f.push(0.0);
        for k in -(m as i64) + 1..m as i64 {
            let t = l * (k as f64 * PI / (2 * m) as f64).tan();
            f.push((-t * t).exp() * (l * l + t * t));
        }

        // fftshift, then forward transform
        let mut buf: Vec<Complex64> = f[m..]
            .iter()
            .chain(&f[..m])
            .map(|&v| Complex64::new(v, 0.0))
            .collect();
        let mut planner = FftPlanner::<f64>::new();
        planner.plan_fft_forward(size).process(&mut buf);

        let coeffs = buf[1..=TERMS]
            .iter()
            .rev()
            .map(|c| c.re / size as f64)
            .collect();
        log::debug!("Weideman expansion initialised with {} terms", TERMS);
        Weideman { l, coeffs }
    })
}

fn w_upper(z: Complex64) -> Complex64 {
    let table = weideman();
    let iz = Complex64::i() * z;
    let denom = table.l - iz;
    let zz = (table.l + iz) / denom;
    let p = table
        .coeffs
        .iter()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * zz + c);
    2.0 * p / (denom * denom) + FRAC_1_SQRT_PI / denom
}

/// Faddeeva function w(z) on the whole complex plane.
pub fn faddeeva(z: Complex64) -> Complex64 {
    if z.im >= 0.0 {
        w_upper(z)
    } else {
        2.0 * (-z * z).exp() - w_upper(-z)
    }
}

/// Derivative w'(z) = -2z w(z) + 2i/√π.
pub fn faddeeva_deriv(z: Complex64, w: Complex64) -> Complex64 {
    -2.0 * z * w + Complex64::new(0.0, 2.0 * FRAC_1_SQRT_PI)
}

/// Normalised Voigt profile: convolution of a Gaussian (σ) with a Lorentzian (γ, HWHM).
pub fn voigt(x: f64, sigma: f64, gamma: f64) -> f64 {
    let scale = sigma * 2f64.sqrt();
    let z = Complex64::new(x, gamma) / scale;
    faddeeva(z).re / (sigma * (2.0 * PI).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::erfc;

    #[test]
    fn test_imaginary_axis_is_scaled_erfc() {
        for &y in &[0.01, 0.5, 1.0, 3.0] {
            let w = faddeeva(Complex64::new(0.0, y));
            let expected = (y * y).exp() * erfc(y);
            assert!((w.re / expected - 1.0).abs() < 1e-12, "y = {y}");
            assert!(w.im.abs() < 1e-13);
        }
    }

    #[test]
    fn test_real_axis() {
        for &x in &[0.0, 0.5, 1.0, 2.0, 4.0] {
            let w = faddeeva(Complex64::new(x, 0.0));
            assert!((w.re - (-x * x).exp()).abs() < 1e-12, "x = {x}");
        }
        // Dawson: Im w(1) = 2/sqrt(pi) D(1)
        let w = faddeeva(Complex64::new(1.0, 0.0));
        assert!((w.im - 2.0 * FRAC_1_SQRT_PI * 0.538_079_506_912_768_4).abs() < 1e-12);
    }

    #[test]
    fn test_lower_half_plane() {
        let z = Complex64::new(0.7, -0.4);
        let w = faddeeva(z);
        // w(-z) = 2 exp(-z^2) - w(z)
        let reflected = faddeeva(-z);
        let sum = w + reflected;
        let expected = 2.0 * (-z * z).exp();
        assert!((sum - expected).norm() < 1e-12);
    }

    #[test]
    fn test_voigt_limits() {
        // gamma = 0 reduces to a Gaussian
        let (x, s): (f64, f64) = (0.7, 1.3);
        let gauss = (-x * x / (2.0 * s * s)).exp() / (s * (2.0 * PI).sqrt());
        assert!((voigt(x, s, 0.0) - gauss).abs() < 1e-13);

        // normalisation
        let h = 0.01;
        let total: f64 = (0..=40_000).map(|i| voigt(-200.0 + i as f64 * h, 1.0, 0.5)).sum::<f64>() * h;
        assert!((total - 1.0).abs() < 5e-3, "integral = {total}");
    }
}
