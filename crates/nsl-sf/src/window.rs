/// Window (tapering) functions applied before spectral analysis.
///
/// All windows are symmetric, `w(i) == w(n - 1 - i)`, and use the sampled
/// convention with `n - 1` in the denominators.
use nsl_core::{NslError, NslResult, StridedMut, WindowType};
use std::f64::consts::PI;

const NUTTALL: [f64; 4] = [0.355_768, 0.487_396, 0.144_232, 0.012_604];
const BLACKMAN_NUTTALL: [f64; 4] = [0.363_581_9, 0.489_177_5, 0.136_599_5, 0.010_641_1];
const BLACKMAN_HARRIS: [f64; 4] = [0.358_75, 0.488_29, 0.141_28, 0.011_68];
const FLAT_TOP: [f64; 5] = [
    0.215_578_95,
    0.416_631_58,
    0.277_263_158,
    0.083_578_947,
    0.006_947_368,
];

// a0 - a1 cos(2 pi i/(n-1)) + a2 cos(4 pi i/(n-1)) - ...
fn cosine_sum(coeffs: &[f64], phase: f64) -> f64 {
    coeffs
        .iter()
        .enumerate()
        .map(|(k, a)| {
            let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
            sign * a * (k as f64 * phase).cos()
        })
        .sum()
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Value of window `window` at sample `i` of an `n`-sample frame.
///
/// Samples at or past the end of the frame (`i >= n`) are zero, and a
/// one-sample frame is the identity window.
pub fn window_value(i: usize, n: usize, window: WindowType) -> f64 {
    if i >= n {
        return 0.0;
    }
    if n == 1 {
        return 1.0;
    }
    let fi = i as f64;
    let nm1 = (n - 1) as f64;
    let centre = nm1 / 2.0;
    let phase = 2.0 * PI * fi / nm1;

    match window {
        WindowType::Uniform => 1.0,
        WindowType::Triangle => 1.0 - ((fi - centre) / centre).abs(),
        WindowType::TriangleII => 1.0 - ((fi - centre) / (n as f64 / 2.0)).abs(),
        WindowType::TriangleIII => 1.0 - ((fi - centre) / ((n + 1) as f64 / 2.0)).abs(),
        WindowType::Welch => {
            let r = (fi - centre) / ((n + 1) as f64 / 2.0);
            1.0 - r * r
        }
        WindowType::Hann => 0.5 * (1.0 - phase.cos()),
        WindowType::Hamming => 0.54 - 0.46 * phase.cos(),
        WindowType::Blackman => cosine_sum(&[0.42, 0.5, 0.08], phase),
        WindowType::Nuttall => cosine_sum(&NUTTALL, phase),
        WindowType::BlackmanNuttall => cosine_sum(&BLACKMAN_NUTTALL, phase),
        WindowType::BlackmanHarris => cosine_sum(&BLACKMAN_HARRIS, phase),
        WindowType::FlatTop => cosine_sum(&FLAT_TOP, phase),
        WindowType::Cosine => (PI * fi / nm1).sin(),
        WindowType::BartlettHann => 0.62 - 0.48 * (fi / nm1 - 0.5).abs() - 0.38 * phase.cos(),
        WindowType::Lanczos => sinc(2.0 * fi / nm1 - 1.0),
    }
}

/// Multiplies the first `n` samples of `data` by the window, in place.
pub fn apply_window(data: &mut [f64], n: usize, window: WindowType) -> NslResult<()> {
    if data.len() < n {
        return Err(NslError::BufferTooShort {
            n,
            stride: 1,
            required: n,
            len: data.len(),
        });
    }
    let mut view = StridedMut::new(data, 1, n)?;
    apply_window_strided(&mut view, window)
}

/// Strided variant of [`apply_window`].
pub fn apply_window_strided(view: &mut StridedMut<'_>, window: WindowType) -> NslResult<()> {
    let n = view.len();
    if n == 0 {
        return Err(NslError::InsufficientPoints {
            required: 1,
            actual: 0,
        });
    }
    if window == WindowType::Uniform {
        return Ok(());
    }
    for (i, v) in view.iter_mut().enumerate() {
        *v *= window_value(i, n, window);
    }
    Ok(())
}

/// Full window of length `n` as a vector.
pub fn window_coefficients(n: usize, window: WindowType) -> Vec<f64> {
    (0..n).map(|i| window_value(i, n, window)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetry_all_windows() {
        for &w in WindowType::ALL.iter() {
            for &n in &[2usize, 7, 10, 33] {
                for i in 0..n {
                    let a = window_value(i, n, w);
                    let b = window_value(n - 1 - i, n, w);
                    assert!((a - b).abs() < 1e-12, "{w} n={n} i={i}: {a} vs {b}");
                }
            }
        }
    }

    #[test]
    fn test_endpoints_and_peaks() {
        let n = 11;
        assert_eq!(window_value(0, n, WindowType::Hann), 0.0);
        assert!((window_value(5, n, WindowType::Hann) - 1.0).abs() < 1e-15);
        assert!((window_value(0, n, WindowType::Hamming) - 0.08).abs() < 1e-15);
        assert!(window_value(0, n, WindowType::Blackman).abs() < 1e-15);
        assert!((window_value(5, n, WindowType::Blackman) - 1.0).abs() < 1e-15);
        assert!((window_value(5, n, WindowType::Triangle) - 1.0).abs() < 1e-15);
        assert_eq!(window_value(0, n, WindowType::Triangle), 0.0);
        assert!((window_value(5, n, WindowType::Lanczos) - 1.0).abs() < 1e-15);
        assert!((window_value(5, n, WindowType::FlatTop) - 1.0).abs() < 1e-8);
        assert!((window_value(5, n, WindowType::Cosine) - 1.0).abs() < 1e-15);
        // TriangleII/III and Welch do not reach zero at the edges
        assert!(window_value(0, n, WindowType::TriangleII) > 0.0);
        assert!(window_value(0, n, WindowType::TriangleIII) > window_value(0, n, WindowType::TriangleII));
        assert!(window_value(0, n, WindowType::Welch) > 0.0);
    }

    #[test]
    fn test_known_values() {
        // n = 5: hann = [0, 0.5, 1, 0.5, 0]
        let hann = window_coefficients(5, WindowType::Hann);
        for (a, b) in hann.iter().zip([0.0, 0.5, 1.0, 0.5, 0.0]) {
            assert!((a - b).abs() < 1e-15);
        }
        // n = 4: triangle II = 1 - |i - 1.5| / 2
        let tri = window_coefficients(4, WindowType::TriangleII);
        for (a, b) in tri.iter().zip([0.25, 0.75, 0.75, 0.25]) {
            assert!((a - b).abs() < 1e-15);
        }
        // n = 3: welch = 1 - ((i - 1) / 2)^2
        let welch = window_coefficients(3, WindowType::Welch);
        for (a, b) in welch.iter().zip([0.75, 1.0, 0.75]) {
            assert!((a - b).abs() < 1e-15);
        }
        // bartlett-hann at the edge: 0.62 - 0.24 - 0.38
        assert!(window_value(0, 9, WindowType::BartlettHann).abs() < 1e-15);
    }

    #[test]
    fn test_degenerate_and_partial() {
        for &w in WindowType::ALL.iter() {
            assert_eq!(window_value(0, 1, w), 1.0);
            assert_eq!(window_value(4, 4, w), 0.0);
        }
    }

    #[test]
    fn test_apply_window() {
        let mut data = vec![2.0; 6];
        apply_window(&mut data[..5], 5, WindowType::Hann).unwrap();
        assert_eq!(data[0], 0.0);
        assert!((data[2] - 2.0).abs() < 1e-15);
        assert!((data[1] - 1.0).abs() < 1e-15);
        assert_eq!(data[5], 2.0);

        let mut uniform = vec![3.0, 4.0];
        apply_window(&mut uniform, 2, WindowType::Uniform).unwrap();
        assert_eq!(uniform, vec![3.0, 4.0]);

        let mut short = vec![1.0; 3];
        assert!(apply_window(&mut short, 4, WindowType::Hann).is_err());
        assert!(apply_window(&mut short, 0, WindowType::Hann).is_err());
    }

    #[test]
    fn test_strided() {
        let mut data = vec![1.0, 9.0, 1.0, 9.0, 1.0];
        let mut view = StridedMut::new(&mut data, 2, 3).unwrap();
        apply_window_strided(&mut view, WindowType::Hann).unwrap();
        assert_eq!(data[0], 0.0);
        assert_eq!(data[1], 9.0);
        assert!((data[2] - 1.0).abs() < 1e-15);
    }
}
