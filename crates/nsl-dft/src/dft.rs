//! Discrete Fourier transform of real data with selectable post-processing.
//!
//! The transform is unnormalised (`X_k = Σ x_j e^{-2πi jk/n}`), any length is
//! accepted. Results are written back into the caller buffer at the strided
//! positions; one-sided output covers bins `0 ..= n/2`, two-sided all `n`.

use crate::halfcomplex;
use nsl_core::{DftResultType, DftXScale, NslError, NslResult, StridedMut, WindowType};
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Forward and inverse plans for one transform length.
///
/// Reusable across many buffers of the same length.
pub struct DftPlan {
    n: usize,
    fwd: Arc<dyn Fft<f64>>,
    inv: Arc<dyn Fft<f64>>,
}

impl DftPlan {
    pub fn new(n: usize) -> NslResult<Self> {
        if n == 0 {
            return Err(NslError::InsufficientPoints {
                required: 1,
                actual: 0,
            });
        }
        let mut planner = FftPlanner::<f64>::new();
        let fwd = planner.plan_fft_forward(n);
        let inv = planner.plan_fft_inverse(n);
        log::debug!("planned DFT of length {n}");
        Ok(Self { n, fwd, inv })
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Full complex spectrum of `samples` (length must equal the plan length).
    pub fn forward(&self, samples: &[f64]) -> NslResult<Vec<Complex64>> {
        if samples.len() != self.n {
            return Err(NslError::LengthMismatch {
                expected: self.n,
                actual: samples.len(),
            });
        }
        let mut buf: Vec<Complex64> = samples.iter().map(|&v| Complex64::new(v, 0.0)).collect();
        self.fwd.process(&mut buf);
        Ok(buf)
    }

    /// Inverse transform in place, including the `1/n` normalisation.
    pub fn inverse(&self, buf: &mut [Complex64]) -> NslResult<()> {
        if buf.len() != self.n {
            return Err(NslError::LengthMismatch {
                expected: self.n,
                actual: buf.len(),
            });
        }
        self.inv.process(buf);
        let inv_n = 1.0 / self.n as f64;
        for z in buf.iter_mut() {
            *z *= inv_n;
        }
        Ok(())
    }
}

/// Full complex spectrum of a real signal.
pub fn spectrum(samples: &[f64]) -> NslResult<Vec<Complex64>> {
    DftPlan::new(samples.len())?.forward(samples)
}

/// Number of values a transform of `n` samples writes.
pub fn output_len(n: usize, two_sided: bool, result: DftResultType) -> usize {
    if two_sided || result == DftResultType::Raw {
        n
    } else {
        n / 2 + 1
    }
}

fn post_process(spec: &[Complex64], count: usize, result: DftResultType) -> NslResult<Vec<f64>> {
    let n = spec.len() as f64;
    let bins = &spec[..count];
    let values = match result {
        DftResultType::Magnitude => bins.iter().map(|z| z.norm()).collect(),
        DftResultType::Amplitude => bins.iter().map(|z| z.norm() / n).collect(),
        DftResultType::Real => bins.iter().map(|z| z.re).collect(),
        DftResultType::Imag => bins.iter().map(|z| z.im).collect(),
        DftResultType::Power => bins.iter().map(|z| z.norm_sqr() / n).collect(),
        DftResultType::Phase => bins.iter().map(|z| -z.im.atan2(z.re)).collect(),
        DftResultType::Db => bins.iter().map(|z| 20.0 * (z.norm() / n).log10()).collect(),
        DftResultType::NormDb => {
            let max = bins.iter().map(|z| z.norm()).fold(0.0, f64::max);
            bins.iter()
                .map(|z| {
                    if max > 0.0 {
                        20.0 * (z.norm() / max).log10()
                    } else {
                        f64::NEG_INFINITY
                    }
                })
                .collect()
        }
        DftResultType::SquareMagnitude => bins.iter().map(|z| z.norm_sqr()).collect(),
        DftResultType::SquareAmplitude => bins.iter().map(|z| (z.norm() / n).powi(2)).collect(),
        DftResultType::Raw => {
            let mut out = vec![0.0; spec.len()];
            halfcomplex::pack(spec, &mut out)?;
            out
        }
    };
    Ok(values)
}

/// Transforms `n` samples at `data[i * stride]` in place.
///
/// Returns the number of output values written (see [`output_len`]).
pub fn dft_transform(
    data: &mut [f64],
    stride: usize,
    n: usize,
    two_sided: bool,
    result: DftResultType,
) -> NslResult<usize> {
    dft_transform_window(data, stride, n, two_sided, result, WindowType::Uniform)
}

/// Like [`dft_transform`], applying `window` to the samples first.
pub fn dft_transform_window(
    data: &mut [f64],
    stride: usize,
    n: usize,
    two_sided: bool,
    result: DftResultType,
    window: WindowType,
) -> NslResult<usize> {
    let mut view = StridedMut::new(data, stride, n)?;
    if n == 0 {
        log::warn!("DFT requested on an empty buffer");
        return Err(NslError::InsufficientPoints {
            required: 1,
            actual: 0,
        });
    }
    nsl_sf::apply_window_strided(&mut view, window)?;

    let spec = spectrum(&view.to_vec())?;
    let count = output_len(n, two_sided, result);
    let values = post_process(&spec, count, result)?;
    view.write_from(&values)?;
    log::debug!("DFT n={n} result={result} two_sided={two_sided} window={window} wrote {count}");
    Ok(count)
}

/// Inverse of a raw (half-complex) transform: restores the real signal in place.
pub fn inverse_transform(data: &mut [f64], stride: usize, n: usize) -> NslResult<()> {
    let mut view = StridedMut::new(data, stride, n)?;
    let plan = DftPlan::new(n)?;
    let mut buf = halfcomplex::unpack(&view.to_vec(), n)?;
    plan.inverse(&mut buf)?;
    let signal: Vec<f64> = buf.iter().map(|z| z.re).collect();
    view.write_from(&signal)
}

/// Abscissa of the `count` transformed bins of an `n`-sample signal spanning `[xmin, xmax]`.
///
/// With `shifted`, bins from `n/2` on are mapped to negative frequencies
/// (only meaningful for two-sided output).
pub fn x_axis(
    n: usize,
    count: usize,
    xmin: f64,
    xmax: f64,
    scale: DftXScale,
    shifted: bool,
) -> Vec<f64> {
    let nf = n as f64;
    let span = xmax - xmin;
    let df = if span != 0.0 { (nf - 1.0) / (span * nf) } else { 0.0 };
    (0..count)
        .map(|i| {
            let fi = i as f64;
            let negative = shifted && i >= n / 2;
            match scale {
                DftXScale::Frequency if negative => df * (fi - nf),
                DftXScale::Frequency => df * fi,
                DftXScale::Index if negative => fi - count as f64,
                DftXScale::Index => fi,
                DftXScale::Period => 1.0 / (df * fi + df),
            }
        })
        .collect()
}

/// Rotates a two-sided result so the negative-frequency half comes first.
pub fn shift_two_sided(values: &mut [f64]) {
    let half = values.len() / 2;
    values.rotate_left(half);
}
