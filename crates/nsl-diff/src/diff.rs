//! Numerical derivatives of sampled data on (possibly) unequally spaced grids.
//!
//! Every routine overwrites `y` with the derivative at each `x[i]`. The
//! derivative of order `m` at accuracy `p` uses `m + p` consecutive points:
//! a centred window in the interior, shifted to a one-sided window at the
//! boundaries. Results are computed into a separate buffer and copied back
//! only on success, so `y` is left untouched when an error is returned.

use crate::stencil::fd_weights;
use nsl_core::{DerivOrder, NslError, NslResult};

fn check_grid(x: &[f64], y: &[f64], required: usize) -> NslResult<()> {
    if x.len() != y.len() {
        return Err(NslError::LengthMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    if x.len() < required {
        log::warn!("differentiation needs {required} points, got {}", x.len());
        return Err(NslError::InsufficientPoints {
            required,
            actual: x.len(),
        });
    }
    if x.len() >= 2 {
        let increasing = x[1] > x[0];
        for i in 1..x.len() {
            let ok = if increasing { x[i] > x[i - 1] } else { x[i] < x[i - 1] };
            if !ok {
                return Err(NslError::NonMonotonic { index: i });
            }
        }
    }
    Ok(())
}

/// Derivative of order `order` with accuracy `accuracy`.
pub fn derivative(x: &[f64], y: &mut [f64], order: DerivOrder, accuracy: usize) -> NslResult<()> {
    if !order.supports(accuracy) {
        return Err(NslError::NotImplemented(format!(
            "{order} with accuracy order {accuracy}"
        )));
    }
    let m = order.order();
    let size = m + accuracy;
    check_grid(x, y, size)?;

    let n = x.len();
    let mut out = vec![0.0; n];
    for (i, slot) in out.iter_mut().enumerate() {
        let start = i.saturating_sub((size - 1) / 2).min(n - size);
        let xs = &x[start..start + size];
        let ys = &y[start..start + size];
        *slot = fd_weights(x[i], xs, m)
            .iter()
            .zip(ys)
            .map(|(w, v)| w * v)
            .sum();
    }
    log::debug!("{order} (accuracy {accuracy}) over {n} points");
    y.copy_from_slice(&out);
    Ok(())
}

/// First derivative; accuracy 2 (n ≥ 3) or 4 (n ≥ 5).
pub fn first_deriv(x: &[f64], y: &mut [f64], accuracy: usize) -> NslResult<()> {
    derivative(x, y, DerivOrder::First, accuracy)
}

pub fn first_deriv_second_order(x: &[f64], y: &mut [f64]) -> NslResult<()> {
    derivative(x, y, DerivOrder::First, 2)
}

pub fn first_deriv_fourth_order(x: &[f64], y: &mut [f64]) -> NslResult<()> {
    derivative(x, y, DerivOrder::First, 4)
}

/// First derivative as the mean of the two adjacent secant slopes; the end
/// points use the single available secant. Needs n ≥ 2.
pub fn first_deriv_avg(x: &[f64], y: &mut [f64]) -> NslResult<()> {
    check_grid(x, y, 2)?;
    let n = x.len();
    let slope = |i: usize| (y[i + 1] - y[i]) / (x[i + 1] - x[i]);
    let mut out = vec![0.0; n];
    out[0] = slope(0);
    out[n - 1] = slope(n - 2);
    for i in 1..n - 1 {
        out[i] = 0.5 * (slope(i - 1) + slope(i));
    }
    y.copy_from_slice(&out);
    Ok(())
}

/// Second derivative; accuracy 1 (n ≥ 3), 2 (n ≥ 4) or 3 (n ≥ 5).
pub fn second_deriv(x: &[f64], y: &mut [f64], accuracy: usize) -> NslResult<()> {
    derivative(x, y, DerivOrder::Second, accuracy)
}

pub fn second_deriv_first_order(x: &[f64], y: &mut [f64]) -> NslResult<()> {
    derivative(x, y, DerivOrder::Second, 1)
}

pub fn second_deriv_second_order(x: &[f64], y: &mut [f64]) -> NslResult<()> {
    derivative(x, y, DerivOrder::Second, 2)
}

pub fn second_deriv_third_order(x: &[f64], y: &mut [f64]) -> NslResult<()> {
    derivative(x, y, DerivOrder::Second, 3)
}

pub fn third_deriv(x: &[f64], y: &mut [f64], accuracy: usize) -> NslResult<()> {
    derivative(x, y, DerivOrder::Third, accuracy)
}

pub fn third_deriv_second_order(x: &[f64], y: &mut [f64]) -> NslResult<()> {
    derivative(x, y, DerivOrder::Third, 2)
}

pub fn fourth_deriv(x: &[f64], y: &mut [f64], accuracy: usize) -> NslResult<()> {
    derivative(x, y, DerivOrder::Fourth, accuracy)
}

pub fn fourth_deriv_first_order(x: &[f64], y: &mut [f64]) -> NslResult<()> {
    derivative(x, y, DerivOrder::Fourth, 1)
}

pub fn fourth_deriv_third_order(x: &[f64], y: &mut [f64]) -> NslResult<()> {
    derivative(x, y, DerivOrder::Fourth, 3)
}

pub fn fifth_deriv(x: &[f64], y: &mut [f64], accuracy: usize) -> NslResult<()> {
    derivative(x, y, DerivOrder::Fifth, accuracy)
}

pub fn fifth_deriv_second_order(x: &[f64], y: &mut [f64]) -> NslResult<()> {
    derivative(x, y, DerivOrder::Fifth, 2)
}

pub fn sixth_deriv(x: &[f64], y: &mut [f64], accuracy: usize) -> NslResult<()> {
    derivative(x, y, DerivOrder::Sixth, accuracy)
}

pub fn sixth_deriv_first_order(x: &[f64], y: &mut [f64]) -> NslResult<()> {
    derivative(x, y, DerivOrder::Sixth, 1)
}
