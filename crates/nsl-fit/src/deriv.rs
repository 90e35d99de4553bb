//! Analytic parameter derivatives of the fit models.
//!
//! Each function returns `∂(√weight · f(x; p)) / ∂p[param]` for one model.
//! An out-of-range `param` yields 0, as does any point outside the support
//! of a distribution.

use crate::functions::{
    binomial_pmf, cauchy_pdf, gauss_pdf, hypergeometric_support, ln_choose, negative_binomial_pmf, SQRT_2PI,
};
use nsl_sf::{digamma, erf, erfc, faddeeva, faddeeva_deriv, gamma, landau_pdf, ln_gamma, sech};
use num_complex::Complex64;
use std::f64::consts::{LN_2, PI, SQRT_2};

// ─── Basic ──────────────────────────────────────────────────────────────────

/// Derivative of a polynomial with respect to coefficient `j`.
pub fn polynomial_param_deriv(x: f64, j: usize, weight: f64) -> f64 {
    weight.sqrt() * x.powi(j as i32)
}

pub fn power1_param_deriv(param: usize, x: f64, a: f64, b: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    match param {
        0 => sw * x.powf(b),
        1 => sw * a * x.powf(b) * x.ln(),
        _ => 0.0,
    }
}

pub fn power2_param_deriv(param: usize, x: f64, b: f64, c: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    match param {
        0 => sw,
        1 => sw * x.powf(c),
        2 => sw * b * x.powf(c) * x.ln(),
        _ => 0.0,
    }
}

/// `p` holds the `(a_i, b_i)` pairs of `Σ a_i exp(b_i x)`.
pub fn exponential_param_deriv(param: usize, x: f64, p: &[f64], weight: f64) -> f64 {
    if param >= p.len() {
        return 0.0;
    }
    let sw = weight.sqrt();
    if param % 2 == 0 {
        sw * (p[param + 1] * x).exp()
    } else {
        sw * p[param - 1] * x * (p[param] * x).exp()
    }
}

pub fn inverse_exponential_param_deriv(param: usize, x: f64, a: f64, b: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    match param {
        0 => sw * (1.0 - (b * x).exp()),
        1 => -sw * a * x * (b * x).exp(),
        2 => sw,
        _ => 0.0,
    }
}

/// Fourier series `p = [w, a0, a1, b1, ..., an, bn]`.
pub fn fourier_param_deriv(param: usize, x: f64, p: &[f64], weight: f64) -> f64 {
    if param >= p.len() {
        return 0.0;
    }
    let sw = weight.sqrt();
    let w = p[0];
    match param {
        0 => {
            let pairs = p.get(2..).unwrap_or(&[]);
            sw * pairs
                .chunks_exact(2)
                .enumerate()
                .map(|(k, ab)| {
                    let k = (k + 1) as f64;
                    k * x * (-ab[0] * (k * w * x).sin() + ab[1] * (k * w * x).cos())
                })
                .sum::<f64>()
        }
        1 => sw,
        _ => {
            let k = (param / 2) as f64;
            if param % 2 == 0 {
                sw * (k * w * x).cos()
            } else {
                sw * (k * w * x).sin()
            }
        }
    }
}

// ─── Peak ───────────────────────────────────────────────────────────────────

pub fn gaussian_param_deriv(param: usize, x: f64, a: f64, s: f64, mu: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    let y = x - mu;
    let g = gauss_pdf(y, s);
    match param {
        0 => sw * g,
        1 => sw * a * g * (y * y - s * s) / (s * s * s),
        2 => sw * a * g * y / (s * s),
        _ => 0.0,
    }
}

pub fn lorentz_param_deriv(param: usize, x: f64, a: f64, g: f64, mu: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    let y = x - mu;
    let denom = g * g + y * y;
    match param {
        0 => sw * cauchy_pdf(y, g),
        1 => sw * a / PI * (y * y - g * g) / (denom * denom),
        2 => sw * a / PI * 2.0 * g * y / (denom * denom),
        _ => 0.0,
    }
}

pub fn sech_param_deriv(param: usize, x: f64, a: f64, s: f64, mu: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    let y = (x - mu) / s;
    let norm = sw / (PI * s);
    match param {
        0 => norm * sech(y),
        1 => norm * a / s * sech(y) * (y * y.tanh() - 1.0),
        2 => norm * a / s * sech(y) * y.tanh(),
        _ => 0.0,
    }
}

pub fn logistic_param_deriv(param: usize, x: f64, a: f64, s: f64, mu: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    let y = (x - mu) / (2.0 * s);
    let sech2 = sech(y).powi(2);
    match param {
        0 => sw * sech2 / (4.0 * s),
        1 => sw * a / (4.0 * s * s) * sech2 * (2.0 * y * y.tanh() - 1.0),
        2 => sw * a / (4.0 * s * s) * sech2 * y.tanh(),
        _ => 0.0,
    }
}

/// Voigt profile, parameters `(A, mu, s, g)`.
pub fn voigt_param_deriv(param: usize, x: f64, a: f64, mu: f64, s: f64, g: f64, weight: f64) -> f64 {
    if s <= 0.0 || g < 0.0 {
        return 0.0;
    }
    let sw = weight.sqrt();
    let scale = s * SQRT_2;
    let z = Complex64::new(x - mu, g) / scale;
    let w = faddeeva(z);
    let dw = faddeeva_deriv(z, w);
    let norm = 1.0 / (s * SQRT_2PI);
    let v = w.re * norm;
    match param {
        0 => sw * v,
        1 => -sw * a * norm * dw.re / scale,
        2 => sw * a * (-v / s + norm * (dw * (-z / s)).re),
        3 => sw * a * norm * (dw * Complex64::i()).re / scale,
        _ => 0.0,
    }
}

/// Pseudo-Voigt with common width, parameters `(A, eta, w, mu)`.
pub fn pseudo_voigt1_param_deriv(param: usize, x: f64, a: f64, eta: f64, w: f64, mu: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    let y = x - mu;
    let c = (2.0 * LN_2).sqrt();
    let sigma = w / c;
    let lor = cauchy_pdf(y, w);
    let gau = gauss_pdf(y, sigma);
    let d = w * w + y * y;
    match param {
        0 => sw * (eta * lor + (1.0 - eta) * gau),
        1 => sw * a * (lor - gau),
        2 => {
            sw * a
                * (eta * (y * y - w * w) / (PI * d * d)
                    + (1.0 - eta) * gau * (y * y - sigma * sigma) / sigma.powi(3) / c)
        }
        3 => sw * a * (eta * 2.0 * w * y / (PI * d * d) + (1.0 - eta) * gau * y / (sigma * sigma)),
        _ => 0.0,
    }
}

// ─── Growth ─────────────────────────────────────────────────────────────────

// a*h(y), y = (x-mu)/s, with h' given
fn growth_deriv(param: usize, a: f64, y: f64, s: f64, h: f64, dh: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    match param {
        0 => sw * h,
        1 => -sw * a * dh / s,
        2 => -sw * a * y * dh / s,
        _ => 0.0,
    }
}

pub fn atan_param_deriv(param: usize, x: f64, a: f64, mu: f64, s: f64, weight: f64) -> f64 {
    let y = (x - mu) / s;
    growth_deriv(param, a, y, s, y.atan(), 1.0 / (1.0 + y * y), weight)
}

pub fn tanh_param_deriv(param: usize, x: f64, a: f64, mu: f64, s: f64, weight: f64) -> f64 {
    let y = (x - mu) / s;
    growth_deriv(param, a, y, s, y.tanh(), sech(y).powi(2), weight)
}

pub fn algebraic_sigmoid_param_deriv(param: usize, x: f64, a: f64, mu: f64, s: f64, weight: f64) -> f64 {
    let y = (x - mu) / s;
    let r = 1.0 + y * y;
    growth_deriv(param, a, y, s, y / r.sqrt(), r.powf(-1.5), weight)
}

pub fn gudermann_param_deriv(param: usize, x: f64, a: f64, mu: f64, s: f64, weight: f64) -> f64 {
    let y = (x - mu) / s;
    growth_deriv(param, a, y, s, y.tanh().asin(), sech(y), weight)
}

pub fn sigmoid_param_deriv(param: usize, x: f64, a: f64, mu: f64, k: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    let e = (-k * (x - mu)).exp();
    let d = e / ((1.0 + e) * (1.0 + e));
    match param {
        0 => sw / (1.0 + e),
        1 => -sw * a * k * d,
        2 => sw * a * (x - mu) * d,
        _ => 0.0,
    }
}

pub fn erf_param_deriv(param: usize, x: f64, a: f64, mu: f64, s: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    let y = (x - mu) / (SQRT_2 * s);
    let e = (-y * y).exp();
    match param {
        0 => sw * erf(y) / 2.0,
        1 => -sw * a * e / (SQRT_2PI * s),
        2 => -sw * a * y * e / (PI.sqrt() * s),
        _ => 0.0,
    }
}

pub fn hill_param_deriv(param: usize, x: f64, a: f64, n: f64, s: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    let r = x / s;
    let y = r.powf(n);
    let d = (1.0 + y) * (1.0 + y);
    match param {
        0 => sw * y / (1.0 + y),
        1 => sw * a * r.ln() * y / d,
        2 => -sw * a * n * y / (s * d),
        _ => 0.0,
    }
}

pub fn gompertz_param_deriv(param: usize, x: f64, a: f64, b: f64, c: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    let e = (-c * x).exp();
    let big = (-b * e).exp();
    match param {
        0 => sw * big,
        1 => -sw * a * e * big,
        2 => sw * a * b * x * e * big,
        _ => 0.0,
    }
}

// ─── Distributions ──────────────────────────────────────────────────────────

pub fn gaussian_tail_param_deriv(param: usize, x: f64, a: f64, s: f64, tail: f64, mu: f64, weight: f64) -> f64 {
    let y = x - mu;
    if y < tail {
        return 0.0;
    }
    let sw = weight.sqrt();
    let norm = erfc(tail / (SQRT_2 * s)) / 2.0;
    let g = gauss_pdf(y, s) / norm;
    let f = a * g;
    let ea = (-tail * tail / (2.0 * s * s)).exp();
    match param {
        0 => sw * g,
        1 => sw * f * ((y * y - s * s) / s.powi(3) - tail * ea / (SQRT_2PI * s * s * norm)),
        2 => sw * f * ea / (SQRT_2PI * s * norm),
        3 => sw * f * y / (s * s),
        _ => 0.0,
    }
}

pub fn exponential_dist_param_deriv(param: usize, x: f64, a: f64, l: f64, mu: f64, weight: f64) -> f64 {
    if x < mu {
        return 0.0;
    }
    let sw = weight.sqrt();
    let y = l * (x - mu);
    let e = (-y).exp();
    match param {
        0 => sw * l * e,
        1 => sw * a * (1.0 - y) * e,
        2 => sw * a * l * l * e,
        _ => 0.0,
    }
}

pub fn laplace_param_deriv(param: usize, x: f64, a: f64, s: f64, mu: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    let y = (x - mu).abs() / s;
    let e = (-y).exp();
    let sign = if x > mu {
        1.0
    } else if x < mu {
        -1.0
    } else {
        0.0
    };
    match param {
        0 => sw * e / (2.0 * s),
        1 => sw * a / (2.0 * s * s) * (y - 1.0) * e,
        2 => sw * a / (2.0 * s * s) * sign * e,
        _ => 0.0,
    }
}

pub fn exponential_power_param_deriv(param: usize, x: f64, a: f64, s: f64, b: f64, mu: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    let y = (x - mu) / s;
    let ay = y.abs();
    let g = (-ay.powf(b)).exp() / (2.0 * s * gamma(1.0 + 1.0 / b));
    let f = a * g;
    match param {
        0 => sw * g,
        1 => sw * f / s * (b * ay.powf(b) - 1.0),
        2 => {
            let tail = if ay > 0.0 { ay.powf(b) * ay.ln() } else { 0.0 };
            sw * f * (digamma(1.0 + 1.0 / b) / (b * b) - tail)
        }
        3 => {
            if ay == 0.0 {
                return 0.0;
            }
            sw * f * b * ay.powf(b - 1.0) * y.signum() / s
        }
        _ => 0.0,
    }
}

pub fn rayleigh_param_deriv(param: usize, x: f64, a: f64, s: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    let y = x / s;
    let e = (-y * y / 2.0).exp();
    match param {
        0 => sw * y / s * e,
        1 => sw * a * y * (y * y - 2.0) * e / (s * s),
        _ => 0.0,
    }
}

pub fn rayleigh_tail_param_deriv(param: usize, x: f64, a: f64, s: f64, mu: f64, weight: f64) -> f64 {
    if x < mu {
        return 0.0;
    }
    let sw = weight.sqrt();
    let z = (mu * mu - x * x) / (2.0 * s * s);
    let g = x / (s * s) * z.exp();
    let f = a * g;
    match param {
        0 => sw * g,
        1 => -sw * 2.0 * f * (1.0 + z) / s,
        2 => sw * f * mu / (s * s),
        _ => 0.0,
    }
}

pub fn landau_param_deriv(param: usize, x: f64, weight: f64) -> f64 {
    match param {
        0 => weight.sqrt() * landau_pdf(x),
        _ => 0.0,
    }
}

pub fn gamma_param_deriv(param: usize, x: f64, a: f64, k: f64, t: f64, weight: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let sw = weight.sqrt();
    let g = ((k - 1.0) * x.ln() - x / t - ln_gamma(k) - k * t.ln()).exp();
    let f = a * g;
    match param {
        0 => sw * g,
        1 => sw * f * ((x / t).ln() - digamma(k)),
        2 => sw * f * (x / t - k) / t,
        _ => 0.0,
    }
}

/// Uniform density, parameters `(A, hi, lo)`.
pub fn flat_param_deriv(param: usize, x: f64, a: f64, hi: f64, lo: f64, weight: f64) -> f64 {
    if x < lo || x > hi {
        return 0.0;
    }
    let sw = weight.sqrt();
    let width = hi - lo;
    match param {
        0 => sw / width,
        1 => -sw * a / (width * width),
        2 => sw * a / (width * width),
        _ => 0.0,
    }
}

pub fn lognormal_param_deriv(param: usize, x: f64, a: f64, s: f64, mu: f64, weight: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let sw = weight.sqrt();
    let y = x.ln() - mu;
    let g = (-y * y / (2.0 * s * s)).exp() / (SQRT_2PI * s * x);
    let f = a * g;
    match param {
        0 => sw * g,
        1 => sw * f * (y * y - s * s) / s.powi(3),
        2 => sw * f * y / (s * s),
        _ => 0.0,
    }
}

pub fn chi_squared_param_deriv(param: usize, x: f64, a: f64, n: f64, weight: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let sw = weight.sqrt();
    let p = ((n / 2.0 - 1.0) * x.ln() - x / 2.0 - n / 2.0 * LN_2 - ln_gamma(n / 2.0)).exp();
    match param {
        0 => sw * p,
        1 => sw * a * p * ((x / 2.0).ln() - digamma(n / 2.0)) / 2.0,
        _ => 0.0,
    }
}

pub fn f_dist_param_deriv(param: usize, x: f64, a: f64, n1: f64, n2: f64, weight: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let sw = weight.sqrt();
    let y = n2 + n1 * x;
    let p = crate::functions::f_dist(x, 1.0, n1, n2);
    let f = a * p;
    let psi = digamma((n1 + n2) / 2.0);
    match param {
        0 => sw * p,
        1 => sw * f / 2.0 * (psi - digamma(n1 / 2.0) + (n1 * x / y).ln() + n2 * (1.0 - x) / y),
        2 => sw * f / 2.0 * (psi - digamma(n2 / 2.0) + (n2 / y).ln() + n1 * (x - 1.0) / y),
        _ => 0.0,
    }
}

pub fn t_dist_param_deriv(param: usize, x: f64, a: f64, n: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    let p = crate::functions::t_dist(x, 1.0, n);
    let x2 = x * x;
    match param {
        0 => sw * p,
        1 => {
            sw * a * p / 2.0
                * (digamma((n + 1.0) / 2.0) - digamma(n / 2.0) - 1.0 / n - (x2 / n).ln_1p()
                    + (n + 1.0) * x2 / (n * (n + x2)))
        }
        _ => 0.0,
    }
}

/// Beta density, parameters `(A, a, b)`.
pub fn beta_param_deriv(param: usize, x: f64, amp: f64, a: f64, b: f64, weight: f64) -> f64 {
    if x <= 0.0 || x >= 1.0 {
        return 0.0;
    }
    let sw = weight.sqrt();
    let p = crate::functions::beta(x, 1.0, a, b);
    let f = amp * p;
    let psi = digamma(a + b);
    match param {
        0 => sw * p,
        1 => sw * f * (x.ln() - digamma(a) + psi),
        2 => sw * f * ((-x).ln_1p() - digamma(b) + psi),
        _ => 0.0,
    }
}

/// Pareto density, parameters `(A, a, b)`.
pub fn pareto_param_deriv(param: usize, x: f64, amp: f64, a: f64, b: f64, weight: f64) -> f64 {
    if x < b {
        return 0.0;
    }
    let sw = weight.sqrt();
    let p = a * b.powf(a) / x.powf(a + 1.0);
    let f = amp * p;
    match param {
        0 => sw * p,
        1 => sw * f * (1.0 / a + (b / x).ln()),
        2 => sw * f * a / b,
        _ => 0.0,
    }
}

pub fn weibull_param_deriv(param: usize, x: f64, a: f64, k: f64, l: f64, mu: f64, weight: f64) -> f64 {
    let y = (x - mu) / l;
    if y <= 0.0 {
        return 0.0;
    }
    let sw = weight.sqrt();
    let z = y.powf(k);
    let p = k / l * y.powf(k - 1.0) * (-z).exp();
    let f = a * p;
    match param {
        0 => sw * p,
        1 => sw * f * (1.0 / k + y.ln() * (1.0 - z)),
        2 => sw * f * k * (z - 1.0) / l,
        3 => sw * f * (k * z + 1.0 - k) / (y * l),
        _ => 0.0,
    }
}

pub fn frechet_param_deriv(param: usize, x: f64, a: f64, g: f64, s: f64, mu: f64, weight: f64) -> f64 {
    let y = (x - mu) / s;
    if y <= 0.0 {
        return 0.0;
    }
    let sw = weight.sqrt();
    let z = y.powf(-g);
    let p = g / s * y.powf(-1.0 - g) * (-z).exp();
    let f = a * p;
    match param {
        0 => sw * p,
        1 => sw * f * (1.0 / g - y.ln() + z * y.ln()),
        2 => sw * f * g * (1.0 - z) / s,
        3 => sw * f * (1.0 + g - g * z) / (y * s),
        _ => 0.0,
    }
}

/// Gumbel type 1, parameters `(A, s, mu, b)`.
pub fn gumbel1_param_deriv(param: usize, x: f64, a: f64, s: f64, mu: f64, b: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    let y = (x - mu) / s;
    let e = (-y).exp();
    let p = (-y - b * e).exp() / s;
    let f = a * p;
    match param {
        0 => sw * p,
        1 => sw * f * (y - 1.0 - b * y * e) / s,
        2 => sw * f * (1.0 - b * e) / s,
        3 => -sw * f * e,
        _ => 0.0,
    }
}

/// Gumbel type 2, parameters `(A, a, b, mu)`.
pub fn gumbel2_param_deriv(param: usize, x: f64, amp: f64, a: f64, b: f64, mu: f64, weight: f64) -> f64 {
    let y = x - mu;
    if y <= 0.0 {
        return 0.0;
    }
    let sw = weight.sqrt();
    let z = y.powf(-a);
    let p = a * b * y.powf(-a - 1.0) * (-b * z).exp();
    let f = amp * p;
    match param {
        0 => sw * p,
        1 => sw * f * (1.0 / a - y.ln() + b * z * y.ln()),
        2 => sw * f * (1.0 / b - z),
        3 => sw * f * ((a + 1.0) / y - a * b * z / y),
        _ => 0.0,
    }
}

pub fn poisson_param_deriv(param: usize, x: f64, a: f64, l: f64, weight: f64) -> f64 {
    let k = x.round();
    if k < 0.0 {
        return 0.0;
    }
    let sw = weight.sqrt();
    let p = (k * l.ln() - l - ln_gamma(k + 1.0)).exp();
    match param {
        0 => sw * p,
        1 => sw * a * p * (k - l) / l,
        _ => 0.0,
    }
}

pub fn bernoulli_param_deriv(param: usize, x: f64, a: f64, p: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    let (value, slope) = match x.round() as i64 {
        0 => (1.0 - p, -1.0),
        1 => (p, 1.0),
        _ => return 0.0,
    };
    match param {
        0 => sw * value,
        1 => sw * a * slope,
        _ => 0.0,
    }
}

pub fn binomial_param_deriv(param: usize, x: f64, a: f64, p: f64, n: f64, weight: f64) -> f64 {
    let k = x.round();
    if k < 0.0 || k > n || !(0.0..=1.0).contains(&p) {
        return 0.0;
    }
    let sw = weight.sqrt();
    let q = binomial_pmf(k, p, n);
    let f = a * q;
    match param {
        0 => sw * q,
        1 => sw * f * (k / p - (n - k) / (1.0 - p)),
        2 => sw * f * ((-p).ln_1p() + digamma(n + 1.0) - digamma(n - k + 1.0)),
        _ => 0.0,
    }
}

pub fn negative_binomial_param_deriv(param: usize, x: f64, a: f64, p: f64, n: f64, weight: f64) -> f64 {
    let k = x.round();
    if k < 0.0 || n <= 0.0 || p <= 0.0 || p > 1.0 {
        return 0.0;
    }
    let sw = weight.sqrt();
    let q = negative_binomial_pmf(k, p, n);
    let f = a * q;
    match param {
        0 => sw * q,
        1 => sw * f * (n / p - k / (1.0 - p)),
        2 => sw * f * (p.ln() + digamma(n + k) - digamma(n)),
        _ => 0.0,
    }
}

/// Pascal distribution: negative binomial at the rounded number of successes.
pub fn pascal_param_deriv(param: usize, x: f64, a: f64, p: f64, n: f64, weight: f64) -> f64 {
    negative_binomial_param_deriv(param, x, a, p, n.round(), weight)
}

pub fn geometric_param_deriv(param: usize, x: f64, a: f64, p: f64, weight: f64) -> f64 {
    let k = x.round();
    if k < 1.0 {
        return 0.0;
    }
    let sw = weight.sqrt();
    match param {
        0 => sw * p * (1.0 - p).powf(k - 1.0),
        1 => sw * a * (1.0 - p).powf(k - 2.0) * (1.0 - k * p),
        _ => 0.0,
    }
}

pub fn hypergeometric_param_deriv(param: usize, x: f64, a: f64, n1: f64, n2: f64, t: f64, weight: f64) -> f64 {
    let k = x.round();
    if !hypergeometric_support(k, n1, n2, t) {
        return 0.0;
    }
    let sw = weight.sqrt();
    let q = (ln_choose(n1, k) + ln_choose(n2, t - k) - ln_choose(n1 + n2, t)).exp();
    let f = a * q;
    let total = n1 + n2;
    match param {
        0 => sw * q,
        1 => sw * f * (digamma(n1 + 1.0) - digamma(n1 - k + 1.0) - digamma(total + 1.0) + digamma(total - t + 1.0)),
        2 => {
            sw * f
                * (digamma(n2 + 1.0) - digamma(n2 - t + k + 1.0) - digamma(total + 1.0)
                    + digamma(total - t + 1.0))
        }
        3 => {
            sw * f
                * (digamma(n2 - t + k + 1.0) - digamma(total - t + 1.0) - digamma(t - k + 1.0)
                    + digamma(t + 1.0))
        }
        _ => 0.0,
    }
}

pub fn logarithmic_param_deriv(param: usize, x: f64, a: f64, p: f64, weight: f64) -> f64 {
    let k = x.round();
    if k < 1.0 {
        return 0.0;
    }
    let sw = weight.sqrt();
    let l = (-p).ln_1p();
    let q = -p.powf(k) / (k * l);
    match param {
        0 => sw * q,
        1 => sw * a * q * (k / p + 1.0 / ((1.0 - p) * l)),
        _ => 0.0,
    }
}

pub fn maxwell_boltzmann_param_deriv(param: usize, x: f64, a: f64, s: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    let p = (2.0 / PI).sqrt() * x * x * (-x * x / (2.0 * s * s)).exp() / s.powi(3);
    match param {
        0 => sw * p,
        1 => sw * a * p * (x * x - 3.0 * s * s) / s.powi(3),
        _ => 0.0,
    }
}

pub fn sech_dist_param_deriv(param: usize, x: f64, a: f64, s: f64, mu: f64, weight: f64) -> f64 {
    let sw = weight.sqrt();
    let y = PI / 2.0 * (x - mu) / s;
    let p = sech(y) / (2.0 * s);
    let f = a * p;
    match param {
        0 => sw * p,
        1 => sw * f * (y * y.tanh() - 1.0) / s,
        2 => sw * f * y.tanh() * PI / (2.0 * s),
        _ => 0.0,
    }
}

pub fn levy_param_deriv(param: usize, x: f64, a: f64, g: f64, mu: f64, weight: f64) -> f64 {
    let y = x - mu;
    if y <= 0.0 {
        return 0.0;
    }
    let sw = weight.sqrt();
    let p = (g / (2.0 * PI)).sqrt() * y.powf(-1.5) * (-g / (2.0 * y)).exp();
    let f = a * p;
    match param {
        0 => sw * p,
        1 => sw * f * (y - g) / (2.0 * g * y),
        2 => sw * f * (3.0 * y - g) / (2.0 * y * y),
        _ => 0.0,
    }
}
