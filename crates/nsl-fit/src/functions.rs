//! Closed-form model functions.
//!
//! Parameter order matches the derivative functions in [`crate::deriv`].
//! Densities with a restricted support return 0 outside of it; discrete
//! distributions evaluate at `k = round(x)`.

use nsl_sf::{erf, erfc, gamma, landau_pdf, ln_gamma, sech, voigt};
use std::f64::consts::{LN_2, PI, SQRT_2};

pub(crate) const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

pub(crate) fn gauss_pdf(y: f64, s: f64) -> f64 {
    (-y * y / (2.0 * s * s)).exp() / (SQRT_2PI * s)
}

pub(crate) fn cauchy_pdf(y: f64, g: f64) -> f64 {
    g / (PI * (g * g + y * y))
}

// ln C(a, b) for real arguments
pub(crate) fn ln_choose(a: f64, b: f64) -> f64 {
    ln_gamma(a + 1.0) - ln_gamma(b + 1.0) - ln_gamma(a - b + 1.0)
}

// ─── Basic ──────────────────────────────────────────────────────────────────

pub fn polynomial(x: f64, coeffs: &[f64]) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

pub fn power1(x: f64, a: f64, b: f64) -> f64 {
    a * x.powf(b)
}

pub fn power2(x: f64, a: f64, b: f64, c: f64) -> f64 {
    a + b * x.powf(c)
}

/// Sum of `a_i exp(b_i x)` over the `(a_i, b_i)` pairs in `p`.
pub fn exponential(x: f64, p: &[f64]) -> f64 {
    p.chunks_exact(2).map(|ab| ab[0] * (ab[1] * x).exp()).sum()
}

pub fn inverse_exponential(x: f64, a: f64, b: f64, c: f64) -> f64 {
    a * (1.0 - (b * x).exp()) + c
}

/// `p = [w, a0, a1, b1, ..., an, bn]`.
pub fn fourier(x: f64, p: &[f64]) -> f64 {
    let Some((&w, rest)) = p.split_first() else {
        return 0.0;
    };
    let Some((&a0, pairs)) = rest.split_first() else {
        return 0.0;
    };
    pairs
        .chunks_exact(2)
        .enumerate()
        .fold(a0, |acc, (k, ab)| {
            let kwx = (k + 1) as f64 * w * x;
            acc + ab[0] * kwx.cos() + ab[1] * kwx.sin()
        })
}

// ─── Peak ───────────────────────────────────────────────────────────────────

pub fn gaussian(x: f64, a: f64, s: f64, mu: f64) -> f64 {
    a * gauss_pdf(x - mu, s)
}

pub fn lorentz(x: f64, a: f64, g: f64, mu: f64) -> f64 {
    a * cauchy_pdf(x - mu, g)
}

pub fn sech_peak(x: f64, a: f64, s: f64, mu: f64) -> f64 {
    a / (PI * s) * sech((x - mu) / s)
}

pub fn logistic(x: f64, a: f64, s: f64, mu: f64) -> f64 {
    a / (4.0 * s) * sech((x - mu) / (2.0 * s)).powi(2)
}

pub fn voigt_peak(x: f64, a: f64, mu: f64, s: f64, g: f64) -> f64 {
    a * voigt(x - mu, s, g)
}

/// Pseudo-Voigt with a common FWHM-type width `w` for both components.
pub fn pseudo_voigt1(x: f64, a: f64, eta: f64, w: f64, mu: f64) -> f64 {
    let y = x - mu;
    let sigma = w / (2.0 * LN_2).sqrt();
    a * (eta * cauchy_pdf(y, w) + (1.0 - eta) * gauss_pdf(y, sigma))
}

// ─── Growth ─────────────────────────────────────────────────────────────────

pub fn atan(x: f64, a: f64, mu: f64, s: f64) -> f64 {
    a * ((x - mu) / s).atan()
}

pub fn tanh(x: f64, a: f64, mu: f64, s: f64) -> f64 {
    a * ((x - mu) / s).tanh()
}

pub fn algebraic_sigmoid(x: f64, a: f64, mu: f64, s: f64) -> f64 {
    let y = (x - mu) / s;
    a * y / (1.0 + y * y).sqrt()
}

pub fn sigmoid(x: f64, a: f64, mu: f64, k: f64) -> f64 {
    a / (1.0 + (-k * (x - mu)).exp())
}

pub fn erf_growth(x: f64, a: f64, mu: f64, s: f64) -> f64 {
    a / 2.0 * erf((x - mu) / (SQRT_2 * s))
}

pub fn hill(x: f64, a: f64, n: f64, s: f64) -> f64 {
    let y = (x / s).powf(n);
    a * y / (1.0 + y)
}

pub fn gompertz(x: f64, a: f64, b: f64, c: f64) -> f64 {
    a * (-b * (-c * x).exp()).exp()
}

pub fn gudermann(x: f64, a: f64, mu: f64, s: f64) -> f64 {
    a * ((x - mu) / s).tanh().asin()
}

// ─── Distributions ──────────────────────────────────────────────────────────

pub fn gaussian_tail(x: f64, a: f64, s: f64, tail: f64, mu: f64) -> f64 {
    let y = x - mu;
    if y < tail {
        return 0.0;
    }
    let norm = erfc(tail / (SQRT_2 * s)) / 2.0;
    a * gauss_pdf(y, s) / norm
}

pub fn exponential_dist(x: f64, a: f64, l: f64, mu: f64) -> f64 {
    if x < mu {
        return 0.0;
    }
    a * l * (-l * (x - mu)).exp()
}

pub fn laplace(x: f64, a: f64, s: f64, mu: f64) -> f64 {
    a / (2.0 * s) * (-(x - mu).abs() / s).exp()
}

pub fn exponential_power(x: f64, a: f64, s: f64, b: f64, mu: f64) -> f64 {
    let y = ((x - mu) / s).abs();
    a / (2.0 * s * gamma(1.0 + 1.0 / b)) * (-y.powf(b)).exp()
}

pub fn rayleigh(x: f64, a: f64, s: f64) -> f64 {
    let y = x / s;
    a * y / s * (-y * y / 2.0).exp()
}

pub fn rayleigh_tail(x: f64, a: f64, s: f64, mu: f64) -> f64 {
    if x < mu {
        return 0.0;
    }
    a * x / (s * s) * ((mu * mu - x * x) / (2.0 * s * s)).exp()
}

pub fn landau(x: f64, a: f64) -> f64 {
    a * landau_pdf(x)
}

pub fn gamma_dist(x: f64, a: f64, k: f64, t: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    a * ((k - 1.0) * x.ln() - x / t - ln_gamma(k) - k * t.ln()).exp()
}

/// Uniform density on `[lo, hi]`; parameters are ordered `(A, hi, lo)`.
pub fn flat(x: f64, a: f64, hi: f64, lo: f64) -> f64 {
    if x < lo || x > hi {
        return 0.0;
    }
    a / (hi - lo)
}

pub fn lognormal(x: f64, a: f64, s: f64, mu: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let y = x.ln() - mu;
    a / (SQRT_2PI * s * x) * (-y * y / (2.0 * s * s)).exp()
}

pub fn chi_squared(x: f64, a: f64, n: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    a * ((n / 2.0 - 1.0) * x.ln() - x / 2.0 - n / 2.0 * LN_2 - ln_gamma(n / 2.0)).exp()
}

pub fn f_dist(x: f64, a: f64, n1: f64, n2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let y = n2 + n1 * x;
    a * (ln_gamma((n1 + n2) / 2.0) - ln_gamma(n1 / 2.0) - ln_gamma(n2 / 2.0)
        + n1 / 2.0 * n1.ln()
        + n2 / 2.0 * n2.ln()
        + (n1 / 2.0 - 1.0) * x.ln()
        - (n1 + n2) / 2.0 * y.ln())
    .exp()
}

pub fn t_dist(x: f64, a: f64, n: f64) -> f64 {
    a * (ln_gamma((n + 1.0) / 2.0) - ln_gamma(n / 2.0) - 0.5 * (n * PI).ln()
        - (n + 1.0) / 2.0 * (x * x / n).ln_1p())
    .exp()
}

pub fn beta(x: f64, amp: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 || x >= 1.0 {
        return 0.0;
    }
    amp * (ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + (a - 1.0) * x.ln() + (b - 1.0) * (-x).ln_1p()).exp()
}

pub fn pareto(x: f64, amp: f64, a: f64, b: f64) -> f64 {
    if x < b {
        return 0.0;
    }
    amp * a * b.powf(a) / x.powf(a + 1.0)
}

pub fn weibull(x: f64, a: f64, k: f64, l: f64, mu: f64) -> f64 {
    let y = (x - mu) / l;
    if y <= 0.0 {
        return 0.0;
    }
    a * k / l * y.powf(k - 1.0) * (-y.powf(k)).exp()
}

pub fn frechet(x: f64, a: f64, g: f64, s: f64, mu: f64) -> f64 {
    let y = (x - mu) / s;
    if y <= 0.0 {
        return 0.0;
    }
    a * g / s * y.powf(-1.0 - g) * (-y.powf(-g)).exp()
}

pub fn gumbel1(x: f64, a: f64, s: f64, mu: f64, b: f64) -> f64 {
    let y = (x - mu) / s;
    a / s * (-y - b * (-y).exp()).exp()
}

pub fn gumbel2(x: f64, amp: f64, a: f64, b: f64, mu: f64) -> f64 {
    let y = x - mu;
    if y <= 0.0 {
        return 0.0;
    }
    amp * a * b * y.powf(-a - 1.0) * (-b * y.powf(-a)).exp()
}

pub fn poisson(x: f64, a: f64, l: f64) -> f64 {
    let k = x.round();
    if k < 0.0 {
        return 0.0;
    }
    a * (k * l.ln() - l - ln_gamma(k + 1.0)).exp()
}

pub fn bernoulli(x: f64, a: f64, p: f64) -> f64 {
    match x.round() as i64 {
        0 => a * (1.0 - p),
        1 => a * p,
        _ => 0.0,
    }
}

pub(crate) fn binomial_pmf(k: f64, p: f64, n: f64) -> f64 {
    (ln_choose(n, k) + k * p.ln() + (n - k) * (-p).ln_1p()).exp()
}

pub fn binomial(x: f64, a: f64, p: f64, n: f64) -> f64 {
    let k = x.round();
    if k < 0.0 || k > n || !(0.0..=1.0).contains(&p) {
        return 0.0;
    }
    a * binomial_pmf(k, p, n)
}

pub(crate) fn negative_binomial_pmf(k: f64, p: f64, n: f64) -> f64 {
    (ln_gamma(n + k) - ln_gamma(k + 1.0) - ln_gamma(n) + n * p.ln() + k * (-p).ln_1p()).exp()
}

pub fn negative_binomial(x: f64, a: f64, p: f64, n: f64) -> f64 {
    let k = x.round();
    if k < 0.0 || n <= 0.0 || p <= 0.0 || p > 1.0 {
        return 0.0;
    }
    a * negative_binomial_pmf(k, p, n)
}

/// Negative binomial restricted to an integer number of successes.
pub fn pascal(x: f64, a: f64, p: f64, n: f64) -> f64 {
    negative_binomial(x, a, p, n.round())
}

pub fn geometric(x: f64, a: f64, p: f64) -> f64 {
    let k = x.round();
    if k < 1.0 {
        return 0.0;
    }
    a * p * (1.0 - p).powf(k - 1.0)
}

pub(crate) fn hypergeometric_support(k: f64, n1: f64, n2: f64, t: f64) -> bool {
    k >= (t - n2).max(0.0) && k <= t.min(n1)
}

pub fn hypergeometric(x: f64, a: f64, n1: f64, n2: f64, t: f64) -> f64 {
    let k = x.round();
    if !hypergeometric_support(k, n1, n2, t) {
        return 0.0;
    }
    a * (ln_choose(n1, k) + ln_choose(n2, t - k) - ln_choose(n1 + n2, t)).exp()
}

pub fn logarithmic(x: f64, a: f64, p: f64) -> f64 {
    let k = x.round();
    if k < 1.0 {
        return 0.0;
    }
    -a * p.powf(k) / (k * (-p).ln_1p())
}

pub fn maxwell_boltzmann(x: f64, a: f64, s: f64) -> f64 {
    a * (2.0 / PI).sqrt() * x * x * (-x * x / (2.0 * s * s)).exp() / s.powi(3)
}

pub fn sech_dist(x: f64, a: f64, s: f64, mu: f64) -> f64 {
    a / (2.0 * s) * sech(PI / 2.0 * (x - mu) / s)
}

pub fn levy(x: f64, a: f64, g: f64, mu: f64) -> f64 {
    let y = x - mu;
    if y <= 0.0 {
        return 0.0;
    }
    a * (g / (2.0 * PI)).sqrt() * y.powf(-1.5) * (-g / (2.0 * y)).exp()
}
