//! Landau probability density.
//!
//! p(x) = 1/π ∫₀^∞ exp(-t ln t - x t) sin(π t) dt, integrated with composite
//! 16-point Gauss-Legendre panels. Far in the left tail the saddle-point
//! asymptote takes over.

use std::f64::consts::PI;
use std::sync::OnceLock;

const ORDER: usize = 16;
const LEFT_TAIL: f64 = -3.5;

struct GaussLegendre {
    nodes: [f64; ORDER],
    weights: [f64; ORDER],
}

// Legendre P_n and P_{n-1} at x.
fn legendre(n: usize, x: f64) -> (f64, f64) {
    let (mut p0, mut p1) = (1.0, x);
    for k in 2..=n {
        let kf = k as f64;
        let p2 = ((2.0 * kf - 1.0) * x * p1 - (kf - 1.0) * p0) / kf;
        p0 = p1;
        p1 = p2;
    }
    (p1, p0)
}

fn gauss_legendre() -> &'static GaussLegendre {
    static RULE: OnceLock<GaussLegendre> = OnceLock::new();
    RULE.get_or_init(|| {
        let mut nodes = [0.0; ORDER];
        let mut weights = [0.0; ORDER];
        let nf = ORDER as f64;
        for i in 0..ORDER {
            let mut x = (PI * (i as f64 + 0.75) / (nf + 0.5)).cos();
            for _ in 0..100 {
                let (pn, pm) = legendre(ORDER, x);
                let dp = nf * (x * pn - pm) / (x * x - 1.0);
                let dx = pn / dp;
                x -= dx;
                if dx.abs() < 1e-16 {
                    break;
                }
            }
            let (pn, pm) = legendre(ORDER, x);
            let dp = nf * (x * pn - pm) / (x * x - 1.0);
            nodes[i] = x;
            weights[i] = 2.0 / ((1.0 - x * x) * dp * dp);
        }
        GaussLegendre { nodes, weights }
    })
}

fn integrand(t: f64, x: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    (-t * t.ln() - x * t).exp() * (PI * t).sin()
}

/// Landau density at `x`.
pub fn landau_pdf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x < LEFT_TAIL {
        let u = (-x - 1.0).exp();
        return (u / (2.0 * PI)).sqrt() * (-u).exp() * (1.0 + 1.0 / (24.0 * u));
    }

    // integrate until exp(-t ln t - x t) is below e^-45
    let mut upper = 1.0_f64;
    while upper * upper.ln() + x * upper < 45.0 {
        upper *= 1.25;
    }
    let width = 0.25_f64.min(1.0 / (1.0 + x.abs()));
    let panels = (upper / width).ceil().max(1.0) as usize;
    let h = upper / panels as f64;

    let rule = gauss_legendre();
    let mut sum = 0.0;
    for p in 0..panels {
        let mid = (p as f64 + 0.5) * h;
        for (node, weight) in rule.nodes.iter().zip(&rule.weights) {
            sum += weight * integrand(mid + 0.5 * h * node, x);
        }
    }
    sum * h / (2.0 * PI)
}
