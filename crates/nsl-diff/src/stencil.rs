/// Finite-difference weights on arbitrary grids (B. Fornberg, Math. Comp. 51
/// (1988) 699).
///
/// Returns the weights `w` such that `Σ w_j f(xs[j])` approximates the
/// `order`-th derivative of `f` at `x0`. The rule is exact for polynomials of
/// degree below `xs.len()`.
pub fn fd_weights(x0: f64, xs: &[f64], order: usize) -> Vec<f64> {
    let n = xs.len();
    if n == 0 {
        return Vec::new();
    }
    let m = order;
    let mut c = vec![vec![0.0; m + 1]; n];
    let mut c1 = 1.0;
    let mut c4 = xs[0] - x0;
    c[0][0] = 1.0;

    for i in 1..n {
        let mn = i.min(m);
        let mut c2 = 1.0;
        let c5 = c4;
        c4 = xs[i] - x0;
        for j in 0..i {
            let c3 = xs[i] - xs[j];
            c2 *= c3;
            if j == i - 1 {
                for k in (1..=mn).rev() {
                    c[i][k] = c1 * (k as f64 * c[i - 1][k - 1] - c5 * c[i - 1][k]) / c2;
                }
                c[i][0] = -c1 * c5 * c[i - 1][0] / c2;
            }
            for k in (1..=mn).rev() {
                c[j][k] = (c4 * c[j][k] - k as f64 * c[j][k - 1]) / c3;
            }
            c[j][0] = c4 * c[j][0] / c3;
        }
        c1 = c2;
    }
    c.into_iter().map(|row| row[m]).collect()
}
