//! Mapping between unconstrained solver variables and bounded parameters.
//!
//! A side is open when its limit is infinite or the `f64::MAX` sentinel. With
//! both sides open the mapping is the identity, one open side uses
//! `sqrt(u² + 1)` and a closed interval uses `sin`.

use nsl_core::{NslError, NslResult};
use serde::{Deserialize, Serialize};

fn open_low(min: f64) -> bool {
    min <= -f64::MAX
}

fn open_high(max: f64) -> bool {
    max >= f64::MAX
}

fn check(min: f64, max: f64) -> NslResult<()> {
    // also rejects NaN limits
    if !(max > min) {
        log::warn!("rejecting parameter bounds [{min}, {max}]");
        return Err(NslError::InvalidBounds { min, max });
    }
    Ok(())
}

/// Maps the unconstrained value `u` into `[min, max]`.
pub fn map_bound(u: f64, min: f64, max: f64) -> NslResult<f64> {
    check(min, max)?;
    let x = match (open_low(min), open_high(max)) {
        (true, true) => u,
        (false, true) => min - 1.0 + (u * u + 1.0).sqrt(),
        (true, false) => max + 1.0 - (u * u + 1.0).sqrt(),
        (false, false) => min + (u.sin() + 1.0) * (max - min) / 2.0,
    };
    Ok(x)
}

/// Inverse of [`map_bound`]; `x` must lie within `[min, max]`.
///
/// Returns the principal branch: `u >= 0` for one open side and
/// `|u| <= pi/2` for a closed interval.
pub fn map_unbound(x: f64, min: f64, max: f64) -> NslResult<f64> {
    check(min, max)?;
    if !(x >= min && x <= max) {
        return Err(NslError::OutOfDomain { value: x, min, max });
    }
    let u = match (open_low(min), open_high(max)) {
        (true, true) => x,
        (false, true) => ((x - min + 1.0).powi(2) - 1.0).sqrt(),
        (true, false) => ((max - x + 1.0).powi(2) - 1.0).sqrt(),
        // clamp rounding just outside [-1, 1]
        (false, false) => (2.0 * (x - min) / (max - min) - 1.0).clamp(-1.0, 1.0).asin(),
    };
    Ok(u)
}

/// Lower and upper limit of a fit parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl Bounds {
    pub const UNBOUNDED: Bounds = Bounds {
        min: -f64::MAX,
        max: f64::MAX,
    };

    pub fn new(min: f64, max: f64) -> NslResult<Self> {
        check(min, max)?;
        Ok(Self { min, max })
    }

    pub fn lower(min: f64) -> Self {
        Self { min, max: f64::MAX }
    }

    pub fn upper(max: f64) -> Self {
        Self { min: -f64::MAX, max }
    }

    pub fn is_unbounded(&self) -> bool {
        open_low(self.min) && open_high(self.max)
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }

    pub fn map_bound(&self, u: f64) -> NslResult<f64> {
        map_bound(u, self.min, self.max)
    }

    pub fn map_unbound(&self, x: f64) -> NslResult<f64> {
        map_unbound(x, self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_is_identity() {
        assert_eq!(map_bound(3.5, -f64::MAX, f64::MAX).unwrap(), 3.5);
        assert_eq!(map_bound(-2.0, f64::NEG_INFINITY, f64::INFINITY).unwrap(), -2.0);
        assert_eq!(map_unbound(-7.25, -f64::MAX, f64::MAX).unwrap(), -7.25);
        assert!(Bounds::default().is_unbounded());
    }

    #[test]
    fn test_one_sided() {
        // min + sqrt(u^2 + 1) - 1
        let x = map_bound(0.0, 2.0, f64::MAX).unwrap();
        assert_eq!(x, 2.0);
        let x = map_bound(3.0, 2.0, f64::INFINITY).unwrap();
        assert!((x - (1.0 + 10f64.sqrt())).abs() < 1e-15);
        assert!(map_bound(-50.0, 2.0, f64::MAX).unwrap() >= 2.0);

        // max + 1 - sqrt(u^2 + 1)
        let x = map_bound(3.0, f64::NEG_INFINITY, 2.0).unwrap();
        assert!((x - (3.0 - 10f64.sqrt())).abs() < 1e-15);
        assert!(map_bound(50.0, -f64::MAX, 2.0).unwrap() <= 2.0);
    }

    #[test]
    fn test_closed_interval() {
        let (min, max) = (-1.0, 3.0);
        assert!((map_bound(0.0, min, max).unwrap() - 1.0).abs() < 1e-15);
        assert!((map_bound(std::f64::consts::FRAC_PI_2, min, max).unwrap() - 3.0).abs() < 1e-15);
        assert!((map_bound(-std::f64::consts::FRAC_PI_2, min, max).unwrap() + 1.0).abs() < 1e-15);
        for k in -20..=20 {
            let x = map_bound(k as f64 * 0.77, min, max).unwrap();
            assert!((min..=max).contains(&x), "{x}");
        }
    }

    #[test]
    fn test_inverse_law() {
        let regimes = [(2.0, f64::MAX), (-f64::MAX, 2.0), (-1.0, 3.0), (-f64::MAX, f64::MAX)];
        for (min, max) in regimes {
            let branch = if open_low(min) || open_high(max) { 0.0..=25.0 } else { -1.5..=1.5 };
            for k in 0..=40 {
                let u = branch.start() + (branch.end() - branch.start()) * k as f64 / 40.0;
                if open_low(min) && open_high(max) {
                    assert_eq!(map_unbound(map_bound(u, min, max).unwrap(), min, max).unwrap(), u);
                    continue;
                }
                let back = map_unbound(map_bound(u, min, max).unwrap(), min, max).unwrap();
                assert!((back - u).abs() < 1e-6 * u.abs().max(1.0), "[{min}, {max}] u={u}: {back}");
            }
        }
    }

    #[test]
    fn test_bound_after_unbound() {
        let b = Bounds::new(0.5, 4.0).unwrap();
        for x in [0.5, 0.7, 2.0, 3.99, 4.0] {
            let u = b.map_unbound(x).unwrap();
            assert!((b.map_bound(u).unwrap() - x).abs() < 1e-12);
        }
        let b = Bounds::lower(1.0);
        for x in [1.0, 1.5, 100.0] {
            let u = b.map_unbound(x).unwrap();
            assert!(u >= 0.0);
            assert!((b.map_bound(u).unwrap() - x).abs() < 1e-12 * x);
        }
        let b = Bounds::upper(1.0);
        for x in [1.0, -1.5, -100.0] {
            let u = b.map_unbound(x).unwrap();
            assert!((b.map_bound(u).unwrap() - x).abs() < 1e-12 * x.abs());
        }
    }

    #[test]
    fn test_invalid_bounds() {
        assert_eq!(map_bound(1.0, 5.0, 2.0), Err(NslError::InvalidBounds { min: 5.0, max: 2.0 }));
        assert!(map_bound(1.0, 2.0, 2.0).is_err());
        assert!(map_unbound(1.0, 5.0, 2.0).is_err());
        assert!(Bounds::new(1.0, f64::NAN).is_err());
        assert_eq!(
            map_unbound(4.5, 1.0, 3.0),
            Err(NslError::OutOfDomain {
                value: 4.5,
                min: 1.0,
                max: 3.0
            })
        );
        assert!(map_unbound(0.0, 1.0, f64::MAX).is_err());
    }

    #[test]
    fn test_contains() {
        let b = Bounds::new(-1.0, 1.0).unwrap();
        assert!(b.contains(0.0) && b.contains(1.0) && !b.contains(1.01));
        assert!(Bounds::UNBOUNDED.contains(1e300));
    }
}
