//! Per-point fit weights derived from data or error columns.

use nsl_core::{NslError, NslResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest error accepted before a weight is computed from it.
const MIN_ERROR: f64 = 1e-199;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum WeightType {
    #[default]
    No = 0,
    /// `1/err²`
    Instrumental = 1,
    /// `err`
    Direct = 2,
    /// `1/err`
    Inverse = 3,
    /// `1/y`
    Statistical = 4,
    /// `1/f(x)`, recomputed from the model during the fit
    StatisticalFit = 5,
    /// `1/y²`
    Relative = 6,
    /// `1/f(x)²`, recomputed from the model during the fit
    RelativeFit = 7,
}

impl WeightType {
    pub const ALL: [Self; 8] = [
        Self::No,
        Self::Instrumental,
        Self::Direct,
        Self::Inverse,
        Self::Statistical,
        Self::StatisticalFit,
        Self::Relative,
        Self::RelativeFit,
    ];

    pub fn from_i32(v: i32) -> Option<Self> {
        Self::ALL.get(usize::try_from(v).ok()?).copied()
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Instrumental => "Instrumental (1/col^2)",
            Self::Direct => "Direct (col)",
            Self::Inverse => "Inverse (1/col)",
            Self::Statistical => "Statistical (1/data)",
            Self::StatisticalFit => "Statistical (Fit)",
            Self::Relative => "Relative (1/data^2)",
            Self::RelativeFit => "Relative (Fit)",
        }
    }

    /// Whether the weight is computed from an error column.
    pub fn needs_errors(self) -> bool {
        matches!(self, Self::Instrumental | Self::Direct | Self::Inverse)
    }

    /// Weight of a single point with value `y` and error `err`.
    ///
    /// The fit-dependent types return 1 here; the solver replaces them with
    /// model values on each iteration.
    pub fn weight(self, y: f64, err: f64) -> f64 {
        match self {
            Self::No | Self::StatisticalFit | Self::RelativeFit => 1.0,
            Self::Instrumental => 1.0 / err.max(MIN_ERROR.sqrt().max(y.abs() * 1e-15)).powi(2),
            Self::Direct => err,
            Self::Inverse => 1.0 / err.max(MIN_ERROR.max(y.abs() * 1e-15)),
            Self::Statistical => 1.0 / y.max(MIN_ERROR),
            Self::Relative => 1.0 / (y * y).max(MIN_ERROR),
        }
    }
}

impl fmt::Display for WeightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Weights for a whole data column.
pub fn weights(kind: WeightType, ys: &[f64], errors: Option<&[f64]>) -> NslResult<Vec<f64>> {
    match errors {
        Some(errs) if errs.len() != ys.len() => Err(NslError::LengthMismatch {
            expected: ys.len(),
            actual: errs.len(),
        }),
        Some(errs) => Ok(ys.iter().zip(errs).map(|(&y, &e)| kind.weight(y, e)).collect()),
        None if kind.needs_errors() => Err(NslError::InvalidParameter(format!(
            "weight type '{kind}' needs an error column"
        ))),
        None => Ok(ys.iter().map(|&y| kind.weight(y, 0.0)).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_formulas() {
        assert_eq!(WeightType::No.weight(5.0, 2.0), 1.0);
        assert_eq!(WeightType::Instrumental.weight(5.0, 2.0), 0.25);
        assert_eq!(WeightType::Direct.weight(5.0, 2.0), 2.0);
        assert_eq!(WeightType::Inverse.weight(5.0, 2.0), 0.5);
        assert_eq!(WeightType::Statistical.weight(4.0, 0.0), 0.25);
        assert_eq!(WeightType::Relative.weight(4.0, 0.0), 1.0 / 16.0);
        assert_eq!(WeightType::RelativeFit.weight(4.0, 0.0), 1.0);
    }

    #[test]
    fn test_zero_errors_stay_finite() {
        assert!(WeightType::Instrumental.weight(0.0, 0.0).is_finite());
        assert!(WeightType::Inverse.weight(0.0, 0.0).is_finite());
        assert!(WeightType::Statistical.weight(0.0, 0.0).is_finite());
        // floor relative to the data value
        assert_eq!(WeightType::Inverse.weight(1e3, 0.0), 1.0 / (1e3 * 1e-15));
    }

    #[test]
    fn test_column_weights() {
        let w = weights(WeightType::Instrumental, &[1.0, 2.0], Some(&[0.5, 0.25])).unwrap();
        assert_eq!(w, vec![4.0, 16.0]);
        assert!(weights(WeightType::Direct, &[1.0], None).is_err());
        assert!(weights(WeightType::No, &[1.0, 2.0], Some(&[1.0])).is_err());
        assert_eq!(weights(WeightType::No, &[1.0, 2.0], None).unwrap(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_tags() {
        for (i, t) in WeightType::ALL.iter().enumerate() {
            assert_eq!(WeightType::from_i32(i as i32), Some(*t));
            assert_eq!(t.as_i32(), i as i32);
        }
        assert_eq!(WeightType::from_i32(8), None);
    }
}
