/// Processing operations on an x/y signal
///
/// Each operation works on a Signal in place and records itself in the
/// reproducibility log as a replayable pipeline step.

use nsl_core::{DerivOrder, DftResultType, DftXScale, HilbertResultType, NslError, NslResult, WindowType};
use nsl_fit::{FitModel, WeightType};
use serde::{Deserialize, Serialize};

use crate::data::{DataError, DataTable};
use crate::log::reproducibility::ReproLog;

/// The x/y pair a pipeline works on, with an optional error column.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub x_name: String,
    pub y_name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub errors: Option<Vec<f64>>,
}

impl Signal {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x_name: "x".into(),
            y_name: "y".into(),
            x,
            y,
            errors: None,
        }
    }

    /// Picks the x, y and error columns of `table`.
    ///
    /// Rows with a NaN in any picked column or an x outside `x_range` are dropped.
    pub fn from_table(
        table: &DataTable,
        x_column: usize,
        y_column: usize,
        error_column: Option<usize>,
        x_range: Option<(f64, f64)>,
    ) -> Result<Self, DataError> {
        let xs = table.column(x_column)?;
        let ys = table.column(y_column)?;
        let es = error_column.map(|c| table.column(c)).transpose()?;

        let mut signal = Signal {
            x_name: table.name(x_column).unwrap_or("x").to_string(),
            y_name: table.name(y_column).unwrap_or("y").to_string(),
            x: Vec::with_capacity(xs.len()),
            y: Vec::with_capacity(ys.len()),
            errors: es.map(|_| Vec::with_capacity(xs.len())),
        };
        for (row, (&x, &y)) in xs.iter().zip(ys).enumerate() {
            let err = es.map(|e| e[row]);
            if x.is_nan() || y.is_nan() || err.is_some_and(f64::is_nan) {
                continue;
            }
            if let Some((min, max)) = x_range {
                if x < min || x > max {
                    continue;
                }
            }
            signal.x.push(x);
            signal.y.push(y);
            if let (Some(errors), Some(err)) = (signal.errors.as_mut(), err) {
                errors.push(err);
            }
        }
        let dropped = table.row_count() - signal.len();
        if dropped > 0 {
            log::debug!("Dropped {dropped} rows (NaN or outside the x range)");
        }
        Ok(signal)
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn into_table(self) -> DataTable {
        DataTable {
            names: vec![self.x_name, self.y_name],
            columns: vec![self.x, self.y],
        }
    }

    fn x_extent(&self) -> (f64, f64) {
        self.x
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}

/// One step of a processing pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ProcessingOp {
    /// Multiplies y by a window function.
    Window { window: WindowType },
    /// Replaces the signal by its DFT; x becomes the frequency, index or period axis.
    Dft {
        result: DftResultType,
        #[serde(default)]
        two_sided: bool,
        #[serde(default)]
        shifted: bool,
        #[serde(default)]
        window: WindowType,
    },
    Hilbert { result: HilbertResultType },
    /// Numerical derivative of y with respect to x.
    Differentiate {
        order: DerivOrder,
        #[serde(default)]
        accuracy: Option<usize>,
    },
    /// Replaces y by the model evaluated at x; missing params use the start values.
    EvaluateModel {
        model: FitModel,
        #[serde(default)]
        params: Option<Vec<f64>>,
    },
    /// Replaces y by `∂(√w f)/∂p` of the model at x.
    ParamDerivative {
        model: FitModel,
        #[serde(default)]
        params: Option<Vec<f64>>,
        param: usize,
        /// Weight type applied to the current y (and error) column.
        #[serde(default)]
        weight: WeightType,
    },
}

impl std::fmt::Display for ProcessingOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingOp::Window { window } => write!(f, "Window: {}", window),
            ProcessingOp::Dft {
                result,
                two_sided,
                shifted,
                window,
            } => {
                write!(f, "DFT: {}", result)?;
                if *two_sided {
                    write!(f, ", two-sided")?;
                }
                if *shifted {
                    write!(f, ", shifted")?;
                }
                if *window != WindowType::Uniform {
                    write!(f, ", {} window", window)?;
                }
                Ok(())
            }
            ProcessingOp::Hilbert { result } => write!(f, "Hilbert Transform: {}", result),
            ProcessingOp::Differentiate { order, accuracy } => match accuracy {
                Some(a) => write!(f, "Derivative: {} (accuracy {})", order, a),
                None => write!(f, "Derivative: {}", order),
            },
            ProcessingOp::EvaluateModel { model, .. } => write!(f, "Model: {}", model),
            ProcessingOp::ParamDerivative { model, param, .. } => {
                write!(f, "Parameter Derivative: {} (p{})", model, param)
            }
        }
    }
}

/// Applies `op` to `signal` and records it in `log`.
///
/// On error the signal is left unchanged and nothing is logged.
pub fn apply(op: &ProcessingOp, signal: &mut Signal, x_scale: DftXScale, log: &mut ReproLog) -> NslResult<()> {
    let description = match op {
        ProcessingOp::Window { window } => apply_window(signal, *window)?,
        ProcessingOp::Dft {
            result,
            two_sided,
            shifted,
            window,
        } => apply_dft(signal, *result, *two_sided, *shifted, *window, x_scale)?,
        ProcessingOp::Hilbert { result } => apply_hilbert(signal, *result)?,
        ProcessingOp::Differentiate { order, accuracy } => apply_derivative(signal, *order, *accuracy)?,
        ProcessingOp::EvaluateModel { model, params } => apply_model(signal, model, params.as_deref())?,
        ProcessingOp::ParamDerivative {
            model,
            params,
            param,
            weight,
        } => apply_param_derivative(signal, model, params.as_deref(), *param, *weight)?,
    };
    log.add_op(op, &description);
    Ok(())
}

fn apply_window(signal: &mut Signal, window: WindowType) -> NslResult<String> {
    let n = signal.len();
    nsl_sf::apply_window(&mut signal.y, n, window)?;
    Ok(format!("{} window over {} samples", window, n))
}

fn apply_dft(
    signal: &mut Signal,
    result: DftResultType,
    two_sided: bool,
    shifted: bool,
    window: WindowType,
    x_scale: DftXScale,
) -> NslResult<String> {
    let n = signal.len();
    let mut y = signal.y.clone();
    let count = nsl_dft::dft_transform_window(&mut y, 1, n, two_sided, result, window)?;
    y.truncate(count);

    let shift = shifted && two_sided && result != DftResultType::Raw;
    if shifted && !shift {
        log::warn!("Shift needs two-sided, non-raw DFT output; leaving bins unshifted");
    }
    let (xmin, xmax) = signal.x_extent();
    let mut x = nsl_dft::x_axis(n, count, xmin, xmax, x_scale, shift);
    if shift {
        nsl_dft::shift_two_sided(&mut x);
        nsl_dft::shift_two_sided(&mut y);
    }

    signal.x = x;
    signal.y = y;
    signal.errors = None;
    signal.x_name = x_scale.name().to_lowercase();
    signal.y_name = format!("dft({})", signal.y_name);
    Ok(format!(
        "{} samples over [{}, {}] -> {} {} values",
        n, xmin, xmax, count, result
    ))
}

fn apply_hilbert(signal: &mut Signal, result: HilbertResultType) -> NslResult<String> {
    let n = signal.len();
    nsl_dft::hilbert_transform(&mut signal.y, 1, n, result)?;
    signal.y_name = format!("hilbert({})", signal.y_name);
    Ok(format!("{} of {} samples", result, n))
}

fn apply_derivative(signal: &mut Signal, order: DerivOrder, accuracy: Option<usize>) -> NslResult<String> {
    let accuracy = accuracy.unwrap_or(order.accuracies()[0]);
    let mut y = signal.y.clone();
    nsl_diff::derivative(&signal.x, &mut y, order, accuracy)?;
    signal.y = y;
    signal.y_name = format!("d{}({})", order.order(), signal.y_name);
    Ok(format!(
        "{} derivative, accuracy order {}, {} points",
        order,
        accuracy,
        signal.len()
    ))
}

fn apply_model(signal: &mut Signal, model: &FitModel, params: Option<&[f64]>) -> NslResult<String> {
    let start = model.start_values();
    let params = params.unwrap_or(&start);
    signal.y = model.eval_all(&signal.x, params)?;
    signal.y_name = model.name().to_string();
    Ok(format!("{} at {} points, params {:?}", model.equation(), signal.len(), params))
}

fn apply_param_derivative(
    signal: &mut Signal,
    model: &FitModel,
    params: Option<&[f64]>,
    param: usize,
    weight: WeightType,
) -> NslResult<String> {
    let names = model.param_names();
    let Some(name) = names.get(param) else {
        return Err(NslError::InvalidParameter(format!(
            "{} has no parameter {} ({} parameters)",
            model,
            param,
            names.len()
        )));
    };
    let start = model.start_values();
    let params = params.unwrap_or(&start);
    let weights = nsl_fit::weights(weight, &signal.y, signal.errors.as_deref())?;
    let y = signal
        .x
        .iter()
        .zip(&weights)
        .map(|(&x, &w)| model.param_deriv(param, x, params, w))
        .collect::<NslResult<Vec<_>>>()?;

    signal.y = y;
    signal.y_name = format!("d{}/d{}", model.name(), name);
    Ok(format!("d/d{} of {}, {} weighting", name, model.equation(), weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsl_fit::{DistributionModel, PeakModel};
    use std::f64::consts::PI;

    fn cosine(n: usize, k: f64) -> Signal {
        let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let y = x.iter().map(|&t| (2.0 * PI * k * t / n as f64).cos()).collect();
        Signal::new(x, y)
    }

    fn run(op: ProcessingOp, signal: &mut Signal) -> NslResult<()> {
        let mut log = ReproLog::new();
        apply(&op, signal, DftXScale::Frequency, &mut log)
    }

    #[test]
    fn test_window_step() {
        let mut s = Signal::new(vec![0.0, 1.0, 2.0, 3.0, 4.0], vec![2.0; 5]);
        run(ProcessingOp::Window { window: WindowType::Hann }, &mut s).unwrap();
        let w = nsl_sf::window_coefficients(5, WindowType::Hann);
        for (v, c) in s.y.iter().zip(&w) {
            assert!((v - 2.0 * c).abs() < 1e-15);
        }
        assert_eq!(s.x, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_one_sided_dft_axis() {
        let mut s = cosine(8, 1.0);
        let op = ProcessingOp::Dft {
            result: DftResultType::Amplitude,
            two_sided: false,
            shifted: false,
            window: WindowType::Uniform,
        };
        run(op, &mut s).unwrap();
        assert_eq!(s.len(), 5);
        assert_eq!(s.x.len(), 5);
        // df = (n - 1) / (span * n) = 1/8
        assert!((s.x[1] - 0.125).abs() < 1e-15);
        assert!((s.y[1] - 0.5).abs() < 1e-12);
        assert!(s.y[2].abs() < 1e-12);
        assert_eq!(s.x_name, "frequency");
    }

    #[test]
    fn test_shifted_two_sided_dft() {
        let mut s = cosine(8, 1.0);
        let mut log = ReproLog::new();
        let op = ProcessingOp::Dft {
            result: DftResultType::Amplitude,
            two_sided: true,
            shifted: true,
            window: WindowType::Uniform,
        };
        apply(&op, &mut s, DftXScale::Index, &mut log).unwrap();
        assert_eq!(s.x, vec![-4.0, -3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0]);
        assert!((s.y[3] - 0.5).abs() < 1e-12, "bin -1: {}", s.y[3]);
        assert!((s.y[5] - 0.5).abs() < 1e-12, "bin +1: {}", s.y[5]);
        assert!(s.y[4].abs() < 1e-12);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_hilbert_envelope() {
        let mut s = cosine(64, 4.0);
        run(
            ProcessingOp::Hilbert {
                result: HilbertResultType::Envelope,
            },
            &mut s,
        )
        .unwrap();
        for v in &s.y {
            assert!((v - 1.0).abs() < 1e-12, "{v}");
        }
    }

    #[test]
    fn test_derivative_default_accuracy() {
        let x: Vec<f64> = (0..10).map(|i| 0.5 * i as f64).collect();
        let y = x.iter().map(|t| t * t).collect();
        let mut s = Signal::new(x, y);
        run(
            ProcessingOp::Differentiate {
                order: DerivOrder::First,
                accuracy: None,
            },
            &mut s,
        )
        .unwrap();
        for (x, d) in s.x.iter().zip(&s.y) {
            assert!((d - 2.0 * x).abs() < 1e-12, "x={x}: {d}");
        }
        assert_eq!(s.y_name, "d1(y)");
    }

    #[test]
    fn test_failed_step_leaves_signal() {
        let mut s = Signal::new(vec![0.0, 1.0], vec![3.0, 4.0]);
        let before = s.clone();
        let mut log = ReproLog::new();
        let op = ProcessingOp::Differentiate {
            order: DerivOrder::Second,
            accuracy: Some(3),
        };
        assert!(apply(&op, &mut s, DftXScale::Frequency, &mut log).is_err());
        assert_eq!(s, before);
        assert!(log.is_empty());
    }

    #[test]
    fn test_model_steps() {
        let model = FitModel::distribution(DistributionModel::Gaussian);
        let x = vec![-1.0, 0.0, 0.5, 2.0];
        let mut s = Signal::new(x.clone(), vec![0.0; 4]);
        run(
            ProcessingOp::EvaluateModel {
                model,
                params: None,
            },
            &mut s,
        )
        .unwrap();
        assert_eq!(s.y, model.eval_all(&x, &model.start_values()).unwrap());

        let peak = FitModel::peak(PeakModel::Lorentz, 1).unwrap();
        let params = vec![2.0, 0.5, 0.25];
        let mut s = Signal::new(x.clone(), vec![4.0; 4]);
        s.errors = Some(vec![0.5; 4]);
        run(
            ProcessingOp::ParamDerivative {
                model: peak,
                params: Some(params.clone()),
                param: 1,
                weight: WeightType::Instrumental,
            },
            &mut s,
        )
        .unwrap();
        for (xi, d) in x.iter().zip(&s.y) {
            let expected = peak.param_deriv(1, *xi, &params, 4.0).unwrap();
            assert_eq!(*d, expected);
        }
    }

    #[test]
    fn test_param_derivative_rejects_unknown_param() {
        let model = FitModel::distribution(DistributionModel::Gaussian);
        let mut s = Signal::new(vec![0.0], vec![1.0]);
        let op = ProcessingOp::ParamDerivative {
            model,
            params: None,
            param: model.param_count(),
            weight: WeightType::No,
        };
        assert!(matches!(run(op, &mut s), Err(NslError::InvalidParameter(_))));
    }

    #[test]
    fn test_signal_from_table() {
        let table = DataTable::from_columns(
            vec!["t".into(), "v".into(), "e".into()],
            vec![
                vec![0.0, 1.0, 2.0, 3.0, 4.0],
                vec![1.0, f64::NAN, 3.0, 4.0, 5.0],
                vec![0.1, 0.1, 0.2, 0.3, 0.4],
            ],
        )
        .unwrap();
        let s = Signal::from_table(&table, 0, 1, Some(2), Some((0.5, 3.5))).unwrap();
        assert_eq!(s.x, vec![2.0, 3.0]);
        assert_eq!(s.y, vec![3.0, 4.0]);
        assert_eq!(s.errors, Some(vec![0.2, 0.3]));
        assert_eq!((s.x_name.as_str(), s.y_name.as_str()), ("t", "v"));
        assert!(Signal::from_table(&table, 0, 7, None, None).is_err());
    }

    #[test]
    fn test_op_json_shape() {
        let op: ProcessingOp = serde_json::from_str(r#"{"op":"dft","result":"norm_db","two_sided":true}"#).unwrap();
        assert_eq!(
            op,
            ProcessingOp::Dft {
                result: DftResultType::NormDb,
                two_sided: true,
                shifted: false,
                window: WindowType::Uniform,
            }
        );
        let op: ProcessingOp = serde_json::from_str(
            r#"{"op":"param_derivative","model":{"kind":{"category":"peak","model":"gaussian"}},"param":0,"weight":"statistical"}"#,
        )
        .unwrap();
        assert!(matches!(
            op,
            ProcessingOp::ParamDerivative {
                param: 0,
                weight: WeightType::Statistical,
                ..
            }
        ));
        assert_eq!(op.to_string(), format!("Parameter Derivative: {} (p0)", FitModel::peak(PeakModel::Gaussian, 1).unwrap()));
    }
}
