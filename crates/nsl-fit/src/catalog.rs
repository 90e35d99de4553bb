//! Fit-model catalogue: categories, model tags, display names, equations and
//! parameter names.
//!
//! Tags are stable integers within each category. Names and equations are
//! presentation data only.

use nsl_core::{NslError, NslResult};
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Category ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum ModelCategory {
    Basic = 0,
    Peak = 1,
    Growth = 2,
    Distribution = 3,
    /// User-supplied expression; not evaluated by this library.
    Custom = 4,
}

impl ModelCategory {
    pub const ALL: [Self; 5] = [Self::Basic, Self::Peak, Self::Growth, Self::Distribution, Self::Custom];

    pub fn from_i32(v: i32) -> Option<Self> {
        Self::ALL.get(usize::try_from(v).ok()?).copied()
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Basic => "Basic functions",
            Self::Peak => "Peak functions",
            Self::Growth => "Growth (sigmoidal)",
            Self::Distribution => "Statistics (distributions)",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for ModelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Basic ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum BasicModel {
    Polynomial = 0,
    Power = 1,
    Exponential = 2,
    InverseExponential = 3,
    Fourier = 4,
}

impl BasicModel {
    pub const ALL: [Self; 5] = [
        Self::Polynomial,
        Self::Power,
        Self::Exponential,
        Self::InverseExponential,
        Self::Fourier,
    ];

    pub fn from_i32(v: i32) -> Option<Self> {
        Self::ALL.get(usize::try_from(v).ok()?).copied()
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Polynomial => "Polynomial",
            Self::Power => "Power",
            Self::Exponential => "Exponential",
            Self::InverseExponential => "Inverse exponential",
            Self::Fourier => "Fourier",
        }
    }

    /// Whether the model takes a degree (polynomial order, number of terms
    /// or power variant).
    pub fn has_degree(self) -> bool {
        !matches!(self, Self::InverseExponential)
    }
}

// ─── Peak ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum PeakModel {
    Gaussian = 0,
    Lorentz = 1,
    Sech = 2,
    Logistic = 3,
    Voigt = 4,
    PseudoVoigt1 = 5,
}

impl PeakModel {
    pub const ALL: [Self; 6] = [
        Self::Gaussian,
        Self::Lorentz,
        Self::Sech,
        Self::Logistic,
        Self::Voigt,
        Self::PseudoVoigt1,
    ];

    pub fn from_i32(v: i32) -> Option<Self> {
        Self::ALL.get(usize::try_from(v).ok()?).copied()
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Gaussian => "Gaussian (normal)",
            Self::Lorentz => "Cauchy-Lorentz",
            Self::Sech => "Hyperbolic secant (sech)",
            Self::Logistic => "Logistic (sech squared)",
            Self::Voigt => "Voigt profile",
            Self::PseudoVoigt1 => "Pseudo-Voigt (same width)",
        }
    }

    pub fn equation(self) -> &'static str {
        match self {
            Self::Gaussian => "a/sqrt(2*pi)/s * exp(-((x-mu)/s)^2/2)",
            Self::Lorentz => "a/pi * g/(g^2+(x-mu)^2)",
            Self::Sech => "a/pi/s * sech((x-mu)/s)",
            Self::Logistic => "a/4/s * sech((x-mu)/2/s)**2",
            Self::Voigt => "a*voigt(x - mu, s, g)",
            Self::PseudoVoigt1 => "a*pseudovoigt1(x - mu, et, w)",
        }
    }

    /// Parameter names of a single peak.
    pub fn param_names(self) -> &'static [&'static str] {
        match self {
            Self::Gaussian | Self::Sech | Self::Logistic => &["a", "s", "mu"],
            Self::Lorentz => &["a", "g", "mu"],
            Self::Voigt => &["a", "mu", "s", "g"],
            Self::PseudoVoigt1 => &["a", "et", "w", "mu"],
        }
    }
}

// ─── Growth ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum GrowthModel {
    Atan = 0,
    Tanh = 1,
    AlgebraicSigmoid = 2,
    Sigmoid = 3,
    Erf = 4,
    Hill = 5,
    Gompertz = 6,
    Gudermann = 7,
}

impl GrowthModel {
    pub const ALL: [Self; 8] = [
        Self::Atan,
        Self::Tanh,
        Self::AlgebraicSigmoid,
        Self::Sigmoid,
        Self::Erf,
        Self::Hill,
        Self::Gompertz,
        Self::Gudermann,
    ];

    pub fn from_i32(v: i32) -> Option<Self> {
        Self::ALL.get(usize::try_from(v).ok()?).copied()
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Atan => "Inverse tangent",
            Self::Tanh => "Hyperbolic tangent",
            Self::AlgebraicSigmoid => "Algebraic sigmoid",
            Self::Sigmoid => "Logistic function",
            Self::Erf => "Error function (erf)",
            Self::Hill => "Hill",
            Self::Gompertz => "Gompertz",
            Self::Gudermann => "Gudermann (gd)",
        }
    }

    pub fn equation(self) -> &'static str {
        match self {
            Self::Atan => "a * atan((x-mu)/s)",
            Self::Tanh => "a * tanh((x-mu)/s)",
            Self::AlgebraicSigmoid => "a * (x-mu)/s/sqrt(1+((x-mu)/s)^2)",
            Self::Sigmoid => "a/(1+exp(-k*(x-mu)))",
            Self::Erf => "a/2 * erf((x-mu)/s/sqrt(2))",
            Self::Hill => "a * x^n/(s^n + x^n)",
            Self::Gompertz => "a*exp(-b*exp(-c*x))",
            Self::Gudermann => "a * asin(tanh((x-mu)/s))",
        }
    }

    pub fn param_names(self) -> &'static [&'static str] {
        match self {
            Self::Atan | Self::Tanh | Self::AlgebraicSigmoid | Self::Erf | Self::Gudermann => &["a", "mu", "s"],
            Self::Sigmoid => &["a", "mu", "k"],
            Self::Hill => &["a", "n", "s"],
            Self::Gompertz => &["a", "b", "c"],
        }
    }
}

// ─── Distributions ──────────────────────────────────────────────────────────

/// Probability densities and mass functions, scaled by an amplitude.
///
/// Tags 9 and 10 (the stable Lévy families) are reserved and have no model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum DistributionModel {
    Gaussian = 0,
    GaussianTail = 1,
    Exponential = 2,
    Laplace = 3,
    ExponentialPower = 4,
    CauchyLorentz = 5,
    Rayleigh = 6,
    RayleighTail = 7,
    Landau = 8,
    Gamma = 11,
    Flat = 12,
    Lognormal = 13,
    ChiSquared = 14,
    FDist = 15,
    TDist = 16,
    Beta = 17,
    Logistic = 18,
    Pareto = 19,
    Weibull = 20,
    Gumbel1 = 21,
    Gumbel2 = 22,
    Poisson = 23,
    Bernoulli = 24,
    Binomial = 25,
    NegativeBinomial = 26,
    Pascal = 27,
    Geometric = 28,
    Hypergeometric = 29,
    Logarithmic = 30,
    MaxwellBoltzmann = 31,
    Sech = 32,
    Levy = 33,
    Frechet = 34,
}

impl DistributionModel {
    pub const ALL: [Self; 33] = [
        Self::Gaussian,
        Self::GaussianTail,
        Self::Exponential,
        Self::Laplace,
        Self::ExponentialPower,
        Self::CauchyLorentz,
        Self::Rayleigh,
        Self::RayleighTail,
        Self::Landau,
        Self::Gamma,
        Self::Flat,
        Self::Lognormal,
        Self::ChiSquared,
        Self::FDist,
        Self::TDist,
        Self::Beta,
        Self::Logistic,
        Self::Pareto,
        Self::Weibull,
        Self::Gumbel1,
        Self::Gumbel2,
        Self::Poisson,
        Self::Bernoulli,
        Self::Binomial,
        Self::NegativeBinomial,
        Self::Pascal,
        Self::Geometric,
        Self::Hypergeometric,
        Self::Logarithmic,
        Self::MaxwellBoltzmann,
        Self::Sech,
        Self::Levy,
        Self::Frechet,
    ];

    pub fn from_i32(v: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.as_i32() == v)
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Gaussian => "Gaussian (normal)",
            Self::GaussianTail => "Gaussian tail",
            Self::Exponential => "Exponential",
            Self::Laplace => "Laplace",
            Self::ExponentialPower => "Exponential power",
            Self::CauchyLorentz => "Cauchy-Lorentz",
            Self::Rayleigh => "Rayleigh",
            Self::RayleighTail => "Rayleigh tail",
            Self::Landau => "Landau",
            Self::Gamma => "Gamma",
            Self::Flat => "Flat (uniform)",
            Self::Lognormal => "Lognormal",
            Self::ChiSquared => "Chi-squared",
            Self::FDist => "F-distribution",
            Self::TDist => "Student's t",
            Self::Beta => "Beta",
            Self::Logistic => "Logistic (sech squared)",
            Self::Pareto => "Pareto",
            Self::Weibull => "Weibull",
            Self::Gumbel1 => "Gumbel type-1",
            Self::Gumbel2 => "Gumbel type-2",
            Self::Poisson => "Poisson",
            Self::Bernoulli => "Bernoulli",
            Self::Binomial => "Binomial",
            Self::NegativeBinomial => "Negative binomial",
            Self::Pascal => "Pascal",
            Self::Geometric => "Geometric",
            Self::Hypergeometric => "Hypergeometric",
            Self::Logarithmic => "Logarithmic",
            Self::MaxwellBoltzmann => "Maxwell-Boltzmann",
            Self::Sech => "Hyperbolic secant (sech)",
            Self::Levy => "Levy",
            Self::Frechet => "Frechet (inverse Weibull)",
        }
    }

    pub fn equation(self) -> &'static str {
        match self {
            Self::Gaussian => "a/sqrt(2*pi)/s * exp(-((x-mu)/s)^2/2)",
            Self::GaussianTail => "2*A/sqrt(2*pi)/s/erfc(a/sqrt(2)/s) * exp(-((x-mu)/s)^2/2) * theta(x-mu-a)",
            Self::Exponential => "a*l*exp(-l*(x-mu))",
            Self::Laplace => "a/(2*s) * exp(-fabs((x-mu)/s))",
            Self::ExponentialPower => "a/(2*s*gamma(1+1/b)) * exp(-fabs((x-mu)/s)^b)",
            Self::CauchyLorentz => "a/pi * g/(g^2+(x-mu)^2)",
            Self::Rayleigh => "a * x/s^2 * exp(-(x/s)^2/2)",
            Self::RayleighTail => "a*x/s^2 * exp((mu^2-x^2)/2/s^2)",
            Self::Landau => "a*landau(x)",
            Self::Gamma => "a/gamma(k)/t^k * x^(k-1)*exp(-x/t)",
            Self::Flat => "A/(b-a)*theta(b-x)*theta(x-a)",
            Self::Lognormal => "a/(sqrt(2*pi)*x*s) * exp(-( (log(x)-mu)/s )^2/2)",
            Self::ChiSquared => "a * x^(n/2.-1.)/2^(n/2.)/gamma(n/2.) * exp(-x/2.)",
            Self::FDist => "a * fdist(x, n1, n2)",
            Self::TDist => "a*gamma((n+1)/2)/sqrt(pi*n)/gamma(n/2) * (1+x^2/n)^(-(n+1)/2)",
            Self::Beta => "A*gamma(a+b)/gamma(a)/gamma(b) * x^(a-1)*(1-x)^(b-1)",
            Self::Logistic => "a/4/s * sech((x-mu)/2/s)**2",
            Self::Pareto => "A * a*b^a/x^(a+1) * theta(x-b)",
            Self::Weibull => "a * k/l * ((x-mu)/l)^(k-1) * exp(-((x-mu)/l)^k)",
            Self::Gumbel1 => "a/s * exp(-(x-mu)/s - b*exp(-(x-mu)/s))",
            Self::Gumbel2 => "A*a*b * (x-mu)^(-a-1) * exp(-b*(x-mu)^(-a))",
            Self::Poisson => "a * l^x/gamma(x+1) * exp(-l)",
            Self::Bernoulli => "a*(p*theta(x-1) + (1-p)*theta(1-x))",
            Self::Binomial => "a * gamma(n+1)/gamma(x+1)/gamma(n-x+1) * p^x*(1-p)^(n-x)",
            Self::NegativeBinomial | Self::Pascal => "a * gamma(n+x)/gamma(x+1)/gamma(n) * p^n*(1-p)^x",
            Self::Geometric => "a * p*(1-p)^(x-1)",
            Self::Hypergeometric => "a * binomial(n1,x)*binomial(n2,t-x)/binomial(n1+n2,t)",
            Self::Logarithmic => "a * -1/log(1-p) * p^x/x",
            Self::MaxwellBoltzmann => "a*sqrt(2/pi) * x^2/s^3 * exp(-(x/s)^2/2)",
            Self::Sech => "a/2/s * sech(pi/2*(x-mu)/s)",
            Self::Levy => "a * sqrt(g/(2*pi))/(x-mu)^1.5 * exp(-g/2/(x-mu))",
            Self::Frechet => "a * g/s*((x-mu)/s)^(-1-g) * exp(-((x-mu)/s)^(-g))",
        }
    }

    pub fn param_names(self) -> &'static [&'static str] {
        match self {
            Self::Gaussian
            | Self::Laplace
            | Self::RayleighTail
            | Self::Lognormal
            | Self::Logistic
            | Self::Sech => &["a", "s", "mu"],
            Self::GaussianTail => &["A", "s", "a", "mu"],
            Self::Exponential => &["a", "l", "mu"],
            Self::ExponentialPower => &["a", "s", "b", "mu"],
            Self::CauchyLorentz | Self::Levy => &["a", "g", "mu"],
            Self::Rayleigh | Self::MaxwellBoltzmann => &["a", "s"],
            Self::Landau => &["a"],
            Self::Gamma => &["a", "k", "t"],
            Self::Flat => &["A", "b", "a"],
            Self::ChiSquared | Self::TDist => &["a", "n"],
            Self::FDist => &["a", "n1", "n2"],
            Self::Beta | Self::Pareto => &["A", "a", "b"],
            Self::Weibull => &["a", "k", "l", "mu"],
            Self::Gumbel1 => &["a", "s", "mu", "b"],
            Self::Gumbel2 => &["A", "a", "b", "mu"],
            Self::Poisson => &["a", "l"],
            Self::Bernoulli | Self::Geometric | Self::Logarithmic => &["a", "p"],
            Self::Binomial | Self::NegativeBinomial | Self::Pascal => &["a", "p", "n"],
            Self::Hypergeometric => &["a", "n1", "n2", "t"],
            Self::Frechet => &["a", "g", "s", "mu"],
        }
    }

    /// Start values that lie inside the support of the model.
    pub fn start_values(self) -> Vec<f64> {
        let mut p = vec![1.0; self.param_names().len()];
        match self {
            Self::Flat => p[2] = -1.0,
            Self::Levy => p[2] = 0.0,
            Self::ExponentialPower | Self::Weibull | Self::Gumbel2 | Self::Frechet => p[3] = 0.0,
            Self::Bernoulli
            | Self::Binomial
            | Self::NegativeBinomial
            | Self::Pascal
            | Self::Geometric
            | Self::Logarithmic => p[1] = 0.5,
            _ => {}
        }
        p
    }

    pub fn is_discrete(self) -> bool {
        matches!(
            self,
            Self::Poisson
                | Self::Bernoulli
                | Self::Binomial
                | Self::NegativeBinomial
                | Self::Pascal
                | Self::Geometric
                | Self::Hypergeometric
                | Self::Logarithmic
        )
    }
}

macro_rules! display_by_name {
    ($($t:ty),*) => {$(
        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    )*};
}

display_by_name!(BasicModel, PeakModel, GrowthModel, DistributionModel);

// ─── Model selection ────────────────────────────────────────────────────────

/// A model of one of the built-in categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "model", rename_all = "snake_case")]
pub enum ModelKind {
    Basic(BasicModel),
    Peak(PeakModel),
    Growth(GrowthModel),
    Distribution(DistributionModel),
}

impl ModelKind {
    pub fn category(self) -> ModelCategory {
        match self {
            Self::Basic(_) => ModelCategory::Basic,
            Self::Peak(_) => ModelCategory::Peak,
            Self::Growth(_) => ModelCategory::Growth,
            Self::Distribution(_) => ModelCategory::Distribution,
        }
    }

    /// Looks a model up by category and tag.
    pub fn from_tags(category: i32, model: i32) -> NslResult<Self> {
        let unknown = |kind| NslError::UnknownTag { kind, value: model };
        match ModelCategory::from_i32(category) {
            Some(ModelCategory::Basic) => BasicModel::from_i32(model).map(Self::Basic).ok_or(unknown("basic model")),
            Some(ModelCategory::Peak) => PeakModel::from_i32(model).map(Self::Peak).ok_or(unknown("peak model")),
            Some(ModelCategory::Growth) => GrowthModel::from_i32(model).map(Self::Growth).ok_or(unknown("growth model")),
            Some(ModelCategory::Distribution) => DistributionModel::from_i32(model)
                .map(Self::Distribution)
                .ok_or(unknown("distribution model")),
            Some(ModelCategory::Custom) => Err(NslError::NotImplemented("custom model expressions".into())),
            None => Err(NslError::UnknownTag {
                kind: "model category",
                value: category,
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Basic(m) => m.name(),
            Self::Peak(m) => m.name(),
            Self::Growth(m) => m.name(),
            Self::Distribution(m) => m.name(),
        }
    }

    /// Every built-in model in catalogue order.
    pub fn all() -> impl Iterator<Item = ModelKind> {
        BasicModel::ALL
            .into_iter()
            .map(Self::Basic)
            .chain(PeakModel::ALL.into_iter().map(Self::Peak))
            .chain(GrowthModel::ALL.into_iter().map(Self::Growth))
            .chain(DistributionModel::ALL.into_iter().map(Self::Distribution))
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category(), self.name())
    }
}

fn default_degree() -> usize {
    1
}

/// A catalogue model together with its degree.
///
/// The degree is the polynomial order, the number of exponential or Fourier
/// terms, the power variant (1: `a*x^b`, 2: `a + b*x^c`) or the number of
/// superposed peaks. Other models ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FitModel {
    pub kind: ModelKind,
    #[serde(default = "default_degree")]
    pub degree: usize,
}

impl FitModel {
    pub fn new(kind: ModelKind, degree: usize) -> NslResult<Self> {
        let model = Self { kind, degree };
        model.validate()?;
        Ok(model)
    }

    pub fn basic(model: BasicModel, degree: usize) -> NslResult<Self> {
        Self::new(ModelKind::Basic(model), degree)
    }

    pub fn peak(model: PeakModel, peaks: usize) -> NslResult<Self> {
        Self::new(ModelKind::Peak(model), peaks)
    }

    pub fn growth(model: GrowthModel) -> Self {
        Self {
            kind: ModelKind::Growth(model),
            degree: 1,
        }
    }

    pub fn distribution(model: DistributionModel) -> Self {
        Self {
            kind: ModelKind::Distribution(model),
            degree: 1,
        }
    }

    /// Checks the degree against the model.
    pub fn validate(&self) -> NslResult<()> {
        let ok = match self.kind {
            ModelKind::Basic(BasicModel::Power) => matches!(self.degree, 1 | 2),
            ModelKind::Basic(BasicModel::InverseExponential) => true,
            ModelKind::Basic(_) | ModelKind::Peak(_) => self.degree >= 1,
            ModelKind::Growth(_) | ModelKind::Distribution(_) => true,
        };
        if ok {
            Ok(())
        } else {
            Err(NslError::InvalidParameter(format!(
                "degree {} is not valid for {}",
                self.degree, self.kind
            )))
        }
    }

    pub fn category(&self) -> ModelCategory {
        self.kind.category()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn param_count(&self) -> usize {
        let d = self.degree;
        match self.kind {
            ModelKind::Basic(BasicModel::Polynomial) => d + 1,
            ModelKind::Basic(BasicModel::Power) => d + 1,
            ModelKind::Basic(BasicModel::Exponential) => 2 * d,
            ModelKind::Basic(BasicModel::InverseExponential) => 3,
            ModelKind::Basic(BasicModel::Fourier) => 2 * d + 2,
            ModelKind::Peak(m) => m.param_names().len() * d,
            ModelKind::Growth(m) => m.param_names().len(),
            ModelKind::Distribution(m) => m.param_names().len(),
        }
    }

    pub fn param_names(&self) -> Vec<String> {
        let d = self.degree;
        let plain = |names: &[&str]| names.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        match self.kind {
            ModelKind::Basic(BasicModel::Polynomial) => (0..=d).map(|i| format!("c{i}")).collect(),
            ModelKind::Basic(BasicModel::Power) if d == 1 => plain(&["a", "b"]),
            ModelKind::Basic(BasicModel::Power) => plain(&["a", "b", "c"]),
            ModelKind::Basic(BasicModel::Exponential) if d == 1 => plain(&["a", "b"]),
            ModelKind::Basic(BasicModel::Exponential) => {
                (1..=d).flat_map(|i| [format!("a{i}"), format!("b{i}")]).collect()
            }
            ModelKind::Basic(BasicModel::InverseExponential) => plain(&["a", "b", "c"]),
            ModelKind::Basic(BasicModel::Fourier) => {
                let mut names = vec!["w".to_string(), "a0".to_string()];
                names.extend((1..=d).flat_map(|i| [format!("a{i}"), format!("b{i}")]));
                names
            }
            ModelKind::Peak(m) if d == 1 => plain(m.param_names()),
            ModelKind::Peak(m) => (1..=d)
                .flat_map(|i| m.param_names().iter().map(move |n| format!("{n}{i}")))
                .collect(),
            ModelKind::Growth(m) => plain(m.param_names()),
            ModelKind::Distribution(m) => plain(m.param_names()),
        }
    }

    pub fn start_values(&self) -> Vec<f64> {
        match self.kind {
            ModelKind::Distribution(m) => m.start_values(),
            _ => vec![1.0; self.param_count()],
        }
    }

    /// Human readable model equation, expanded for the degree.
    pub fn equation(&self) -> String {
        let d = self.degree;
        match self.kind {
            ModelKind::Basic(BasicModel::Polynomial) => {
                let mut eq = "c0".to_string();
                for i in 1..=d {
                    match i {
                        1 => eq.push_str(" + c1*x"),
                        _ => eq.push_str(&format!(" + c{i}*x^{i}")),
                    }
                }
                eq
            }
            ModelKind::Basic(BasicModel::Power) if d == 1 => "a*x^b".into(),
            ModelKind::Basic(BasicModel::Power) => "a + b*x^c".into(),
            ModelKind::Basic(BasicModel::Exponential) if d == 1 => "a*exp(b*x)".into(),
            ModelKind::Basic(BasicModel::Exponential) => (1..=d)
                .map(|i| format!("a{i}*exp(b{i}*x)"))
                .collect::<Vec<_>>()
                .join(" + "),
            ModelKind::Basic(BasicModel::InverseExponential) => "a*(1-exp(b*x)) + c".into(),
            ModelKind::Basic(BasicModel::Fourier) => {
                let mut eq = "a0".to_string();
                for i in 1..=d {
                    let w = if i == 1 { "w".to_string() } else { format!("{i}*w") };
                    eq.push_str(&format!(" + (a{i}*cos({w}*x) + b{i}*sin({w}*x))"));
                }
                eq
            }
            ModelKind::Peak(m) if d == 1 => m.equation().into(),
            ModelKind::Peak(m) => (1..=d)
                .map(|i| suffix_params(m.equation(), m.param_names(), &i.to_string()))
                .collect::<Vec<_>>()
                .join(" + "),
            ModelKind::Growth(m) => m.equation().into(),
            ModelKind::Distribution(m) => m.equation().into(),
        }
    }
}

impl fmt::Display for FitModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (degree {})", self.kind, self.degree)
    }
}

// append `suffix` to every identifier of `eq` that names a parameter
fn suffix_params(eq: &str, names: &[&str], suffix: &str) -> String {
    let mut out = String::with_capacity(eq.len() + 8);
    let mut ident = String::new();
    let flush = |ident: &mut String, out: &mut String| {
        if !ident.is_empty() {
            out.push_str(ident);
            if names.contains(&ident.as_str()) {
                out.push_str(suffix);
            }
            ident.clear();
        }
    };
    for c in eq.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            ident.push(c);
        } else {
            flush(&mut ident, &mut out);
            out.push(c);
        }
    }
    flush(&mut ident, &mut out);
    out
}
