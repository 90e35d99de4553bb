//! Stable integer tags for transform result types, windows and derivative orders.
//!
//! The integer values are part of the public contract: stored project files and
//! external callers select a variant by tag, so they never change meaning.

use serde::{Deserialize, Serialize};
use std::fmt;

// ─── DFT result type ────────────────────────────────────────────────────────

/// Post-processing applied to the complex spectrum before it is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum DftResultType {
    Magnitude = 0,
    Amplitude = 1,
    Real = 2,
    Imag = 3,
    Power = 4,
    Phase = 5,
    #[serde(rename = "db")]
    Db = 6,
    #[serde(rename = "norm_db")]
    NormDb = 7,
    SquareMagnitude = 8,
    SquareAmplitude = 9,
    Raw = 10,
}

impl DftResultType {
    pub const ALL: [Self; 11] = [
        Self::Magnitude,
        Self::Amplitude,
        Self::Real,
        Self::Imag,
        Self::Power,
        Self::Phase,
        Self::Db,
        Self::NormDb,
        Self::SquareMagnitude,
        Self::SquareAmplitude,
        Self::Raw,
    ];

    pub fn from_i32(v: i32) -> Option<Self> {
        Self::ALL.get(usize::try_from(v).ok()?).copied()
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Magnitude => "Magnitude",
            Self::Amplitude => "Amplitude",
            Self::Real => "real part",
            Self::Imag => "imaginary part",
            Self::Power => "Power",
            Self::Phase => "Phase",
            Self::Db => "Amplitude in dB",
            Self::NormDb => "normalized amplitude in dB",
            Self::SquareMagnitude => "Magnitude squared",
            Self::SquareAmplitude => "Amplitude squared",
            Self::Raw => "raw",
        }
    }
}

impl fmt::Display for DftResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── DFT abscissa scale ─────────────────────────────────────────────────────

/// Abscissa assigned to the transformed bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum DftXScale {
    #[default]
    Frequency = 0,
    Index = 1,
    Period = 2,
}

impl DftXScale {
    pub const ALL: [Self; 3] = [Self::Frequency, Self::Index, Self::Period];

    pub fn from_i32(v: i32) -> Option<Self> {
        Self::ALL.get(usize::try_from(v).ok()?).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Frequency => "Frequency",
            Self::Index => "Index",
            Self::Period => "Period",
        }
    }
}

impl fmt::Display for DftXScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Hilbert result type ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum HilbertResultType {
    /// Imaginary part of the analytic signal, i.e. the Hilbert transform itself.
    Imag = 0,
    /// Modulus of the analytic signal.
    Envelope = 1,
}

impl HilbertResultType {
    pub const ALL: [Self; 2] = [Self::Imag, Self::Envelope];

    pub fn from_i32(v: i32) -> Option<Self> {
        match v {
            0 => Some(Self::Imag),
            1 => Some(Self::Envelope),
            _ => None,
        }
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Imag => "Imaginary part",
            Self::Envelope => "Envelope",
        }
    }
}

impl fmt::Display for HilbertResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Window type ────────────────────────────────────────────────────────────

/// Tapering windows applied to a sample buffer before a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum WindowType {
    Uniform = 0,
    Triangle = 1,
    #[serde(rename = "triangle_ii")]
    TriangleII = 2,
    #[serde(rename = "triangle_iii")]
    TriangleIII = 3,
    Welch = 4,
    Hann = 5,
    Hamming = 6,
    Blackman = 7,
    Nuttall = 8,
    BlackmanNuttall = 9,
    BlackmanHarris = 10,
    FlatTop = 11,
    Cosine = 12,
    BartlettHann = 13,
    Lanczos = 14,
}

impl WindowType {
    pub const ALL: [Self; 15] = [
        Self::Uniform,
        Self::Triangle,
        Self::TriangleII,
        Self::TriangleIII,
        Self::Welch,
        Self::Hann,
        Self::Hamming,
        Self::Blackman,
        Self::Nuttall,
        Self::BlackmanNuttall,
        Self::BlackmanHarris,
        Self::FlatTop,
        Self::Cosine,
        Self::BartlettHann,
        Self::Lanczos,
    ];

    pub fn from_i32(v: i32) -> Option<Self> {
        Self::ALL.get(usize::try_from(v).ok()?).copied()
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Uniform => "uniform (rectangular)",
            Self::Triangle => "triangular",
            Self::TriangleII => "triangular II (Bartlett)",
            Self::TriangleIII => "triangular III (Parzen)",
            Self::Welch => "Welch (parabolic)",
            Self::Hann => "Hann (raised cosine)",
            Self::Hamming => "Hamming",
            Self::Blackman => "Blackman",
            Self::Nuttall => "Nuttall",
            Self::BlackmanNuttall => "Blackman-Nuttall",
            Self::BlackmanHarris => "Blackman-Harris",
            Self::FlatTop => "Flat top",
            Self::Cosine => "Cosine",
            Self::BartlettHann => "Bartlett-Hann",
            Self::Lanczos => "Lanczos",
        }
    }
}

impl Default for WindowType {
    fn default() -> Self {
        Self::Uniform
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Derivative order ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum DerivOrder {
    First = 1,
    Second = 2,
    Third = 3,
    Fourth = 4,
    Fifth = 5,
    Sixth = 6,
}

impl DerivOrder {
    pub const ALL: [Self; 6] = [
        Self::First,
        Self::Second,
        Self::Third,
        Self::Fourth,
        Self::Fifth,
        Self::Sixth,
    ];

    pub fn from_i32(v: i32) -> Option<Self> {
        Self::ALL.get(usize::try_from(v - 1).ok()?).copied()
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Order of the derivative as a plain count.
    pub fn order(self) -> usize {
        self as usize
    }

    /// Accuracy orders offered for this derivative.
    pub fn accuracies(self) -> &'static [usize] {
        match self {
            Self::First => &[2, 4],
            Self::Second => &[1, 2, 3],
            Self::Third => &[2],
            Self::Fourth => &[1, 3],
            Self::Fifth => &[2],
            Self::Sixth => &[1],
        }
    }

    pub fn supports(self, accuracy: usize) -> bool {
        self.accuracies().contains(&accuracy)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
            Self::Fourth => "fourth",
            Self::Fifth => "fifth",
            Self::Sixth => "sixth",
        }
    }
}

impl fmt::Display for DerivOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} derivative", self.name())
    }
}
