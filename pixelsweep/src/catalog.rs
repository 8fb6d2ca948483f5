//! Static tables of the algorithms the sweep exercises.
//!
//! These are process-wide constants: the interval algorithms with their
//! tunable flags, and the sorting algorithms every parameter draw is paired
//! with. Order matters only for reproducible console output.

use std::fmt;

/// Inclusive range a parameter is drawn from. The variant fixes the value type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRange {
    Real { min: f64, max: f64 },
    Integer { min: i64, max: i64 },
}

impl ValueRange {
    /// True when `value` has this range's type and lies within `[min, max]`.
    pub fn contains(&self, value: ParamValue) -> bool {
        match (*self, value) {
            (ValueRange::Real { min, max }, ParamValue::Real(v)) => min <= v && v <= max,
            (ValueRange::Integer { min, max }, ParamValue::Integer(v)) => min <= v && v <= max,
            _ => false,
        }
    }
}

/// One tunable flag of an interval algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpec {
    /// Command-line flag passed to the tool, e.g. `-t`.
    pub flag: &'static str,
    pub range: ValueRange,
}

/// An interval algorithm and its parameters in declaration order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalAlgorithm {
    pub name: &'static str,
    pub params: &'static [ParameterSpec],
}

pub static INTERVAL_ALGORITHMS: &[IntervalAlgorithm] = &[
    IntervalAlgorithm {
        name: "threshold",
        params: &[
            // lower threshold
            ParameterSpec {
                flag: "-t",
                range: ValueRange::Real { min: 0.0, max: 1.0 },
            },
            // upper threshold
            ParameterSpec {
                flag: "-u",
                range: ValueRange::Real { min: 0.5, max: 1.0 },
            },
        ],
    },
    IntervalAlgorithm {
        name: "random",
        params: &[
            // characteristic length
            ParameterSpec {
                flag: "-c",
                range: ValueRange::Integer { min: 10, max: 100 },
            },
            // randomness
            ParameterSpec {
                flag: "-r",
                range: ValueRange::Real { min: 0.0, max: 1.0 },
            },
        ],
    },
    IntervalAlgorithm {
        name: "waves",
        params: &[
            ParameterSpec {
                flag: "-c",
                range: ValueRange::Integer { min: 10, max: 100 },
            },
            // angle in degrees
            ParameterSpec {
                flag: "-a",
                range: ValueRange::Real {
                    min: 0.0,
                    max: 360.0,
                },
            },
        ],
    },
    IntervalAlgorithm {
        name: "edges",
        params: &[ParameterSpec {
            flag: "-t",
            range: ValueRange::Real { min: 0.0, max: 1.0 },
        }],
    },
];

/// Pixel ordering key the tool sorts intervals by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortingAlgorithm {
    Lightness,
    Hue,
    Saturation,
    Intensity,
    Minimum,
}

impl SortingAlgorithm {
    pub const ALL: [SortingAlgorithm; 5] = [
        SortingAlgorithm::Lightness,
        SortingAlgorithm::Hue,
        SortingAlgorithm::Saturation,
        SortingAlgorithm::Intensity,
        SortingAlgorithm::Minimum,
    ];

    /// Name as the tool's `-s` flag expects it.
    pub fn as_str(self) -> &'static str {
        match self {
            SortingAlgorithm::Lightness => "lightness",
            SortingAlgorithm::Hue => "hue",
            SortingAlgorithm::Saturation => "saturation",
            SortingAlgorithm::Intensity => "intensity",
            SortingAlgorithm::Minimum => "minimum",
        }
    }
}

impl fmt::Display for SortingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete value drawn for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Real(f64),
    Integer(i64),
}

impl fmt::Display for ParamValue {
    /// Shortest round-trip decimal. Integral reals keep a trailing `.0` so
    /// they stay distinguishable from integer parameters in file names.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Integer(v) => write!(f, "{v}"),
            ParamValue::Real(v) => {
                let text = v.to_string();
                if v.is_finite() && !text.contains('.') {
                    write!(f, "{text}.0")
                } else {
                    f.write_str(&text)
                }
            }
        }
    }
}

/// A flag paired with the value drawn for it in one trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledParam {
    pub flag: &'static str,
    pub value: ParamValue,
}
