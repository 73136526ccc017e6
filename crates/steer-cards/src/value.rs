//! Heterogeneous parameter values held by steering-card containers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dump::{DumpConfig, Printer};
use crate::module::Module;
use crate::parameters::Parameters;
use crate::sequence::Sequence;

/// Leaf value of a parameter set.
///
/// Floats compare by bit pattern, so a `NaN` equals itself and `-0.0`
/// differs from `0.0`, in line with how values are dumped and fingerprinted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scalar {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Double precision floating point number.
    Float(f64),
    /// UTF-8 string.
    Str(String),
}

impl Scalar {
    /// Returns the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the integer payload, if any.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the numeric payload as a float; integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Scalar::Float(value) => Some(*value),
            Scalar::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Returns the boolean payload, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

fn same_bits(a: f64, b: f64) -> bool {
    a.to_bits() == b.to_bits()
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => same_bits(*a, *b),
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            _ => false,
        }
    }
}

/// Closed or half-open numeric range, either bound may be left open.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Limits {
    min: Option<f64>,
    max: Option<f64>,
}

impl Limits {
    /// Creates a range bounded on both sides.
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Creates a range with no bounds at all.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Creates a range bounded from below only.
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Creates a range bounded from above only.
    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Lower bound, if set.
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    /// Upper bound, if set.
    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Whether `value` lies within the (inclusive) bounds.
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

impl PartialEq for Limits {
    fn eq(&self, other: &Self) -> bool {
        let bound = |a: Option<f64>, b: Option<f64>| match (a, b) {
            (Some(a), Some(b)) => same_bits(a, b),
            (None, None) => true,
            _ => false,
        };
        bound(self.min, other.min) && bound(self.max, other.max)
    }
}

/// Any value a parameter key may be bound to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// A single leaf value.
    Scalar(Scalar),
    /// Ordered collection of leaf values, dumped as a tuple.
    List(Vec<Scalar>),
    /// Numeric range.
    Limits(Limits),
    /// Nested parameter set.
    Params(Parameters),
    /// Nested named module.
    Module(Module),
    /// Ordered pipeline of modules.
    Sequence(Sequence),
}

impl Value {
    /// Returns the leaf payload, if any.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    /// Returns the integer payload, if any.
    pub fn as_int(&self) -> Option<i64> {
        self.as_scalar().and_then(Scalar::as_int)
    }

    /// Returns the numeric payload as a float; integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        self.as_scalar().and_then(Scalar::as_float)
    }

    /// Returns the boolean payload, if any.
    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar().and_then(Scalar::as_bool)
    }

    /// Returns the list payload, if any.
    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the range payload, if any.
    pub fn as_limits(&self) -> Option<Limits> {
        match self {
            Value::Limits(limits) => Some(*limits),
            _ => None,
        }
    }

    /// Returns the nested parameter set, if any.
    pub fn as_params(&self) -> Option<&Parameters> {
        match self {
            Value::Params(params) => Some(params),
            _ => None,
        }
    }

    /// Returns the nested module, if any.
    pub fn as_module(&self) -> Option<&Module> {
        match self {
            Value::Module(module) => Some(module),
            _ => None,
        }
    }

    /// Returns the nested sequence, if any.
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    /// Short lowercase label of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(Scalar::Bool(_)) => "bool",
            Value::Scalar(Scalar::Int(_)) => "int",
            Value::Scalar(Scalar::Float(_)) => "float",
            Value::Scalar(Scalar::Str(_)) => "str",
            Value::List(_) => "list",
            Value::Limits(_) => "limits",
            Value::Params(_) => "parameters",
            Value::Module(_) => "module",
            Value::Sequence(_) => "sequence",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        Printer::new(&DumpConfig::default()).value(&mut out, self, 0);
        f.write_str(&out)
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident($conv:expr)),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::$variant(($conv)(value))
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

scalar_from! {
    bool => Bool(|v| v),
    i32 => Int(i64::from),
    i64 => Int(|v| v),
    u32 => Int(i64::from),
    f32 => Float(f64::from),
    f64 => Float(|v| v),
    String => Str(|v| v),
    &str => Str(String::from),
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Scalar>, B: Into<Scalar>> From<(A, B)> for Value {
    fn from((first, second): (A, B)) -> Self {
        Value::List(vec![first.into(), second.into()])
    }
}

impl From<Limits> for Value {
    fn from(value: Limits) -> Self {
        Value::Limits(value)
    }
}

impl From<Parameters> for Value {
    fn from(value: Parameters) -> Self {
        Value::Params(value)
    }
}

impl From<Module> for Value {
    fn from(value: Module) -> Self {
        Value::Module(value)
    }
}

impl From<Sequence> for Value {
    fn from(value: Sequence) -> Self {
        Value::Sequence(value)
    }
}

/// Conversion used by typed getters such as [`Parameters::get_or`].
pub trait FromValue: Sized {
    /// Extracts an owned `Self` when `value` holds a compatible variant.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_int()
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_int().and_then(|v| i32::try_from(v).ok())
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_float()
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromValue for Vec<Scalar> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_list().map(<[Scalar]>::to_vec)
    }
}

impl FromValue for Limits {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_limits()
    }
}

impl FromValue for Parameters {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_params().cloned()
    }
}

impl FromValue for Module {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_module().cloned()
    }
}

impl FromValue for Sequence {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_sequence().cloned()
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_conversions_pick_expected_variants() {
        assert_eq!(Value::from(42), Value::Scalar(Scalar::Int(42)));
        assert_eq!(Value::from(1.5), Value::Scalar(Scalar::Float(1.5)));
        assert_eq!(Value::from("foo").as_str(), Some("foo"));
        assert_eq!(
            Value::from((1, 2)),
            Value::List(vec![Scalar::Int(1), Scalar::Int(2)])
        );
        assert_eq!(Value::from([0.5, 1.0]).as_list().map(<[Scalar]>::len), Some(2));
    }

    #[test]
    fn float_accessor_widens_integers() {
        assert_eq!(Value::from(3).as_float(), Some(3.0));
        assert_eq!(Value::from("3").as_float(), None);
        assert_eq!(i32::from_value(&Value::from(i64::MAX)), None);
    }

    #[test]
    fn limits_bounds_are_inclusive() {
        let limits = Limits::new(0.0, 1.0);
        assert!(limits.contains(0.0));
        assert!(limits.contains(1.0));
        assert!(!limits.contains(1.5));
        assert!(Limits::at_least(2.0).contains(1e9));
        assert!(!Limits::at_most(-1.0).contains(0.0));
        assert!(Limits::unbounded().contains(f64::MIN));
    }

    #[test]
    fn floats_compare_by_bits() {
        assert_eq!(Scalar::Float(f64::NAN), Scalar::Float(f64::NAN));
        assert_ne!(Scalar::Float(0.0), Scalar::Float(-0.0));
        assert_ne!(Scalar::Float(1.0), Scalar::Int(1));
        assert_eq!(Limits::at_least(f64::NAN), Limits::at_least(f64::NAN));
        assert_ne!(Limits::at_least(0.0), Limits::at_most(0.0));
    }
}
