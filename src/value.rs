//! Normalization of the many spellings of on/off into a canonical `0`/`1`.

use derive_try_from_primitive::TryFromPrimitive;

/// Enum representing the state of a line's `value` attribute.
///
/// This usually correlates to electric low/high state of the pin, unless the line
/// was configured as active-low.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum Value {
    Low = 0,
    High = 1,
}

impl Value {
    /// Parses the text of a `value` attribute (`"0\n"` or `"1\n"`).
    pub fn from_attribute(raw: &[u8]) -> Option<Self> {
        match raw.iter().copied().find(|b| !b.is_ascii_whitespace())? {
            digit @ b'0'..=b'9' => Value::try_from(digit - b'0').ok(),
            _ => None,
        }
    }
}

impl From<Value> for u8 {
    fn from(value: Value) -> Self {
        value as u8
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        if value {
            Value::High
        } else {
            Value::Low
        }
    }
}

/// Anything a caller may hand to `LineHandle::write`.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Input {
    /// Canonical two-state value, see [`coerce`].
    pub fn canonical(&self) -> u8 {
        use Input::*;

        match self {
            Null => 0,
            Bool(b) => u8::from(*b),
            Int(n) => u8::from(*n != 0),
            // NaN is falsy as well.
            Float(f) => u8::from(*f != 0.0 && !f.is_nan()),
            Text(text) => match text.to_lowercase().as_str() {
                "true" | "yes" | "1" => 1,
                "false" | "no" | "0" | "" => 0,
                _ => 1,
            },
        }
    }
}

/// Coerces `value` into the canonical `0`/`1` written to a line.
///
/// Numbers and booleans convert directly (non-zero is on). Strings are matched
/// case-insensitively: `true`, `yes`, `1` are on, `false`, `no`, `0` and the
/// empty string are off, and any other string is on. `None` is off.
pub fn coerce(value: impl Into<Input>) -> u8 {
    value.into().canonical()
}

impl From<bool> for Input {
    fn from(value: bool) -> Self {
        Input::Bool(value)
    }
}

macro_rules! input_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Input {
            fn from(value: $ty) -> Self {
                Input::Int(i64::from(value))
            }
        })*
    };
}

input_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Input {
    fn from(value: f64) -> Self {
        Input::Float(value)
    }
}

impl From<&str> for Input {
    fn from(value: &str) -> Self {
        Input::Text(value.to_string())
    }
}

impl From<String> for Input {
    fn from(value: String) -> Self {
        Input::Text(value)
    }
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        Input::Int(i64::from(value as u8))
    }
}

impl<T: Into<Input>> From<Option<T>> for Input {
    fn from(value: Option<T>) -> Self {
        value.map_or(Input::Null, Into::into)
    }
}
