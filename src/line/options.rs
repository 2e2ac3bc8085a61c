use std::fmt;
use std::str::FromStr;

/// Direction of a line, as written to its `direction` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    In,
    #[default]
    Out,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text is neither `in` nor `out`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized direction: {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "in" => Ok(Direction::In),
            "out" => Ok(Direction::Out),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

/// How a [`LineHandle`](super::LineHandle) is set up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOptions {
    /// Claim the line and set its direction when the handle is configured.
    pub export: bool,
    pub direction: Direction,
    /// Pull resistor setting handed to the helper on claim (`pullup`,
    /// `pulldown`). Empty leaves the resistor untouched.
    pub pull: String,
}

impl LineOptions {
    pub fn with_export(mut self, export: bool) -> Self {
        self.export = export;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_pull(mut self, pull: impl Into<String>) -> Self {
        self.pull = pull.into();
        self
    }
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            export: true,
            direction: Direction::Out,
            pull: String::new(),
        }
    }
}

/// Header pin identity as supplied by a caller, before validation.
///
/// Front ends usually receive pin numbers as text, so both numbers and text are
/// accepted. Validation happens in `LineHandle::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinIdentity {
    Missing,
    Number(u32),
    Text(String),
}

impl PinIdentity {
    /// Header pin number, if the identity is a well-formed one.
    ///
    /// Text must be a plain decimal number, surrounding whitespace allowed.
    /// Zero and numbers that cannot be a header position are rejected.
    pub fn header_pin(&self) -> Option<u8> {
        let number = match self {
            PinIdentity::Missing => return None,
            PinIdentity::Number(n) => *n,
            PinIdentity::Text(text) => {
                let text = text.trim();
                if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                text.parse().ok()?
            }
        };

        u8::try_from(number).ok().filter(|pin| *pin != 0)
    }
}

impl From<u8> for PinIdentity {
    fn from(pin: u8) -> Self {
        PinIdentity::Number(u32::from(pin))
    }
}

impl From<u32> for PinIdentity {
    fn from(pin: u32) -> Self {
        PinIdentity::Number(pin)
    }
}

impl From<i32> for PinIdentity {
    fn from(pin: i32) -> Self {
        u32::try_from(pin).map_or(PinIdentity::Text(pin.to_string()), PinIdentity::Number)
    }
}

impl From<&str> for PinIdentity {
    fn from(pin: &str) -> Self {
        PinIdentity::Text(pin.to_string())
    }
}

impl From<String> for PinIdentity {
    fn from(pin: String) -> Self {
        PinIdentity::Text(pin)
    }
}

impl<T: Into<PinIdentity>> From<Option<T>> for PinIdentity {
    fn from(pin: Option<T>) -> Self {
        pin.map_or(PinIdentity::Missing, Into::into)
    }
}
