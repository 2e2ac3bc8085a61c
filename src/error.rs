use crate::admin::AdminError;
use crate::line::{Direction, LineOptions};
use crate::BoardGeneration;
use std::fmt;
use std::io;
use thiserror::Error;

/// Which operation failed.
///
/// `Resolution` is the only kind returned synchronously (from
/// `LineHandle::new`); all the others come out of an `async` operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Resolution,
    Export,
    Unexport,
    Read,
    Write,
    GetDirection,
    SetDirection,
}

impl ErrorKind {
    /// Stable snake-case name, suitable for transport-level responses.
    pub fn as_str(&self) -> &'static str {
        use ErrorKind::*;
        match self {
            Resolution => "resolution_error",
            Export => "export_error",
            Unexport => "unexport_error",
            Read => "read_error",
            Write => "write_error",
            GetDirection => "get_direction_error",
            SetDirection => "set_direction_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operands of the failed operation.
///
/// Fields that do not apply to an operation are left `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Header pin number the handle was created for.
    pub pin: Option<u8>,
    /// Kernel line number the header pin resolved to.
    pub line: Option<u32>,
    /// Canonical value a write attempted.
    pub value: Option<u8>,
    /// Direction a direction change attempted.
    pub direction: Option<Direction>,
    /// Options a claim was attempted with.
    pub options: Option<LineOptions>,
}

impl ErrorContext {
    pub fn line(pin: u8, line: u32) -> Self {
        Self {
            pin: Some(pin),
            line: Some(line),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: u8) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_options(mut self, options: LineOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// Underlying reason an operation failed.
#[derive(Error, Debug)]
pub enum Cause {
    #[error("pseudo-file access failed")]
    Io(#[source] io::Error),
    #[error("privileged helper failed")]
    Admin(#[source] AdminError),
    #[error("failed to read system information")]
    SystemInfo(#[source] io::Error),
    #[error("no revision code found in system information")]
    RevisionNotFound,
    #[error("kernel line {0} is already held by another handle")]
    LineInUse(u32),
}

/// The single error type returned by every operation of this crate.
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct GpioError {
    kind: ErrorKind,
    message: String,
    context: ErrorContext,
    #[source]
    cause: Option<Cause>,
}

impl GpioError {
    pub(crate) fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        context: ErrorContext,
        cause: Option<Cause>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            context,
            cause,
        }
    }

    pub(crate) fn invalid_identity(identity: impl fmt::Debug) -> Self {
        Self::new(
            ErrorKind::Resolution,
            format!(
                "a valid header pin number is required to create a line handle, got {:?}",
                identity
            ),
            ErrorContext::default(),
            None,
        )
    }

    pub(crate) fn unknown_pin(pin: u8, generation: BoardGeneration) -> Self {
        Self::new(
            ErrorKind::Resolution,
            format!("header pin {} is not a valid pin on a {} board", pin, generation),
            ErrorContext {
                pin: Some(pin),
                ..ErrorContext::default()
            },
            None,
        )
    }

    pub(crate) fn undetectable(cause: Cause) -> Self {
        Self::new(
            ErrorKind::Resolution,
            "unable to detect the board generation",
            ErrorContext::default(),
            Some(cause),
        )
    }

    pub(crate) fn line_in_use(pin: u8, line: u32) -> Self {
        Self::new(
            ErrorKind::Resolution,
            format!("header pin {} resolves to a line that is already in use", pin),
            ErrorContext::line(pin, line),
            Some(Cause::LineInUse(line)),
        )
    }

    pub(crate) fn io(kind: ErrorKind, context: ErrorContext, err: io::Error) -> Self {
        let message = match (context.pin, context.line) {
            (Some(pin), Some(line)) => format!("header pin {} (line {})", pin, line),
            _ => String::from("line operation"),
        };
        Self::new(kind, message, context, Some(Cause::Io(err)))
    }

    pub(crate) fn admin(kind: ErrorKind, context: ErrorContext, err: AdminError) -> Self {
        let message = match (context.pin, context.line) {
            (Some(pin), Some(line)) => format!("header pin {} (line {})", pin, line),
            _ => String::from("helper invocation"),
        };
        Self::new(kind, message, context, Some(Cause::Admin(err)))
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn context(&self) -> &ErrorContext {
        &self.context
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
