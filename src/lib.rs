//! This crate exposes the header pins of a [Raspberry Pi](https://www.raspberrypi.com/) for programmatic use in Rust,
//! through the kernel's sysfs GPIO interface.
//!
//! Pins are addressed by their physical position on the header. The crate detects the board generation once,
//! from the `Revision` line of `/proc/cpuinfo`, and resolves header positions to kernel line numbers with the
//! matching pin table. The first Model B boards (revision `0002`/`0003`) wire a few header positions to
//! different lines than every later board.
//!
//! Lines are claimed and released through a privileged helper (`gpio-admin`), so the controlling process does not
//! need to run as root. Direction and value are then read and written through `/sys/class/gpio/gpioN`.
//!
//! Every I/O operation is `async` and runs on [`tokio`]. Mistakes detectable without I/O (a missing, malformed or
//! unknown pin) fail synchronously when creating a [`LineHandle`]; everything else fails through the operation's
//! result. Both kinds use the same [`GpioError`] shape.
//!
//! ```no_run
//! use raspi_sysfs_gpio::{Board, Config, LineOptions};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), raspi_sysfs_gpio::GpioError> {
//! let board = Arc::new(Board::new(Config::default()));
//! let (led, setup) = board.open(7, LineOptions::default()).await?;
//! setup?;
//!
//! led.write("on").await?;
//! led.release().await?;
//! # Ok(())
//! # }
//! ```

pub mod admin;
mod board;
mod config;
mod error;
mod line;
mod pin_map;
mod value;

pub use admin::{AdminError, CommandAdmin, GpioAdmin};
pub use board::{parse_revision, Board, BoardGeneration};
pub use config::Config;
pub use error::{Cause, ErrorContext, ErrorKind, GpioError};
pub use line::{Direction, LineHandle, LineOptions, ParseDirectionError, PinIdentity};
pub use pin_map::{header_pins, resolve, GEN1_PINS, GEN2_PINS};
pub use value::{coerce, Input, Value};

/// Result type of every fallible operation in this crate.
pub type GpioResult<T> = Result<T, GpioError>;
