//! Control of a single kernel GPIO line through sysfs.

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

mod options;

pub use options::{Direction, LineOptions, ParseDirectionError, PinIdentity};

use crate::error::{ErrorContext, ErrorKind};
use crate::value::{Input, Value};
use crate::{Board, GpioError, GpioResult};

/// The main abstraction of this crate: one controlled GPIO line.
///
/// A handle is created from a header pin number. The kernel line number is
/// resolved once, at creation, against the board generation, and never
/// changes afterwards. While a handle is alive its line is leased on the
/// [`Board`], so a second handle for the same line cannot be created.
///
/// Creating a handle does no I/O apart from the one-time board detection.
/// Claiming the line and setting its direction happen in
/// [`configure`](Self::configure), or manually through the individual
/// operations.
///
/// All operations take `&self` and may run concurrently. No ordering is
/// guaranteed between operations issued independently; callers needing
/// ordering must await one before issuing the next.
///
/// Dropping the handle returns the lease but does **not** unexport the line,
/// call [`release`](Self::release) for that.
#[derive(Debug)]
pub struct LineHandle {
    board: Arc<Board>,
    header_pin: u8,
    line: u32,
    options: LineOptions,
    exported: AtomicBool,
    direction: Mutex<Option<Direction>>,
}

impl LineHandle {
    /// Resolves `header_pin` and leases its line.
    ///
    /// Fails with a resolution error when the identity is missing or not a
    /// number, when the board generation cannot be detected, when the pin has
    /// no line on this board, or when another live handle holds the line.
    pub fn new(
        board: Arc<Board>,
        header_pin: impl Into<PinIdentity>,
        options: LineOptions,
    ) -> GpioResult<Self> {
        let identity = header_pin.into();
        let header_pin = identity
            .header_pin()
            .ok_or_else(|| GpioError::invalid_identity(&identity))?;
        let line = board.resolve(header_pin)?;
        board.lease(header_pin, line)?;

        debug!(header_pin, line, ?options, "Created line handle");

        Ok(Self {
            board,
            header_pin,
            line,
            options,
            exported: AtomicBool::new(false),
            direction: Mutex::new(None),
        })
    }

    /// Runs the setup requested by the handle's options.
    ///
    /// With `export` set this claims the line, then sets its direction, then
    /// configures edge detection. The first failing step aborts the remaining
    /// ones. Completed steps are not rolled back, so a failed direction change
    /// leaves the line claimed. Without `export` this does nothing.
    pub async fn configure(&self) -> GpioResult<()> {
        if !self.options.export {
            return Ok(());
        }

        self.claim(&self.options).await?;
        self.set_direction(self.options.direction).await?;
        self.configure_edge().await?;

        Ok(())
    }

    // Edge-triggered interrupts are not supported yet; this step always succeeds.
    async fn configure_edge(&self) -> GpioResult<()> {
        Ok(())
    }

    /// Claims the line for user space through the privileged helper.
    ///
    /// The helper decides whether claiming an already claimed line succeeds.
    pub async fn claim(&self, options: &LineOptions) -> GpioResult<&Self> {
        self.board
            .admin()
            .export(self.line, &options.pull)
            .await
            .map_err(|err| {
                GpioError::admin(
                    ErrorKind::Export,
                    self.context().with_options(options.clone()),
                    err,
                )
            })?;

        self.exported.store(true, Ordering::Release);
        info!(header_pin = self.header_pin, line = self.line, pull = %options.pull, "Exported line");
        Ok(self)
    }

    /// Hands the line back to the kernel through the privileged helper.
    pub async fn release(&self) -> GpioResult<&Self> {
        self.board
            .admin()
            .unexport(self.line)
            .await
            .map_err(|err| GpioError::admin(ErrorKind::Unexport, self.context(), err))?;

        self.exported.store(false, Ordering::Release);
        info!(header_pin = self.header_pin, line = self.line, "Unexported line");
        Ok(self)
    }

    /// Writes `direction` to the line's `direction` attribute, `None` meaning `out`.
    pub async fn set_direction(
        &self,
        direction: impl Into<Option<Direction>>,
    ) -> GpioResult<Direction> {
        let direction = direction.into().unwrap_or_default();

        tokio::fs::write(self.attribute("direction"), direction.as_str())
            .await
            .map_err(|err| {
                GpioError::io(
                    ErrorKind::SetDirection,
                    self.context().with_direction(direction),
                    err,
                )
            })?;

        self.cache_direction(direction);
        debug!(header_pin = self.header_pin, line = self.line, %direction, "Set direction");
        Ok(direction)
    }

    /// Reads the line's `direction` attribute verbatim.
    pub async fn get_direction(&self) -> GpioResult<String> {
        let raw = tokio::fs::read_to_string(self.attribute("direction"))
            .await
            .map_err(|err| GpioError::io(ErrorKind::GetDirection, self.context(), err))?;

        debug!(header_pin = self.header_pin, line = self.line, direction = raw.trim(), "Read direction");
        Ok(raw)
    }

    /// Reads the line's direction and parses it.
    pub async fn direction(&self) -> GpioResult<Direction> {
        let raw = self.get_direction().await?;
        let direction = raw.parse::<Direction>().map_err(|err| {
            GpioError::io(
                ErrorKind::GetDirection,
                self.context(),
                io::Error::new(io::ErrorKind::InvalidData, err),
            )
        })?;

        self.cache_direction(direction);
        Ok(direction)
    }

    /// Coerces `value` to `0`/`1` and writes it to the line's `value` attribute.
    ///
    /// Returns the canonical value written. See [`coerce`](crate::coerce) for
    /// the accepted spellings.
    pub async fn write(&self, value: impl Into<Input>) -> GpioResult<u8> {
        let canonical = value.into().canonical();

        tokio::fs::write(self.attribute("value"), canonical.to_string())
            .await
            .map_err(|err| {
                GpioError::io(
                    ErrorKind::Write,
                    self.context().with_value(canonical),
                    err,
                )
            })?;

        debug!(header_pin = self.header_pin, line = self.line, value = canonical, "Wrote value");
        Ok(canonical)
    }

    /// Reads the line's `value` attribute verbatim.
    pub async fn read(&self) -> GpioResult<Vec<u8>> {
        let raw = tokio::fs::read(self.attribute("value"))
            .await
            .map_err(|err| GpioError::io(ErrorKind::Read, self.context(), err))?;

        debug!(header_pin = self.header_pin, line = self.line, bytes = raw.len(), "Read value");
        Ok(raw)
    }

    /// Reads the line's `value` attribute and parses it.
    pub async fn read_value(&self) -> GpioResult<Value> {
        let raw = self.read().await?;
        Value::from_attribute(&raw).ok_or_else(|| {
            GpioError::io(
                ErrorKind::Read,
                self.context(),
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("unexpected value attribute {:?}", String::from_utf8_lossy(&raw)),
                ),
            )
        })
    }

    /// Writes in the background. Failures are logged and returned through the
    /// join handle, which may be dropped if the caller does not care.
    pub fn spawn_write(self: &Arc<Self>, value: impl Into<Input>) -> JoinHandle<GpioResult<u8>> {
        let handle = Arc::clone(self);
        let value = value.into();

        tokio::spawn(async move {
            let result = handle.write(value).await;
            if let Err(err) = &result {
                warn!(header_pin = handle.header_pin, line = handle.line, error = %err, "Background write failed");
            }
            result
        })
    }

    /// Reads in the background, see [`spawn_write`](Self::spawn_write).
    pub fn spawn_read(self: &Arc<Self>) -> JoinHandle<GpioResult<Vec<u8>>> {
        let handle = Arc::clone(self);

        tokio::spawn(async move {
            let result = handle.read().await;
            if let Err(err) = &result {
                warn!(header_pin = handle.header_pin, line = handle.line, error = %err, "Background read failed");
            }
            result
        })
    }

    pub fn header_pin(&self) -> u8 {
        self.header_pin
    }

    /// Kernel line number the header pin resolved to.
    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn options(&self) -> &LineOptions {
        &self.options
    }

    /// Whether the last claim/release through this handle left the line claimed.
    ///
    /// Informational only: the kernel state may have been changed by others.
    pub fn is_exported(&self) -> bool {
        self.exported.load(Ordering::Acquire)
    }

    /// Last direction set or read through this handle.
    pub fn cached_direction(&self) -> Option<Direction> {
        *self.direction.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn cache_direction(&self, direction: Direction) {
        *self.direction.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(direction);
    }

    fn attribute(&self, name: &str) -> PathBuf {
        self.board.config().line_dir(self.line).join(name)
    }

    fn context(&self) -> ErrorContext {
        ErrorContext::line(self.header_pin, self.line)
    }
}

impl Drop for LineHandle {
    fn drop(&mut self) {
        self.board.release_lease(self.line);
    }
}
