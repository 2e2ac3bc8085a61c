use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

mod leases;

use crate::admin::{CommandAdmin, GpioAdmin};
use crate::error::Cause;
use crate::line::{LineHandle, LineOptions, PinIdentity};
use crate::{pin_map, Config, GpioError, GpioResult};
use leases::Leases;

/// Hardware revision class deciding which header-to-line mapping applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardGeneration {
    /// Model B revision 1 boards (revision codes `0002` and `0003`).
    Gen1,
    /// Everything else.
    Gen2,
}

impl BoardGeneration {
    /// Revision codes from this value upwards use the second pin mapping.
    pub const GEN2_FIRST_REVISION: u32 = 0x0004;

    pub fn from_revision(revision: u32) -> Self {
        if revision < Self::GEN2_FIRST_REVISION {
            BoardGeneration::Gen1
        } else {
            BoardGeneration::Gen2
        }
    }
}

impl fmt::Display for BoardGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardGeneration::Gen1 => f.write_str("Gen1"),
            BoardGeneration::Gen2 => f.write_str("Gen2"),
        }
    }
}

/// Extracts the revision code from `/proc/cpuinfo`-style text.
///
/// Looks for a `Revision : <hex>` line and keeps only the last four hex digits,
/// which drops the warranty/overvolt flags and new-style revision prefixes.
/// Returns `None` when no such line carries at least four hex digits.
pub fn parse_revision(cpuinfo: &str) -> Option<u32> {
    cpuinfo.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        if key.trim() != "Revision" {
            return None;
        }

        let digits: &str = {
            let value = value.trim_start();
            let end = value
                .find(|c: char| !c.is_ascii_hexdigit())
                .unwrap_or(value.len());
            &value[..end]
        };

        if digits.len() < 4 {
            return None;
        }

        u32::from_str_radix(&digits[digits.len() - 4..], 16).ok()
    })
}

fn detect(cpuinfo_path: &Path) -> GpioResult<BoardGeneration> {
    let cpuinfo = std::fs::read_to_string(cpuinfo_path)
        .map_err(|err| GpioError::undetectable(Cause::SystemInfo(err)))?;
    let revision =
        parse_revision(&cpuinfo).ok_or_else(|| GpioError::undetectable(Cause::RevisionNotFound))?;

    let generation = BoardGeneration::from_revision(revision);
    info!(revision = %format!("{:04x}", revision), %generation, "Detected board generation");
    Ok(generation)
}

/// Registry shared by every [`LineHandle`] of a board.
///
/// A `Board` owns the process-wide state of this crate: where the external
/// collaborators live, the privileged helper used to claim lines, the board
/// generation (detected once, on first use) and the set of lines currently held
/// by live handles.
///
/// Create one per process and share it behind an `Arc`.
pub struct Board {
    config: Config,
    admin: Arc<dyn GpioAdmin>,
    generation: OnceLock<BoardGeneration>,
    leases: Leases,
}

impl Board {
    /// Board using the helper command named in `config`.
    pub fn new(config: Config) -> Self {
        let admin = Arc::new(CommandAdmin::new(config.admin_command.clone()));
        Self::with_admin(config, admin)
    }

    /// Board using a custom helper implementation.
    pub fn with_admin(config: Config, admin: Arc<dyn GpioAdmin>) -> Self {
        Self {
            config,
            admin,
            generation: OnceLock::new(),
            leases: Leases::new(),
        }
    }

    /// Board configured from the environment, see [`Config::from_env`].
    pub fn from_env() -> Self {
        Self::new(Config::from_env())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn admin(&self) -> &dyn GpioAdmin {
        self.admin.as_ref()
    }

    /// Board generation, read from the system information file on first call.
    ///
    /// Once detection succeeded the result is cached for the lifetime of the
    /// board and the file is never read again. A failed detection is not
    /// cached.
    pub fn generation(&self) -> GpioResult<BoardGeneration> {
        if let Some(generation) = self.generation.get() {
            return Ok(*generation);
        }

        let detected = detect(&self.config.cpuinfo_path)?;
        Ok(*self.generation.get_or_init(|| detected))
    }

    /// Kernel line number of `header_pin` on this board.
    pub fn resolve(&self, header_pin: u8) -> GpioResult<u32> {
        pin_map::resolve(self.generation()?, header_pin)
    }

    /// Creates a handle and runs its setup, see [`LineHandle::configure`].
    ///
    /// Identity errors are returned as the outer error, before any I/O.
    /// The setup result is returned next to the handle, because a failed setup
    /// is not rolled back and the caller may still want to release the line.
    pub async fn open(
        self: &Arc<Self>,
        header_pin: impl Into<PinIdentity>,
        options: LineOptions,
    ) -> GpioResult<(LineHandle, GpioResult<()>)> {
        let handle = LineHandle::new(Arc::clone(self), header_pin, options)?;
        let setup = handle.configure().await;
        Ok((handle, setup))
    }

    pub(crate) fn lease(&self, header_pin: u8, line: u32) -> GpioResult<()> {
        if self.leases.lease(line) {
            debug!(header_pin, line, "Leased line");
            Ok(())
        } else {
            Err(GpioError::line_in_use(header_pin, line))
        }
    }

    pub(crate) fn release_lease(&self, line: u32) {
        self.leases.release(line);
        debug!(line, "Returned line lease");
    }

    /// Whether a live handle currently holds `line`.
    pub fn is_leased(&self, line: u32) -> bool {
        self.leases.is_leased(line)
    }

    /// Forget the detected generation so the next call detects it again.
    #[cfg(test)]
    pub(crate) fn reset_generation(&mut self) {
        self.generation = OnceLock::new();
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("config", &self.config)
            .field("generation", &self.generation.get())
            .finish_non_exhaustive()
    }
}
