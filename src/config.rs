//! Locations of the external collaborators used by a [`Board`](crate::Board).
//!
//! Defaults match a stock Raspbian install. Every location can be overridden,
//! either from the environment or with the `with_*` setters, which is how the
//! test suite points the crate at a simulated `/sys` and `/proc` tree.

use std::path::PathBuf;

/// Paths and commands the crate talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the sysfs GPIO tree. Line `N` lives under `<root>/gpioN`.
    pub sysfs_root: PathBuf,

    /// File containing the `Revision : <hex>` line.
    pub cpuinfo_path: PathBuf,

    /// Privileged helper invoked as `<command> export <N> [pull]` and
    /// `<command> unexport <N>`.
    pub admin_command: String,
}

impl Config {
    pub const DEFAULT_SYSFS_ROOT: &'static str = "/sys/class/gpio";
    pub const DEFAULT_CPUINFO_PATH: &'static str = "/proc/cpuinfo";
    pub const DEFAULT_ADMIN_COMMAND: &'static str = "gpio-admin";

    /// Defaults, overridden by environment variables where set.
    ///
    /// # Environment Variables
    ///
    /// - `GPIO_SYSFS_ROOT`: sysfs GPIO root (default: `/sys/class/gpio`)
    /// - `GPIO_CPUINFO_PATH`: system information file (default: `/proc/cpuinfo`)
    /// - `GPIO_ADMIN_COMMAND`: privileged helper (default: `gpio-admin`)
    ///
    /// Empty values are treated as unset.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            sysfs_root: var("GPIO_SYSFS_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.sysfs_root),
            cpuinfo_path: var("GPIO_CPUINFO_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.cpuinfo_path),
            admin_command: var("GPIO_ADMIN_COMMAND").unwrap_or(defaults.admin_command),
        }
    }

    pub fn with_sysfs_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.sysfs_root = root.into();
        self
    }

    pub fn with_cpuinfo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cpuinfo_path = path.into();
        self
    }

    pub fn with_admin_command(mut self, command: impl Into<String>) -> Self {
        self.admin_command = command.into();
        self
    }

    /// Directory of a single exported line.
    pub fn line_dir(&self, line: u32) -> PathBuf {
        self.sysfs_root.join(format!("gpio{}", line))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sysfs_root: PathBuf::from(Self::DEFAULT_SYSFS_ROOT),
            cpuinfo_path: PathBuf::from(Self::DEFAULT_CPUINFO_PATH),
            admin_command: Self::DEFAULT_ADMIN_COMMAND.to_string(),
        }
    }
}
