//! Simulated board environment.

use async_trait::async_trait;
use raspi_sysfs_gpio::{AdminError, Board, Config, GpioAdmin};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const CPUINFO_GEN1: &str = "processor\t: 0\nHardware\t: BCM2708\nRevision\t: 0003\n";
pub const CPUINFO_GEN2: &str = "processor\t: 0\nHardware\t: BCM2835\nRevision\t: a22082\n";

/// Helper double recording every invocation as a command line.
#[derive(Default)]
pub struct MockAdmin {
    pub fail: bool,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockAdmin {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), AdminError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            Err(AdminError::ExitStatus(Some(1)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl GpioAdmin for MockAdmin {
    async fn export(&self, line: u32, pull: &str) -> Result<(), AdminError> {
        self.record(format!("gpio-admin export {} {}", line, pull))
    }

    async fn unexport(&self, line: u32) -> Result<(), AdminError> {
        self.record(format!("gpio-admin unexport {}", line))
    }
}

pub struct SimBoard {
    pub dir: TempDir,
    pub admin: Arc<MockAdmin>,
    pub board: Arc<Board>,
}

#[allow(dead_code)]
impl SimBoard {
    pub fn new(cpuinfo: &str, admin: MockAdmin) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let gpio_root = dir.path().join("sys/class/gpio");
        fs::create_dir_all(&gpio_root).unwrap();
        fs::create_dir_all(dir.path().join("proc")).unwrap();
        fs::write(dir.path().join("proc/cpuinfo"), cpuinfo).unwrap();

        let admin = Arc::new(admin);
        let config = Config::default()
            .with_sysfs_root(gpio_root)
            .with_cpuinfo_path(dir.path().join("proc/cpuinfo"));
        let board = Arc::new(Board::with_admin(config, admin.clone()));

        Self { dir, admin, board }
    }

    pub fn gen2() -> Self {
        Self::new(CPUINFO_GEN2, MockAdmin::default())
    }

    pub fn cpuinfo_path(&self) -> PathBuf {
        self.dir.path().join("proc/cpuinfo")
    }

    /// Creates `gpioN` as the kernel would after a successful export.
    pub fn export_dir(&self, line: u32) -> PathBuf {
        let path = self.board.config().line_dir(line);
        fs::create_dir_all(&path).unwrap();
        path
    }

    pub fn attribute(&self, line: u32, name: &str) -> String {
        fs::read_to_string(self.board.config().line_dir(line).join(name)).unwrap()
    }
}
