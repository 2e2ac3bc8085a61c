//! A very basic example of a program blinking a LED diode through sysfs.
//!
//! This example assumes that header pin #7 is connected to diode's anode (+).
//! Make sure to put resistor to reduce current flowing through the diode.
//!
//! Paths and the helper command can be overridden with `GPIO_SYSFS_ROOT`,
//! `GPIO_CPUINFO_PATH` and `GPIO_ADMIN_COMMAND`. Set `RUST_LOG=debug` to see
//! every operation.

use raspi_sysfs_gpio::{Board, LineOptions};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let board = Arc::new(Board::from_env());
    let (led, setup) = board.open(7, LineOptions::default()).await?;
    setup?;

    let blink_interval = Duration::from_millis(500);

    for _ in 0..10 {
        led.write(true).await?;
        tokio::time::sleep(blink_interval).await;
        led.write(false).await?;
        tokio::time::sleep(blink_interval).await;
    }

    led.release().await?;
    Ok(())
}
