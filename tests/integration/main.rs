//! Integration test driver for `tests/integration/`.
//!
//! Every test runs against a simulated `/sys/class/gpio` tree and
//! `/proc/cpuinfo` in a temporary directory, with a recording double in
//! place of the privileged helper. No real hardware is required.

mod detection_tests;
mod handle_tests;
mod sim;
