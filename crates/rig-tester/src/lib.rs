//! Diagnostic tester: a bounded transaction queue, the controller task that
//! owns the CAN link, and periodic pollers for RPM, speed, and VIN.

pub mod config;
pub mod controller;
pub mod poller;
pub mod transaction;

pub use transaction::{ObdRequest, TesterError, TesterHandle, TesterResult};
