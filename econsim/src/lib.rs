//! Runner support for the `econsim` binary: scenario loading and reporting.

pub mod report;
pub mod scenario;
