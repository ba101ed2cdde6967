#![doc(test(attr(deny(warnings))))]

//! Payslip Core decides whether monetary components extracted from scanned
//! payslips are trustworthy, repairs them when a cheap high-confidence fix
//! exists, and explains what it could not repair.

pub mod confidence;
pub mod constraints;
pub mod domain;
pub mod errors;
pub mod outlier;
pub mod recon;
pub mod utils;
pub mod validation;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Payslip Core tracing initialized.");
    });
}
