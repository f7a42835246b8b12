//! Asynchronous verification pipeline.
//!
//! Short-URL creation returns immediately; safety checks, branded-name
//! screening, and QR rendering happen in background workers fed by bounded
//! mpsc channels. Redirects are gated on the recorded results, so a link is
//! never served before its checks complete.

pub mod branded_worker;
pub mod jobs;
pub mod qr_worker;
pub mod safety_worker;

pub use branded_worker::run_branded_worker;
pub use jobs::{BrandedCheckJob, QrJob, SafetyCheckJob};
pub use qr_worker::run_qr_worker;
pub use safety_worker::run_safety_worker;
