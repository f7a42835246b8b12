//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`gateways`] - Ports to external verification services
//! - [`click_event`] / [`click_worker`] - Asynchronous click tracking
//! - [`verification`] - Safety, branded-name, and QR background pipeline
//!
//! The domain layer depends on no infrastructure; repository and gateway
//! traits are implemented in [`crate::infrastructure`].

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod gateways;
pub mod repositories;
pub mod verification;
