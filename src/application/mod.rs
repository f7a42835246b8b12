//! Use-case layer.

pub mod services;
