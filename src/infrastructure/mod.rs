//! Adapters to the outside world: PostgreSQL, external HTTP APIs, and
//! WebSocket sessions.

pub mod gateway;
pub mod persistence;
pub mod ws;
