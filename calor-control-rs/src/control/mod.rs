//! Thermostat control state shared between the encoder handler and the
//! control loop.
//!
//! # Architecture
//!
//! Two contexts touch this module at runtime:
//!
//! - The **encoder handler** runs at interrupt priority whenever either
//!   encoder line changes level. It feeds the new (A, B) sample into a
//!   [`QuadratureDecoder`] and applies the resulting step to the shared
//!   [`Setpoint`] cell.
//! - The **control loop** runs once per second at thread priority. It
//!   reads the setpoint, compares it against the measured temperature via
//!   [`RelayState::command`], and actuates relay and display.
//!
//! # Concurrency contract
//!
//! The encoder handler can preempt the control loop between any two
//! instructions. The only state crossing that boundary is the setpoint
//! counter, held in a single-word atomic inside [`Setpoint`]: the reader
//! always observes a value produced by a completed update, never a torn
//! one. The decoder's `last_encoded` state stays private to the handler
//! context and needs no synchronization.

mod decoder;
mod relay;
mod setpoint;

pub use decoder::{classify, Direction, QuadratureDecoder};
pub use relay::RelayState;
pub use setpoint::Setpoint;

/// Lowest selectable setpoint in degrees Celsius.
pub const SETPOINT_MIN: i32 = 0;

/// Highest selectable setpoint in degrees Celsius.
pub const SETPOINT_MAX: i32 = 60;
