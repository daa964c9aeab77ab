//! Bit-banged driver for the DHT22/AM2302 temperature and humidity sensor.
//!
//! The DHT22 speaks a single-wire protocol with no clock line: the host
//! issues a long low start pulse, the sensor answers with a fixed
//! handshake, then streams 40 bits where each bit's value is the width of
//! a high pulse. This crate times those pulses directly on an
//! `embassy-rp` [`Flex`](embassy_rp::gpio::Flex) pin.
//!
//! # Quick start
//!
//! ```ignore
//! use dht22_driver::Dht22;
//! use embassy_rp::gpio::Flex;
//!
//! let mut sensor = Dht22::new(Flex::new(p.PIN_15));
//!
//! match sensor.read() {
//!     Ok(reading) => info!("{} C, {} %RH", reading.temperature, reading.humidity),
//!     Err(e) => warn!("sensor read failed: {}", e),
//! }
//! ```
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations on the error
//!   and reading types for embedded logging.

#![no_std]

pub use error::DhtError;
pub use sensor::{Dht22, Reading};

mod error;
mod sensor;
