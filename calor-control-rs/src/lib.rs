//! Core thermostat logic: quadrature decoding, the shared setpoint cell,
//! and the relay threshold decision.
//!
//! This crate is hardware-free and `no_std`; everything in it runs in host
//! unit tests as well as on the target. The firmware crate wires these
//! pieces to real pins.

#![no_std]

pub mod control;
