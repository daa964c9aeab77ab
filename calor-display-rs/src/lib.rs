//! ST7789 status display for the calor thermostat.
//!
//! This crate provides [`TftDriver`], a lifecycle wrapper around the
//! [`lcd-async`](lcd_async) ST7789 model drawing into an external RGB565
//! framebuffer, and [`render_status`], which paints the three status
//! lines (temperature, setpoint, relay state) for one control cycle.
//!
//! # Quick start
//!
//! ```ignore
//! use calor_display_rs::{render_status, DisplayConfig, StatusScreen, TftDriver, FRAME_BYTES};
//!
//! static FRAMEBUFFER: ConstStaticCell<[u8; FRAME_BYTES]> = ConstStaticCell::new([0; FRAME_BYTES]);
//!
//! let mut display = TftDriver::new(spi_device, dc, rst, FRAMEBUFFER.take());
//! display.init(&mut Delay).await?;
//!
//! display.clear_buffer();
//! render_status(&mut display.frame_mut(), &screen, &DisplayConfig::default()).ok();
//! display.flush().await?;
//! ```
//!
//! # Crate features
//!
//! - **`defmt`** — structured logging via [`defmt`].

#![no_std]

pub mod driver;
pub mod error;
pub mod layout;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use driver::{TftDriver, DISPLAY_HEIGHT, DISPLAY_WIDTH, FRAME_BYTES};
pub use error::TftError;
pub use layout::{render_status, DisplayConfig, StatusScreen};
