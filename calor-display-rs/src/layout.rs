//! Status screen layout and rendering.
//!
//! This module defines the [`StatusScreen`] snapshot, the line formatting
//! helpers, and the [`render_status`] function that draws one frame with
//! `embedded-graphics`.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::{ascii::FONT_10X20, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    text::Text,
};
use heapless::String;

use calor::control::RelayState;

// ── DisplayConfig ────────────────────────────────────────────────────────

/// Text geometry for the status screen.
///
/// All layout positions live here rather than as module constants, so the
/// firmware can adjust for a different panel without touching library
/// source. [`DisplayConfig::default()`] reproduces the device layout.
#[derive(Debug, Clone, Copy)]
pub struct DisplayConfig {
    /// Left margin for all three lines, in pixels.
    pub margin_x: i32,
    /// Baseline Y of the temperature line. Default: 40.
    pub temperature_y: i32,
    /// Baseline Y of the setpoint line. Default: 80.
    pub setpoint_y: i32,
    /// Baseline Y of the relay line. Default: 120.
    pub relay_y: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            margin_x: 8,
            temperature_y: 40,
            setpoint_y: 80,
            relay_y: 120,
        }
    }
}

// ── StatusScreen ─────────────────────────────────────────────────────────

/// Everything one control cycle puts on the screen.
///
/// The control loop rebuilds this every second and repaints the full
/// frame; there is no diffing against the previous cycle, matching the
/// clear-then-draw behavior of the device.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusScreen {
    /// Measured temperature in degrees Celsius. NaN (failed sensor read)
    /// is rendered verbatim.
    pub temperature: f32,
    /// Current setpoint in degrees Celsius.
    pub setpoint: i32,
    /// Relay command for this cycle.
    pub relay: RelayState,
}

impl StatusScreen {
    pub fn new(temperature: f32, setpoint: i32, relay: RelayState) -> Self {
        Self {
            temperature,
            setpoint,
            relay,
        }
    }
}

// ── Line formatting ──────────────────────────────────────────────────────

/// Format the temperature line, one decimal place: `Temperature: 21.5C`.
///
/// NaN renders as `Temperature: NaNC`; the sensor fault value is shown
/// as-is rather than replaced with a warning indicator.
pub fn temperature_line(temperature: f32) -> String<24> {
    let mut line = String::new();
    // core::fmt::Write into a fixed buffer, no alloc; the buffer is sized
    // for any f32 the sensor can produce.
    let _ = write!(line, "Temperature: {:.1}C", temperature);
    line
}

/// Format the setpoint line: `Set Point: 22C`.
pub fn setpoint_line(setpoint: i32) -> String<16> {
    let mut line = String::new();
    let _ = write!(line, "Set Point: {}C", setpoint);
    line
}

/// Format the relay line: `Relay: ON` / `Relay: OFF`.
pub fn relay_line(relay: RelayState) -> String<12> {
    let mut line = String::new();
    let _ = write!(line, "Relay: {}", relay.label());
    line
}

/// Text color for the relay line: red while heating, green while idle.
pub fn relay_color(relay: RelayState) -> Rgb565 {
    match relay {
        RelayState::On => Rgb565::RED,
        RelayState::Off => Rgb565::GREEN,
    }
}

// ── Rendering ────────────────────────────────────────────────────────────

/// Render a [`StatusScreen`] to a display buffer.
///
/// The caller clears the buffer first (the frame is a full repaint).
/// Temperature and setpoint draw in white, the relay line in its state
/// color.
///
/// ```text
/// ┌──────────────────────────────┐
/// │ Temperature: 21.5C           │  ← temperature_y
/// │ Set Point: 22C               │  ← setpoint_y
/// │ Relay: ON                    │  ← relay_y (red/green)
/// └──────────────────────────────┘
/// ```
pub fn render_status<D>(
    display: &mut D,
    screen: &StatusScreen,
    config: &DisplayConfig,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let body_style = MonoTextStyle::new(&FONT_10X20, Rgb565::WHITE);
    let relay_style = MonoTextStyle::new(&FONT_10X20, relay_color(screen.relay));

    Text::new(
        temperature_line(screen.temperature).as_str(),
        Point::new(config.margin_x, config.temperature_y),
        body_style,
    )
    .draw(display)?;

    Text::new(
        setpoint_line(screen.setpoint).as_str(),
        Point::new(config.margin_x, config.setpoint_y),
        body_style,
    )
    .draw(display)?;

    Text::new(
        relay_line(screen.relay).as_str(),
        Point::new(config.margin_x, config.relay_y),
        relay_style,
    )
    .draw(display)?;

    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_line_has_one_decimal() {
        assert_eq!(temperature_line(21.5).as_str(), "Temperature: 21.5C");
        assert_eq!(temperature_line(22.0).as_str(), "Temperature: 22.0C");
        assert_eq!(temperature_line(7.25).as_str(), "Temperature: 7.2C");
    }

    #[test]
    fn temperature_line_handles_negative_values() {
        assert_eq!(temperature_line(-6.5).as_str(), "Temperature: -6.5C");
    }

    #[test]
    fn temperature_line_shows_sensor_fault_verbatim() {
        assert_eq!(temperature_line(f32::NAN).as_str(), "Temperature: NaNC");
    }

    #[test]
    fn setpoint_line_is_integer() {
        assert_eq!(setpoint_line(22).as_str(), "Set Point: 22C");
        assert_eq!(setpoint_line(0).as_str(), "Set Point: 0C");
        assert_eq!(setpoint_line(60).as_str(), "Set Point: 60C");
    }

    #[test]
    fn relay_line_uses_state_label() {
        assert_eq!(relay_line(RelayState::On).as_str(), "Relay: ON");
        assert_eq!(relay_line(RelayState::Off).as_str(), "Relay: OFF");
    }

    #[test]
    fn relay_colors_are_distinct_per_state() {
        assert_eq!(relay_color(RelayState::On), Rgb565::RED);
        assert_eq!(relay_color(RelayState::Off), Rgb565::GREEN);
        assert_ne!(relay_color(RelayState::On), relay_color(RelayState::Off));
    }

    #[test]
    fn default_config_values() {
        let c = DisplayConfig::default();
        assert_eq!(c.margin_x, 8);
        assert_eq!(c.temperature_y, 40);
        assert_eq!(c.setpoint_y, 80);
        assert_eq!(c.relay_y, 120);
    }

    #[test]
    fn status_screen_snapshot_holds_cycle_values() {
        let screen = StatusScreen::new(21.5, 22, RelayState::On);
        assert_eq!(screen.temperature, 21.5);
        assert_eq!(screen.setpoint, 22);
        assert_eq!(screen.relay, RelayState::On);
    }
}
