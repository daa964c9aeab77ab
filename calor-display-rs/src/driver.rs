//! Core TFT driver wrapping `lcd-async`'s ST7789 model.
//!
//! [`TftDriver`] manages the panel lifecycle: construction without bus
//! traffic, explicit async initialisation, framebuffer drawing, and
//! full-frame flush.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiDevice;
use lcd_async::{
    interface::SpiInterface,
    models::ST7789,
    options::{ColorInversion, ColorOrder, Orientation},
    raw_framebuf::RawFrameBuf,
    Builder, Display,
};

use crate::error::TftError;

/// Panel width in pixels.
pub const DISPLAY_WIDTH: usize = 240;

/// Panel height in pixels.
pub const DISPLAY_HEIGHT: usize = 240;

/// Framebuffer size in bytes (RGB565, two bytes per pixel).
pub const FRAME_BYTES: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT * 2;

/// Concrete panel type used internally by [`TftDriver`].
type Panel<SPI, DC, RST> = Display<SpiInterface<SPI, DC>, ST7789, RST>;

/// Async driver for an ST7789 240x240 TFT over SPI.
///
/// Drawing happens in an external framebuffer supplied at construction
/// (the frame is 112.5 KiB, too large to live inside the driver on an
/// embedded stack); [`flush()`](Self::flush) pushes the whole frame to the
/// panel in one transfer.
///
/// # Lifecycle
///
/// 1. [`TftDriver::new()`] — constructs the driver without any SPI traffic.
/// 2. [`TftDriver::init()`] — resets the panel and sends the ST7789
///    initialisation sequence.
/// 3. Draw into the framebuffer via [`TftDriver::frame_mut()`].
/// 4. [`TftDriver::flush()`] — transfers the framebuffer to the panel.
pub struct TftDriver<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Bus parts held between construction and `init()`.
    parts: Option<(SPI, DC, RST)>,
    /// The initialised panel. `Some` after a successful `init()`.
    panel: Option<Panel<SPI, DC, RST>>,
    framebuffer: &'static mut [u8],
}

impl<SPI, DC, RST> TftDriver<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Construct an uninitialised driver.
    ///
    /// No SPI traffic is generated. You **must** call
    /// [`init()`](Self::init) before flushing.
    ///
    /// # Arguments
    /// * `spi` — SPI device (takes ownership for exclusive access).
    /// * `dc` — data/command select pin.
    /// * `rst` — panel reset pin.
    /// * `framebuffer` — RGB565 buffer of exactly [`FRAME_BYTES`] bytes.
    pub fn new(spi: SPI, dc: DC, rst: RST, framebuffer: &'static mut [u8]) -> Self {
        Self {
            parts: Some((spi, dc, rst)),
            panel: None,
            framebuffer,
        }
    }

    /// Initialise the panel hardware.
    ///
    /// Sends the reset and initialisation sequence over SPI. Must be
    /// called exactly once before any flush operations.
    ///
    /// The panel is configured for RGB subpixel order with inverted
    /// colors, which is what the common ST7789 IPS modules need for
    /// correct hues.
    ///
    /// # Errors
    ///
    /// Returns [`TftError::InitializationFailed`] if the panel does not
    /// come up, or if `init` is called again after a successful
    /// initialisation.
    pub async fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), TftError> {
        let (spi, dc, rst) = self
            .parts
            .take()
            .ok_or(TftError::InitializationFailed)?;

        let interface = SpiInterface::new(spi, dc);
        let panel = Builder::new(ST7789, interface)
            .display_size(DISPLAY_WIDTH as u16, DISPLAY_HEIGHT as u16)
            .color_order(ColorOrder::Rgb)
            .invert_colors(ColorInversion::Inverted)
            .orientation(Orientation::new())
            .reset_pin(rst)
            .init(delay)
            .await
            .map_err(|_| TftError::InitializationFailed)?;

        self.panel = Some(panel);
        Ok(())
    }

    /// Clear the in-memory framebuffer to black.
    ///
    /// Does **not** send any SPI traffic; the panel is unchanged until
    /// [`flush()`](Self::flush) is called.
    pub fn clear_buffer(&mut self) {
        self.framebuffer.fill(0);
    }

    /// Returns a [`DrawTarget`](embedded_graphics::draw_target::DrawTarget)
    /// view of the framebuffer for `embedded-graphics` rendering.
    ///
    /// Available before `init()` as well; drawing only touches memory.
    pub fn frame_mut(&mut self) -> RawFrameBuf<Rgb565, &mut [u8]> {
        RawFrameBuf::new(&mut self.framebuffer[..], DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }

    /// Transfer the framebuffer to the panel.
    ///
    /// # Errors
    ///
    /// Returns [`TftError::NotInitialized`] if [`init()`](Self::init) has
    /// not succeeded, or [`TftError::Interface`] on a bus-level failure.
    pub async fn flush(&mut self) -> Result<(), TftError> {
        let panel = self.panel.as_mut().ok_or(TftError::NotInitialized)?;
        panel
            .show_raw_data(
                0,
                0,
                DISPLAY_WIDTH as u16,
                DISPLAY_HEIGHT as u16,
                self.framebuffer,
            )
            .await
            .map_err(|_| TftError::Interface)?;
        Ok(())
    }

    /// Check whether the panel has been successfully initialised.
    pub fn is_initialized(&self) -> bool {
        self.panel.is_some()
    }
}
