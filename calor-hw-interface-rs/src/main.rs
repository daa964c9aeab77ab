//! calor-hw-interface
//!
//! Thermostat firmware for the Raspberry Pi Pico 2. Wires the three
//! library crates into the running device:
//!
//! 1. The rotary encoder is turned; either encoder line changing level
//!    wakes the encoder task on the interrupt executor.
//! 2. The task samples both lines, feeds the quadrature decoder, and
//!    applies the decoded step to the shared atomic `Setpoint`.
//! 3. The control loop wakes on its 1 s timer, reads the DHT22 and the
//!    setpoint, drives the relay (on iff temperature < setpoint), and
//!    repaints the status screen.
//!
//! The encoder task runs at raised interrupt priority, so it preempts the
//! control loop at arbitrary points; the setpoint cell is the only state
//! crossing that boundary.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_futures::select::select;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Flex, Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_time::{Delay, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::ConstStaticCell;
use {defmt_rtt as _, panic_probe as _};

use calor::control::{QuadratureDecoder, RelayState, Setpoint};
use calor_display_rs::{render_status, DisplayConfig, StatusScreen, TftDriver, FRAME_BYTES};
use dht22_driver::Dht22;

// ---------------------------------------------------------------------------
// Boot block and executors
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// High-priority executor for the encoder task. Dispatched from a software
/// interrupt so the task preempts the control loop the way a pin-change
/// ISR would.
static ENCODER_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    ENCODER_EXECUTOR.on_interrupt()
}

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// User setpoint, written by the encoder task, read by the control loop.
/// A single-word atomic: the control loop never observes a torn value.
static SETPOINT: Setpoint = Setpoint::new();

/// RGB565 framebuffer for the status panel. Lives in a static because the
/// full frame (112.5 KiB) does not fit on any task stack.
static FRAMEBUFFER: ConstStaticCell<[u8; FRAME_BYTES]> =
    ConstStaticCell::new([0; FRAME_BYTES]);

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Edge-driven encoder monitoring task.
///
/// Waits for a level change on either encoder line, samples both lines,
/// and applies any decoded step to [`SETPOINT`]. Each wakeup does a
/// bounded amount of work and never blocks; during fast rotation the
/// wakeups recur rapidly. Edges that land while a sample is being
/// processed are latched by the GPIO interrupt, but their intermediate
/// levels are not observed, so a fast double-step can be absorbed as a
/// bounce. The decoder tolerates that by design.
#[embassy_executor::task]
async fn encoder_task(mut pulse_a: Input<'static>, mut pulse_b: Input<'static>) {
    info!("Encoder task started");
    let mut decoder = QuadratureDecoder::new();

    loop {
        select(pulse_a.wait_for_any_edge(), pulse_b.wait_for_any_edge()).await;

        if let Some(direction) = decoder.update(pulse_a.is_high(), pulse_b.is_high()) {
            SETPOINT.apply(direction);
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("calor starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // TFT_DC   → GP8    TFT data/command select
    // TFT_CS   → GP9    TFT chip select
    // TFT_SCK  → GP10   SPI1 clock
    // TFT_MOSI → GP11   SPI1 data
    // ENC_A    → GP12   encoder line A, pull-up, edge-triggered
    // ENC_B    → GP13   encoder line B, pull-up, edge-triggered
    // TFT_RST  → GP14   TFT reset
    // DHT_DATA → GP15   DHT22 single-wire data
    // RELAY    → GP27   relay drive, HIGH = on
    // ———————————————————————————————————————————————————————————————————————

    // Encoder inputs idle high through the pull-ups; both lines route to
    // the same decoder.
    let pulse_a = Input::new(p.PIN_12, Pull::Up);
    let pulse_b = Input::new(p.PIN_13, Pull::Up);

    // Relay off at boot, before anything can fail.
    let mut relay = Output::new(p.PIN_27, Level::Low);

    let mut sensor = Dht22::new(Flex::new(p.PIN_15));

    // —— Display bring-up ———————————————————————————————————————————————————

    let dc = Output::new(p.PIN_8, Level::Low);
    let cs = Output::new(p.PIN_9, Level::High);
    let rst = Output::new(p.PIN_14, Level::Low);

    let mut spi_config = SpiConfig::default();
    spi_config.frequency = 16_000_000;

    let spi = Spi::new_txonly(p.SPI1, p.PIN_10, p.PIN_11, p.DMA_CH0, spi_config);
    let spi_device = ExclusiveDevice::new(spi, cs, Delay).unwrap();

    let mut display = TftDriver::new(spi_device, dc, rst, FRAMEBUFFER.take());

    // A dead panel must not take the thermostat down: log and keep
    // regulating blind.
    if let Err(e) = display.init(&mut Delay).await {
        error!("Display init failed: {}", e);
    }

    // —— Encoder task on the interrupt executor —————————————————————————————

    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let encoder_spawner = ENCODER_EXECUTOR.start(interrupt::SWI_IRQ_1);
    encoder_spawner.spawn(encoder_task(pulse_a, pulse_b)).unwrap();

    info!("Entering control loop");

    // —— Control loop, 1 s cadence ——————————————————————————————————————————

    let display_config = DisplayConfig::default();

    loop {
        // A failed read degrades to NaN: it compares false against the
        // setpoint, so the relay falls back to off, and the display shows
        // the value verbatim.
        let temperature = match sensor.read() {
            Ok(reading) => reading.temperature,
            Err(e) => {
                warn!("Sensor read failed: {}", e);
                f32::NAN
            }
        };

        let setpoint = SETPOINT.get();
        let relay_state = RelayState::command(temperature, setpoint);
        relay.set_level(if relay_state.is_on() {
            Level::High
        } else {
            Level::Low
        });

        debug!(
            "temperature={} setpoint={} relay={}",
            temperature, setpoint, relay_state
        );

        if display.is_initialized() {
            let screen = StatusScreen::new(temperature, setpoint, relay_state);
            display.clear_buffer();
            let _ = render_status(&mut display.frame_mut(), &screen, &display_config);
            if let Err(e) = display.flush().await {
                error!("Display flush failed: {}", e);
            }
        }

        Timer::after_secs(1).await;
    }
}
