//! DHT22 transaction timing and frame decoding.

use embassy_rp::gpio::{Flex, Pull};
use embassy_time::{block_for, Duration, Instant};

use crate::error::DhtError;

/// Host start pulse width. The part accepts roughly 1-10 ms.
const START_PULSE: Duration = Duration::from_millis(2);

/// Deadline for each phase of the sensor's response handshake
/// (nominally 80 us low, 80 us high).
const RESPONSE_TIMEOUT: Duration = Duration::from_micros(200);

/// Deadline for each phase of a data bit (50 us low preamble plus a high
/// pulse of at most ~75 us).
const BIT_TIMEOUT: Duration = Duration::from_micros(150);

/// High pulses longer than this are a 1 bit (~26 us means 0, ~70 us
/// means 1).
const ONE_THRESHOLD: Duration = Duration::from_micros(50);

/// One decoded sensor sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Temperature in degrees Celsius, 0.1 degree resolution.
    pub temperature: f32,
    /// Relative humidity in percent, 0.1 % resolution.
    pub humidity: f32,
}

/// DHT22 sensor on a single bidirectional data line.
///
/// The pin direction is flipped between output (start pulse) and input
/// (everything else); the idle state is input with the pull-up enabled,
/// matching the bus's open-drain convention.
pub struct Dht22<'d> {
    pin: Flex<'d>,
}

impl<'d> Dht22<'d> {
    /// Take ownership of the data pin and put it in the idle state.
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_pull(Pull::Up);
        pin.set_as_input();
        Self { pin }
    }

    /// Perform one complete sensor transaction.
    ///
    /// Blocks for the duration of the protocol (about 5 ms on success).
    /// The datasheet specifies a minimum of 2 s between reads for stable
    /// values; polling faster returns the previous conversion, which is
    /// how the deployed device uses it at a 1 s cadence.
    pub fn read(&mut self) -> Result<Reading, DhtError> {
        // Start signal: drive the line low, then release it back to the
        // pull-up and let the sensor take over.
        self.pin.set_low();
        self.pin.set_as_output();
        block_for(START_PULSE);
        self.pin.set_as_input();

        // Response handshake: the sensor pulls low for ~80 us, releases
        // for ~80 us, then begins the first bit's low preamble.
        self.wait_for(false, RESPONSE_TIMEOUT)?;
        self.wait_for(true, RESPONSE_TIMEOUT)?;
        self.wait_for(false, RESPONSE_TIMEOUT)?;

        // 40 data bits, most significant bit first.
        let mut data = [0u8; 5];
        for bit in 0..40 {
            self.wait_for(true, BIT_TIMEOUT)?;
            let start = Instant::now();
            self.wait_for(false, BIT_TIMEOUT)?;

            if start.elapsed() > ONE_THRESHOLD {
                data[bit / 8] |= 0x80 >> (bit % 8);
            }
        }

        decode_frame(data)
    }

    /// Busy-wait until the line reaches `level`, or fail once `timeout`
    /// has elapsed. Pulse widths here are tens of microseconds, so this
    /// polls the pin directly instead of going through the interrupt
    /// machinery.
    fn wait_for(&mut self, level: bool, timeout: Duration) -> Result<(), DhtError> {
        let deadline = Instant::now() + timeout;
        while self.pin.is_high() != level {
            if Instant::now() > deadline {
                return Err(DhtError::Timeout);
            }
        }
        Ok(())
    }
}

/// Validate the checksum and convert the raw 5-byte frame.
///
/// Layout: humidity hi/lo, temperature hi/lo, checksum. Both values are
/// tenths; the temperature sign lives in the top bit of its high byte.
fn decode_frame(data: [u8; 5]) -> Result<Reading, DhtError> {
    let sum = data[0]
        .wrapping_add(data[1])
        .wrapping_add(data[2])
        .wrapping_add(data[3]);
    if sum != data[4] {
        return Err(DhtError::Checksum);
    }

    let humidity_raw = u16::from_be_bytes([data[0], data[1]]);
    let temperature_raw = u16::from_be_bytes([data[2] & 0x7F, data[3]]);

    let mut temperature = temperature_raw as f32 / 10.0;
    if data[2] & 0x80 != 0 {
        temperature = -temperature;
    }

    Ok(Reading {
        temperature,
        humidity: humidity_raw as f32 / 10.0,
    })
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(h: u16, t_raw: u16, negative: bool) -> [u8; 5] {
        let [h_hi, h_lo] = h.to_be_bytes();
        let [mut t_hi, t_lo] = t_raw.to_be_bytes();
        if negative {
            t_hi |= 0x80;
        }
        let sum = h_hi
            .wrapping_add(h_lo)
            .wrapping_add(t_hi)
            .wrapping_add(t_lo);
        [h_hi, h_lo, t_hi, t_lo, sum]
    }

    #[test]
    fn decodes_a_known_good_frame() {
        // 65.2 %RH, 35.1 C.
        let reading = decode_frame(frame(652, 351, false)).unwrap();
        assert_eq!(reading.humidity, 65.2);
        assert_eq!(reading.temperature, 35.1);
    }

    #[test]
    fn sign_bit_negates_the_temperature() {
        // 41.0 %RH, -6.5 C.
        let reading = decode_frame(frame(410, 65, true)).unwrap();
        assert_eq!(reading.humidity, 41.0);
        assert_eq!(reading.temperature, -6.5);
    }

    #[test]
    fn checksum_wraps_modulo_256() {
        // 99.9 %RH / 60.0 C: the byte sum is 324, the checksum byte only
        // keeps the low 8 bits.
        let data = frame(999, 600, false);
        assert!(decode_frame(data).is_ok());
    }

    #[test]
    fn bad_checksum_is_rejected() {
        let mut data = frame(652, 351, false);
        data[4] ^= 0x01;
        assert_eq!(decode_frame(data), Err(DhtError::Checksum));
    }

    #[test]
    fn zero_frame_is_valid() {
        let reading = decode_frame([0, 0, 0, 0, 0]).unwrap();
        assert_eq!(reading.temperature, 0.0);
        assert_eq!(reading.humidity, 0.0);
    }
}
