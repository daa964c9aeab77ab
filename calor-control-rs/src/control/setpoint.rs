use core::sync::atomic::{AtomicI32, Ordering};

use super::decoder::Direction;
use super::{SETPOINT_MAX, SETPOINT_MIN};

/// Shared setpoint counter, clamped to [`SETPOINT_MIN`]..=[`SETPOINT_MAX`].
///
/// The cell is written exclusively from the encoder handler context and
/// read from the control loop. Because the value is a single machine word
/// in an [`AtomicI32`], the reader can never observe a torn or
/// out-of-range value; every load returns the result of some completed
/// update.
///
/// [`apply`](Self::apply) is a plain load/compute/store rather than a
/// compare-and-swap loop. That is only race-free under the single-writer
/// rule above; do not apply steps from more than one context.
///
/// # Example
///
/// ```
/// use calor::control::{Direction, Setpoint};
///
/// static SETPOINT: Setpoint = Setpoint::new();
///
/// SETPOINT.apply(Direction::Clockwise);
/// assert_eq!(SETPOINT.get(), 1);
/// ```
#[derive(Debug)]
pub struct Setpoint {
    value: AtomicI32,
}

impl Setpoint {
    /// Create a cell initialized to [`SETPOINT_MIN`].
    ///
    /// `const` so the cell can live in a `static` shared between the
    /// encoder handler and the control loop.
    pub const fn new() -> Self {
        Self {
            value: AtomicI32::new(SETPOINT_MIN),
        }
    }

    /// Current setpoint in degrees Celsius, always within range.
    pub fn get(&self) -> i32 {
        self.value.load(Ordering::Relaxed)
    }

    /// Overwrite the setpoint, clamping into range.
    pub fn set(&self, value: i32) {
        self.value
            .store(value.clamp(SETPOINT_MIN, SETPOINT_MAX), Ordering::Relaxed);
    }

    /// Apply one decoded encoder step.
    ///
    /// Clockwise steps saturate at [`SETPOINT_MAX`], counter-clockwise
    /// steps at [`SETPOINT_MIN`]; there is no wraparound. Writer-context
    /// only, see the type docs.
    pub fn apply(&self, direction: Direction) {
        let current = self.value.load(Ordering::Relaxed);
        let next = match direction {
            Direction::Clockwise => (current + 1).min(SETPOINT_MAX),
            Direction::CounterClockwise => (current - 1).max(SETPOINT_MIN),
        };
        self.value.store(next, Ordering::Relaxed);
    }
}

impl Default for Setpoint {
    fn default() -> Self {
        Self::new()
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Initial state ────────────────────────────────────────────────

    #[test]
    fn starts_at_minimum() {
        let setpoint = Setpoint::new();
        assert_eq!(setpoint.get(), SETPOINT_MIN);
    }

    // ── Stepping ─────────────────────────────────────────────────────

    #[test]
    fn clockwise_increments_by_one() {
        let setpoint = Setpoint::new();
        setpoint.apply(Direction::Clockwise);
        assert_eq!(setpoint.get(), 1);
    }

    #[test]
    fn counter_clockwise_decrements_by_one() {
        let setpoint = Setpoint::new();
        setpoint.set(10);
        setpoint.apply(Direction::CounterClockwise);
        assert_eq!(setpoint.get(), 9);
    }

    // ── Saturation ───────────────────────────────────────────────────

    #[test]
    fn clockwise_saturates_at_maximum() {
        let setpoint = Setpoint::new();
        for _ in 0..200 {
            setpoint.apply(Direction::Clockwise);
            assert!(setpoint.get() <= SETPOINT_MAX);
        }
        assert_eq!(setpoint.get(), SETPOINT_MAX);

        // A further valid step leaves it pinned.
        setpoint.apply(Direction::Clockwise);
        assert_eq!(setpoint.get(), SETPOINT_MAX);
    }

    #[test]
    fn counter_clockwise_saturates_at_minimum() {
        let setpoint = Setpoint::new();
        setpoint.set(3);
        for _ in 0..200 {
            setpoint.apply(Direction::CounterClockwise);
            assert!(setpoint.get() >= SETPOINT_MIN);
        }
        assert_eq!(setpoint.get(), SETPOINT_MIN);
    }

    // ── set() clamping ───────────────────────────────────────────────

    #[test]
    fn set_clamps_into_range() {
        let setpoint = Setpoint::new();
        setpoint.set(999);
        assert_eq!(setpoint.get(), SETPOINT_MAX);
        setpoint.set(-5);
        assert_eq!(setpoint.get(), SETPOINT_MIN);
        setpoint.set(22);
        assert_eq!(setpoint.get(), 22);
    }

    // ── Mixed sequences stay in range ────────────────────────────────

    #[test]
    fn arbitrary_step_sequence_never_leaves_range() {
        let setpoint = Setpoint::new();
        let steps = [
            Direction::Clockwise,
            Direction::Clockwise,
            Direction::CounterClockwise,
            Direction::Clockwise,
            Direction::CounterClockwise,
            Direction::CounterClockwise,
            Direction::CounterClockwise,
        ];

        for direction in steps.iter().cycle().take(1000).copied() {
            setpoint.apply(direction);
            let value = setpoint.get();
            assert!((SETPOINT_MIN..=SETPOINT_MAX).contains(&value));
        }
    }
}
