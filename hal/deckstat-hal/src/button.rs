//! Push-button edge detection
//!
//! Buttons are active-low with a pull-up. The polling loop samples each
//! button once per iteration; a press is reported exactly once, after the
//! level has been stable for the debounce time.

use crate::gpio::InputPin;

/// A discrete input that reports "was just pressed" edges
pub trait PressEdge {
    /// Housekeeping hook, called once per loop iteration before edges are read
    fn service(&mut self, _now_ms: u32) {}

    /// Returns true once for every press since the previous call
    fn was_pressed(&mut self) -> bool;
}

/// Debounced active-low button
pub struct DebouncedButton<P> {
    pin: P,
    debounce_ms: u32,
    /// Debounced level (true = pressed)
    stable: bool,
    /// Most recent raw level and when it was first seen
    candidate: bool,
    candidate_since_ms: u32,
    /// Latched press edge, cleared by `was_pressed`
    pending: bool,
}

impl<P: InputPin> DebouncedButton<P> {
    /// Create a button that starts in the released state
    pub fn new(pin: P, debounce_ms: u32) -> Self {
        Self {
            pin,
            debounce_ms,
            stable: false,
            candidate: false,
            candidate_since_ms: 0,
            pending: false,
        }
    }

    /// Sample the pin
    pub fn update(&mut self, now_ms: u32) {
        let level = self.pin.is_low();

        if level != self.candidate {
            self.candidate = level;
            self.candidate_since_ms = now_ms;
            return;
        }

        if self.candidate != self.stable
            && now_ms.wrapping_sub(self.candidate_since_ms) >= self.debounce_ms
        {
            self.stable = self.candidate;
            if self.stable {
                self.pending = true;
            }
        }
    }

    /// Debounced pressed state
    pub fn is_pressed(&self) -> bool {
        self.stable
    }
}

impl<P: InputPin> PressEdge for DebouncedButton<P> {
    fn service(&mut self, now_ms: u32) {
        self.update(now_ms);
    }

    fn was_pressed(&mut self) -> bool {
        core::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct FakePin<'a>(&'a Cell<bool>);

    impl InputPin for FakePin<'_> {
        fn is_high(&self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn test_press_reported_once_after_debounce() {
        let level = Cell::new(true);
        let mut button = DebouncedButton::new(FakePin(&level), 20);

        button.service(0);
        assert!(!button.was_pressed());

        level.set(false);
        button.service(5);
        button.service(15);
        assert!(!button.was_pressed(), "still bouncing");

        button.service(25);
        assert!(button.is_pressed());
        assert!(button.was_pressed());
        assert!(!button.was_pressed(), "edge must be consumed");

        // Holding does not repeat
        button.service(500);
        assert!(!button.was_pressed());
    }

    #[test]
    fn test_glitch_shorter_than_debounce_is_ignored() {
        let level = Cell::new(true);
        let mut button = DebouncedButton::new(FakePin(&level), 20);

        level.set(false);
        button.service(0);
        level.set(true);
        button.service(10);
        button.service(40);

        assert!(!button.was_pressed());
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_second_press_after_release() {
        let level = Cell::new(true);
        let mut button = DebouncedButton::new(FakePin(&level), 10);

        for (now, pressed) in [(0, true), (10, true), (20, false), (30, false), (40, true), (50, true)] {
            level.set(!pressed);
            button.service(now);
        }

        // Two distinct presses, but the latch holds a single pending edge
        assert!(button.was_pressed());
        assert!(!button.was_pressed());
    }

    #[test]
    fn test_debounce_across_counter_wrap() {
        let level = Cell::new(false);
        let mut button = DebouncedButton::new(FakePin(&level), 20);

        button.service(u32::MAX - 5);
        button.service(u32::MAX - 5);
        assert!(!button.was_pressed());
        button.service(20);
        assert!(button.was_pressed());
    }
}
