//! Panel buttons

use embassy_rp::gpio::Input;

use deckstat_hal::InputPin;

/// Active-low push button input with pull-up
pub struct ButtonPin(pub Input<'static>);

impl InputPin for ButtonPin {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
