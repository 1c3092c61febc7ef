//! Input handling module for the page and gear buttons
//!
//! Buttons are sampled once per loop iteration. There is no debouncing and
//! no edge detection: a button that reads high is active for that cycle,
//! and a held button stays active on every following cycle.

use embedded_hal::digital::InputPin;
use log::{debug, warn};

// Re-export the public types
pub mod types;
pub use types::*;

/// Reads the four button inputs
///
/// Pins are stored in [`Button::ALL`] order. Any `embedded-hal` input pin
/// works; on the device these are ESP-IDF `PinDriver`s.
pub struct InputSampler<P> {
    pins: [P; 4],
}

impl<P> InputSampler<P>
where
    P: InputPin,
{
    /// Create a sampler from the four button pins
    pub fn new(page_left: P, page_right: P, gear_up: P, gear_down: P) -> Self {
        Self {
            pins: [page_left, page_right, gear_up, gear_down],
        }
    }

    /// Read the current level of every button
    ///
    /// A pin that fails to read is treated as released for this cycle.
    pub fn sample(&mut self) -> ButtonSet {
        let active: ButtonSet = Button::ALL
            .into_iter()
            .zip(self.pins.iter_mut())
            .map(|(button, pin)| ButtonSample {
                button,
                level: pin.is_high().unwrap_or_else(|e| {
                    warn!("Failed to read {} button: {:?}", button, e);
                    false
                }),
            })
            .collect();

        if !active.is_empty() {
            debug!("Buttons active: {}", active);
        }

        active
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use core::cell::Cell;
    use embedded_hal::digital::{ErrorKind, ErrorType};
    use std::rc::Rc;

    /// Input pin whose level can be changed from the test after it has been
    /// moved into a sampler
    #[derive(Clone, Default)]
    pub(crate) struct MockPin {
        level: Rc<Cell<bool>>,
        broken: Rc<Cell<bool>>,
    }

    impl MockPin {
        pub(crate) fn set(&self, high: bool) {
            self.level.set(high);
        }

        pub(crate) fn break_pin(&self) {
            self.broken.set(true);
        }
    }

    impl ErrorType for MockPin {
        type Error = ErrorKind;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            if self.broken.get() {
                return Err(ErrorKind::Other);
            }
            Ok(self.level.get())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.is_high().map(|high| !high)
        }
    }

    pub(crate) fn mock_sampler() -> (InputSampler<MockPin>, [MockPin; 4]) {
        let pins: [MockPin; 4] = Default::default();
        let sampler = InputSampler::new(
            pins[0].clone(),
            pins[1].clone(),
            pins[2].clone(),
            pins[3].clone(),
        );
        (sampler, pins)
    }

    #[test]
    fn all_low_is_empty() {
        let (mut sampler, _pins) = mock_sampler();
        assert!(sampler.sample().is_empty());
    }

    #[test]
    fn high_pins_map_to_their_buttons() {
        let (mut sampler, pins) = mock_sampler();
        pins[0].set(true);
        pins[2].set(true);

        let set = sampler.sample();
        assert!(set.contains(Button::PageLeft));
        assert!(set.contains(Button::GearUp));
        assert!(!set.contains(Button::PageRight));
        assert!(!set.contains(Button::GearDown));
    }

    #[test]
    fn no_state_kept_between_samples() {
        let (mut sampler, pins) = mock_sampler();
        pins[3].set(true);
        assert!(sampler.sample().contains(Button::GearDown));
        assert!(sampler.sample().contains(Button::GearDown));

        pins[3].set(false);
        assert!(sampler.sample().is_empty());
    }

    #[test]
    fn read_error_counts_as_released() {
        let (mut sampler, pins) = mock_sampler();
        pins[1].set(true);
        pins[1].break_pin();
        pins[2].set(true);

        let set = sampler.sample();
        assert!(!set.contains(Button::PageRight));
        assert!(set.contains(Button::GearUp));
    }

    #[test]
    fn per_button_levels_follow_pin_order() {
        let (mut sampler, pins) = mock_sampler();
        pins[1].set(true);
        pins[3].set(true);

        let levels = sampler.sample().samples().map(|s| (s.button, s.level));
        assert_eq!(
            levels,
            [
                (Button::PageLeft, false),
                (Button::PageRight, true),
                (Button::GearUp, false),
                (Button::GearDown, true),
            ]
        );
    }
}
