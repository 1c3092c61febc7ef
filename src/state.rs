//! Dashboard state and its transitions
//!
//! [`DashboardState`] is owned by the main loop and handed out by `&mut` to
//! the bus decoder (speed) and the button transitions (gear, page). The two
//! writers touch disjoint fields.

use crate::config::InitialState;
use crate::input::{Button, ButtonSet};

/// Highest selectable gear
pub const MAX_GEAR: u8 = 5;

/// Highest page index; pages are `0..=MAX_PAGE`
pub const MAX_PAGE: u8 = 2;

/// Number of page glyphs on the display
pub const PAGE_COUNT: usize = MAX_PAGE as usize + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardState {
    speed: u8,
    gear: u8,
    page: u8,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::from_initial(InitialState::default())
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from configured start values, clamping gear and page
    pub fn from_initial(initial: InitialState) -> Self {
        Self {
            speed: initial.speed,
            gear: initial.gear.min(MAX_GEAR),
            page: initial.page.min(MAX_PAGE),
        }
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn gear(&self) -> u8 {
        self.gear
    }

    pub fn page(&self) -> u8 {
        self.page
    }

    /// Store a decoded speed. Any byte value is valid.
    pub fn set_speed(&mut self, speed: u8) {
        self.speed = speed;
    }

    pub fn page_left(&mut self) {
        if self.page > 0 {
            self.page -= 1;
        }
    }

    pub fn page_right(&mut self) {
        if self.page < MAX_PAGE {
            self.page += 1;
        }
    }

    pub fn gear_up(&mut self) {
        if self.gear < MAX_GEAR {
            self.gear += 1;
        }
    }

    pub fn gear_down(&mut self) {
        if self.gear > 0 {
            self.gear -= 1;
        }
    }

    /// Apply one poll cycle of button levels.
    ///
    /// Buttons are level triggered: a held button applies again on every
    /// cycle and only the clamps stop it. Checks run in [`Button::ALL`]
    /// order and each one mutates the field in place, so opposing presses in
    /// the same cycle resolve to whichever check runs last.
    pub fn apply_buttons(&mut self, buttons: ButtonSet) {
        for button in Button::ALL {
            if !buttons.contains(button) {
                continue;
            }
            match button {
                Button::PageLeft => self.page_left(),
                Button::PageRight => self.page_right(),
                Button::GearUp => self.gear_up(),
                Button::GearDown => self.gear_down(),
            }
        }
    }
}
