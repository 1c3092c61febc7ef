//! Types for input handling

/// Button identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    PageLeft,
    PageRight,
    GearUp,
    GearDown,
}

impl Button {
    /// All buttons in the order they are sampled and applied
    pub const ALL: [Button; 4] = [
        Button::PageLeft,
        Button::PageRight,
        Button::GearUp,
        Button::GearDown,
    ];

    fn bit(self) -> u8 {
        match self {
            Button::PageLeft => 1 << 0,
            Button::PageRight => 1 << 1,
            Button::GearUp => 1 << 2,
            Button::GearDown => 1 << 3,
        }
    }
}

/// Level read from one button during a poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSample {
    pub button: Button,
    /// `true` when the input was at its active (high) level
    pub level: bool,
}

/// Buttons that were active during one poll cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonSet(u8);

impl ButtonSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    pub fn contains(&self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Per-button levels in sampling order
    pub fn samples(&self) -> [ButtonSample; 4] {
        Button::ALL.map(|button| ButtonSample {
            button,
            level: self.contains(button),
        })
    }
}

impl FromIterator<Button> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        let mut set = ButtonSet::empty();
        for button in iter {
            set.insert(button);
        }
        set
    }
}

impl FromIterator<ButtonSample> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = ButtonSample>>(iter: I) -> Self {
        iter.into_iter()
            .filter(|sample| sample.level)
            .map(|sample| sample.button)
            .collect()
    }
}

impl std::fmt::Display for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Button::PageLeft => write!(f, "PageLeft"),
            Button::PageRight => write!(f, "PageRight"),
            Button::GearUp => write!(f, "GearUp"),
            Button::GearDown => write!(f, "GearDown"),
        }
    }
}

impl std::fmt::Display for ButtonSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let mut first = true;
        for sample in self.samples().iter().filter(|s| s.level) {
            if !first {
                write!(f, "+")?;
            }
            write!(f, "{}", sample.button)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_contains_nothing() {
        let set = ButtonSet::empty();
        assert!(set.is_empty());
        for button in Button::ALL {
            assert!(!set.contains(button));
        }
    }

    #[test]
    fn collect_from_samples_keeps_active_levels_only() {
        let samples = [
            ButtonSample { button: Button::PageLeft, level: false },
            ButtonSample { button: Button::PageRight, level: true },
            ButtonSample { button: Button::GearUp, level: false },
            ButtonSample { button: Button::GearDown, level: true },
        ];
        let set: ButtonSet = samples.into_iter().collect();
        assert!(set.contains(Button::PageRight));
        assert!(set.contains(Button::GearDown));
        assert!(!set.contains(Button::PageLeft));
        assert!(!set.contains(Button::GearUp));
        assert_eq!(set.samples(), samples);
    }

    #[test]
    fn display_lists_buttons_in_sampling_order() {
        let set: ButtonSet = [Button::GearDown, Button::PageLeft].into_iter().collect();
        assert_eq!(set.to_string(), "PageLeft+GearDown");
        assert_eq!(ButtonSet::empty().to_string(), "none");
    }
}
