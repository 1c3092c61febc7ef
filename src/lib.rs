//! Vehicle dashboard core
//!
//! Speed arrives over the TWAI (CAN) bus, four buttons move between pages
//! and shift gears, and a 128x64 SSD1306 OLED shows speed, gear and the
//! active page.
//!
//! Everything in this crate is hardware independent: the bus is a
//! [`bus::FrameSource`], the buttons are `embedded-hal` input pins and the
//! display is any [`display::Panel`]. The ESP-IDF bindings live in the
//! firmware binary.
//!
//! ### Usage
//!
//! 1. build an [`input::InputSampler`] from the four button pins
//! 1. bring up the panel, for an SSD1306 with [`display::init_oled`]
//! 1. hand bus, sampler and panel to [`dashboard::Dashboard::new`] and call
//!    [`dashboard::Dashboard::run`]

pub mod bus;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod input;
pub mod state;

pub use crate::bus::{BusFrame, Decoded, FrameSource};
pub use crate::config::{DashboardConfig, Pins};
pub use crate::dashboard::Dashboard;
pub use crate::error::{BusError, PanelError};
pub use crate::input::{Button, ButtonSet, InputSampler};
pub use crate::state::DashboardState;
