//! Main loop
//!
//! One iteration: wait the poll interval, receive at most one bus frame
//! (bounded wait), sample the buttons, update the state, redraw and
//! present. Everything runs on the caller's thread; the bounded receive is
//! the loop's only long suspension point, so the display keeps refreshing
//! at least once per receive timeout even when the bus is silent.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use log::{error, info};

use crate::bus::{self, Decoded, FrameSource};
use crate::config::DashboardConfig;
use crate::display::{render, Panel};
use crate::input::{ButtonSet, InputSampler};
use crate::state::DashboardState;

/// What a single iteration did, mostly for tests and tracing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub decoded: Decoded,
    pub buttons: ButtonSet,
    pub presented: bool,
}

pub struct Dashboard<B, P, D> {
    state: DashboardState,
    bus: B,
    inputs: InputSampler<P>,
    panel: D,
    config: DashboardConfig,
}

impl<B, P, D> Dashboard<B, P, D>
where
    B: FrameSource,
    P: InputPin,
    D: Panel,
    D::Error: core::fmt::Debug,
{
    pub fn new(bus: B, inputs: InputSampler<P>, panel: D, config: DashboardConfig) -> Self {
        Self {
            state: DashboardState::from_initial(config.initial),
            bus,
            inputs,
            panel,
            config,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn panel(&self) -> &D {
        &self.panel
    }

    /// Run one iteration without the leading delay
    pub fn tick(&mut self) -> TickReport {
        let received = self.bus.receive(self.config.receive_timeout);
        let decoded = bus::apply_reception(&mut self.state, received);

        let buttons = self.inputs.sample();
        self.state.apply_buttons(buttons);

        TickReport {
            decoded,
            buttons,
            presented: self.redraw(),
        }
    }

    /// Draw the current state and push it to the panel
    pub fn redraw(&mut self) -> bool {
        self.panel.clear_frame();

        if let Err(e) = render(&mut self.panel, &self.state) {
            error!("Failed to render dashboard: {:?}", e);
            return false;
        }

        match self.panel.present() {
            Ok(()) => true,
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }

    /// Loop forever at the configured cadence
    pub fn run(&mut self, delay: &mut impl DelayNs) -> ! {
        info!(
            "Dashboard running: poll every {} ms, receive timeout {} ms",
            self.config.poll_interval_ms(),
            self.config.receive_timeout.as_millis()
        );

        loop {
            delay.delay_ms(self.config.poll_interval_ms());
            self.tick();
        }
    }
}
