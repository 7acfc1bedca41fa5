//! Application context
//!
//! [`StatusPanel`] owns every piece of mutable state: the line assembler,
//! the stats model, the mode controller and the renderers with their caches.
//! The firmware loop owns one panel and calls [`StatusPanel::tick`] forever.

use deckstat_core::art::{ArtCursor, CATALOG};
use deckstat_core::config::{PanelConfig, ProfileSpec};
use deckstat_core::mode::{DisplayMode, ModeController, ModeEvent, TickAction, Transition};
use deckstat_core::stats::StatsModel;
use deckstat_hal::{PressEdge, SerialSource};
use deckstat_protocol::LineAssembler;

use crate::art::draw_art;
use crate::backend::{Canvas, DisplayError};
use crate::dashboard::DashboardRenderer;
use crate::palette;
use crate::rain::MatrixRainRenderer;

/// Bytes pulled from the serial source per read
const READ_CHUNK: usize = 64;

/// Number of panel buttons (A, B, C)
pub const BUTTON_COUNT: usize = 3;

/// Everything the panel knows
pub struct StatusPanel {
    config: PanelConfig,
    spec: ProfileSpec,
    assembler: LineAssembler,
    model: StatsModel,
    modes: ModeController,
    dashboard: DashboardRenderer,
    rain: MatrixRainRenderer,
}

impl StatusPanel {
    /// Create the panel; `seed` feeds the rain animation
    pub fn new(config: PanelConfig, seed: u32) -> Self {
        let spec = config.spec();
        Self {
            config,
            spec,
            assembler: LineAssembler::new(),
            model: StatsModel::new(),
            modes: ModeController::new(
                spec.modes,
                config.dashboard_interval_ms,
                ArtCursor::new(CATALOG.len()),
            ),
            dashboard: DashboardRenderer::new(),
            rain: MatrixRainRenderer::new(seed),
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn model(&self) -> &StatsModel {
        &self.model
    }

    pub fn mode(&self) -> DisplayMode {
        self.modes.mode()
    }

    pub fn assembler(&self) -> &LineAssembler {
        &self.assembler
    }

    /// Draw the initial dashboard frame
    pub fn start<C: Canvas>(&mut self, canvas: &mut C) -> Result<(), DisplayError> {
        self.dashboard.draw_frame(canvas, self.spec.layout)?;
        canvas.flush()
    }

    /// Pull every available byte from `serial` and merge completed lines
    ///
    /// Returns the number of lines merged. Never waits for more input.
    pub fn drain_serial<S: SerialSource>(&mut self, serial: &mut S) -> usize {
        let keys = self.spec.keys;
        let model = &mut self.model;
        let mut buf = [0u8; READ_CHUNK];
        let mut lines = 0;

        loop {
            let n = serial.read_available(&mut buf);
            if n == 0 {
                break;
            }
            lines += self.assembler.feed_bytes(&buf[..n], |line| {
                model.merge_line(line, keys);
            });
        }
        lines
    }

    /// Apply one button edge and draw what it asks for
    pub fn handle_event<C: Canvas>(&mut self, event: ModeEvent, canvas: &mut C) -> Result<Transition, DisplayError> {
        let transition = self.modes.handle(event);
        match transition {
            Transition::Ignored => {}
            Transition::EnterDashboard => self.dashboard.draw_frame(canvas, self.spec.layout)?,
            Transition::ShowArt { index } => {
                canvas.clear(palette::BLACK)?;
                if let Some(art) = CATALOG.get(index) {
                    draw_art(canvas, art)?;
                }
            }
            Transition::EnterRain => self.rain.invalidate(),
        }
        Ok(transition)
    }

    /// Carry out the per-tick work for `action`
    pub fn render<C: Canvas>(&mut self, action: TickAction, canvas: &mut C) -> Result<(), DisplayError> {
        match action {
            TickAction::Idle => Ok(()),
            TickAction::RedrawDashboard { phase } => {
                self.dashboard
                    .draw(canvas, self.model.snapshot(), self.spec.layout, phase)
            }
            TickAction::StepRain => self.rain.render(canvas),
        }
    }

    /// One loop iteration
    ///
    /// Services the buttons, drains serial input, applies pressed edges in
    /// A, B, C order, renders the active mode and flushes. Returns how long
    /// the caller should sleep before the next tick. Drawing errors do not
    /// stop the tick; the first one is returned after all work is done.
    pub fn tick<S, B, C>(
        &mut self,
        now_ms: u32,
        serial: &mut S,
        buttons: &mut [B; BUTTON_COUNT],
        canvas: &mut C,
    ) -> Result<u32, DisplayError>
    where
        S: SerialSource,
        B: PressEdge,
        C: Canvas,
    {
        for button in buttons.iter_mut() {
            button.service(now_ms);
        }

        self.drain_serial(serial);

        let mut first_error = None;
        for (index, button) in buttons.iter_mut().enumerate() {
            if !button.was_pressed() {
                continue;
            }
            if let Some(event) = ModeEvent::from_button(index) {
                if let Err(e) = self.handle_event(event, canvas) {
                    first_error.get_or_insert(e);
                }
            }
        }

        let action = self.modes.poll(now_ms);
        if let Err(e) = self.render(action, canvas) {
            first_error.get_or_insert(e);
        }
        if let Err(e) = canvas.flush() {
            first_error.get_or_insert(e);
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        let sleep_ms = match action {
            TickAction::StepRain => self.config.loop_sleep_ms + self.config.rain_delay_ms,
            _ => self.config.loop_sleep_ms,
        };
        Ok(sleep_ms)
    }
}
