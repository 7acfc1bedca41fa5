//! Mode controller
//!
//! Mode changes come from button edges ([`ModeController::handle`]), per-tick
//! work comes from [`ModeController::poll`]. Both return a small action value
//! for the renderer to carry out; the controller never draws.

use super::events::ModeEvent;
use crate::art::ArtCursor;

/// Active display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Live stats
    Dashboard,
    /// Falling characters, advanced every tick
    MatrixRain,
    /// Static art, drawn once per selection
    AsciiArt,
}

impl DisplayMode {
    const fn bit(self) -> u8 {
        match self {
            DisplayMode::Dashboard => 1 << 0,
            DisplayMode::MatrixRain => 1 << 1,
            DisplayMode::AsciiArt => 1 << 2,
        }
    }
}

/// Set of modes a profile allows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeSet(u8);

impl ModeSet {
    /// Dashboard only
    pub const DASHBOARD: Self = Self(DisplayMode::Dashboard.bit());

    /// Every mode
    pub const ALL: Self = Self::DASHBOARD
        .with(DisplayMode::MatrixRain)
        .with(DisplayMode::AsciiArt);

    pub const fn with(self, mode: DisplayMode) -> Self {
        Self(self.0 | mode.bit())
    }

    pub const fn contains(self, mode: DisplayMode) -> bool {
        self.0 & mode.bit() != 0
    }
}

/// What a button edge asks the renderer to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// The target mode is disabled; nothing changes
    Ignored,
    /// Redraw the static dashboard frame and drop its caches
    EnterDashboard,
    /// Clear the screen and draw catalog entry `index`
    ShowArt { index: usize },
    /// Rain was (re)entered; reseed on the next step
    EnterRain,
}

/// What the current tick asks the renderer to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickAction {
    Idle,
    /// Redraw the dashboard values with animation phase `phase`
    RedrawDashboard { phase: u8 },
    /// Advance the rain one step
    StepRain,
}

/// Display mode state machine
#[derive(Debug, Clone)]
pub struct ModeController {
    mode: DisplayMode,
    enabled: ModeSet,
    art: ArtCursor,
    redraw_interval_ms: u32,
    last_redraw_ms: u32,
    phase: u8,
    force_redraw: bool,
}

impl ModeController {
    /// Start on the dashboard; the first poll redraws immediately
    pub fn new(enabled: ModeSet, redraw_interval_ms: u32, art: ArtCursor) -> Self {
        Self {
            mode: DisplayMode::Dashboard,
            enabled: enabled.with(DisplayMode::Dashboard),
            art,
            redraw_interval_ms,
            last_redraw_ms: 0,
            phase: 0,
            force_redraw: true,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Current dashboard animation phase
    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Apply a button edge
    pub fn handle(&mut self, event: ModeEvent) -> Transition {
        match event {
            ModeEvent::Dashboard => {
                self.mode = DisplayMode::Dashboard;
                self.force_redraw = true;
                Transition::EnterDashboard
            }
            ModeEvent::Art => {
                if !self.enabled.contains(DisplayMode::AsciiArt) {
                    return Transition::Ignored;
                }
                if self.mode == DisplayMode::AsciiArt {
                    self.art.advance();
                } else {
                    self.mode = DisplayMode::AsciiArt;
                    self.art.reset();
                }
                Transition::ShowArt {
                    index: self.art.index(),
                }
            }
            ModeEvent::Rain => {
                if !self.enabled.contains(DisplayMode::MatrixRain) {
                    return Transition::Ignored;
                }
                self.mode = DisplayMode::MatrixRain;
                Transition::EnterRain
            }
        }
    }

    /// Decide the per-tick work at time `now_ms`
    ///
    /// `now_ms` is a free-running millisecond counter; elapsed time is
    /// computed with wrapping arithmetic so counter rollover is harmless.
    pub fn poll(&mut self, now_ms: u32) -> TickAction {
        match self.mode {
            DisplayMode::Dashboard => {
                let elapsed = now_ms.wrapping_sub(self.last_redraw_ms);
                if !self.force_redraw && elapsed < self.redraw_interval_ms {
                    return TickAction::Idle;
                }
                self.force_redraw = false;
                self.last_redraw_ms = now_ms;
                self.phase = self.phase.wrapping_add(1);
                TickAction::RedrawDashboard { phase: self.phase }
            }
            DisplayMode::MatrixRain => TickAction::StepRain,
            DisplayMode::AsciiArt => TickAction::Idle,
        }
    }
}
