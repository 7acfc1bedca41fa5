//! Configuration type definitions

use deckstat_protocol::{Key, KeySet};

use super::{
    DEFAULT_BAUD_RATE, DEFAULT_DASHBOARD_INTERVAL_MS, DEFAULT_DEBOUNCE_MS, DEFAULT_LOOP_SLEEP_MS,
    DEFAULT_RAIN_DELAY_MS,
};
use crate::mode::{DisplayMode, ModeSet};

/// A dashboard row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Widget {
    /// Host timestamp
    Time,
    /// LAN and WAN addresses (two text lines)
    Ip,
    /// Load averages
    Load,
    /// Upload and download rate
    Net,
    /// CPU temperature
    Temp,
    /// CPU usage bar
    Cpu,
    /// RAM usage bar
    Ram,
}

/// A widget placed at a label baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WidgetRow {
    pub widget: Widget,
    /// Top of the row's label, in pixels
    pub y: i32,
}

const fn row(widget: Widget, y: i32) -> WidgetRow {
    WidgetRow { widget, y }
}

/// Built-in panel profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Profile {
    /// Time, load averages, CPU and RAM; dashboard only
    Classic,
    /// Time, addresses, network rate, CPU and RAM; dashboard and rain
    Network,
    /// Time, addresses, temperature, CPU and RAM; every mode
    #[default]
    Cyberdeck,
}

/// What a profile shows and accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileSpec {
    /// Keys the parser accepts
    pub keys: KeySet,
    /// Dashboard rows, top to bottom
    pub layout: &'static [WidgetRow],
    /// Modes the buttons can reach
    pub modes: ModeSet,
}

const CLASSIC_LAYOUT: [WidgetRow; 4] = [
    row(Widget::Time, 40),
    row(Widget::Load, 82),
    row(Widget::Cpu, 134),
    row(Widget::Ram, 186),
];

const NETWORK_LAYOUT: [WidgetRow; 5] = [
    row(Widget::Time, 40),
    row(Widget::Ip, 76),
    row(Widget::Net, 124),
    row(Widget::Cpu, 166),
    row(Widget::Ram, 204),
];

const CYBERDECK_LAYOUT: [WidgetRow; 5] = [
    row(Widget::Time, 40),
    row(Widget::Ip, 76),
    row(Widget::Temp, 124),
    row(Widget::Cpu, 166),
    row(Widget::Ram, 204),
];

const CLASSIC_KEYS: KeySet = KeySet::of(&[
    Key::Time,
    Key::Hostname,
    Key::Cpu,
    Key::RamUsedMb,
    Key::RamTotalMb,
    Key::RamPercent,
    Key::Load1,
    Key::Load5,
    Key::Load15,
]);

const NETWORK_KEYS: KeySet = KeySet::of(&[
    Key::Time,
    Key::User,
    Key::Hostname,
    Key::Cpu,
    Key::RamUsedMb,
    Key::RamTotalMb,
    Key::RamPercent,
    Key::LocalIp,
    Key::PublicIp,
    Key::NetUpMbps,
    Key::NetDownMbps,
]);

const CYBERDECK_KEYS: KeySet = KeySet::of(&[
    Key::Time,
    Key::User,
    Key::Hostname,
    Key::Cpu,
    Key::RamUsedMb,
    Key::RamTotalMb,
    Key::RamPercent,
    Key::LocalIp,
    Key::PublicIp,
    Key::CpuTempC,
]);

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Classic, Profile::Network, Profile::Cyberdeck];

    /// Look up a profile by its config name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(Profile::Classic),
            "network" => Some(Profile::Network),
            "cyberdeck" => Some(Profile::Cyberdeck),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Profile::Classic => "classic",
            Profile::Network => "network",
            Profile::Cyberdeck => "cyberdeck",
        }
    }

    pub const fn spec(self) -> ProfileSpec {
        match self {
            Profile::Classic => ProfileSpec {
                keys: CLASSIC_KEYS,
                layout: &CLASSIC_LAYOUT,
                modes: ModeSet::DASHBOARD,
            },
            Profile::Network => ProfileSpec {
                keys: NETWORK_KEYS,
                layout: &NETWORK_LAYOUT,
                modes: ModeSet::DASHBOARD.with(DisplayMode::MatrixRain),
            },
            Profile::Cyberdeck => ProfileSpec {
                keys: CYBERDECK_KEYS,
                layout: &CYBERDECK_LAYOUT,
                modes: ModeSet::ALL,
            },
        }
    }
}

/// Runtime panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    pub profile: Profile,
    pub baud_rate: u32,
    pub dashboard_interval_ms: u32,
    pub rain_delay_ms: u32,
    pub loop_sleep_ms: u32,
    pub debounce_ms: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            baud_rate: DEFAULT_BAUD_RATE,
            dashboard_interval_ms: DEFAULT_DASHBOARD_INTERVAL_MS,
            rain_delay_ms: DEFAULT_RAIN_DELAY_MS,
            loop_sleep_ms: DEFAULT_LOOP_SLEEP_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl PanelConfig {
    pub fn spec(&self) -> ProfileSpec {
        self.profile.spec()
    }
}
