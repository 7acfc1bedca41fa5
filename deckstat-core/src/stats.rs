//! Persistent telemetry record
//!
//! The panel keeps exactly one [`StatsRecord`]. Every parsed line is merged
//! into it field by field; a field a line does not mention keeps the value
//! it had before.

use heapless::String;

use deckstat_protocol::{parse_line, Field, Key, KeySet};

/// Capacity of the timestamp text
pub const TIME_LEN: usize = 32;

/// Capacity of the user and hostname texts
pub const NAME_LEN: usize = 32;

/// Capacity of an IP address text
pub const IP_LEN: usize = 48;

/// Last-known telemetry values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsRecord {
    pub time: String<TIME_LEN>,
    pub user: String<NAME_LEN>,
    pub hostname: String<NAME_LEN>,
    /// CPU usage in percent
    pub cpu: f32,
    pub ram_used_mb: i32,
    pub ram_total_mb: i32,
    /// RAM usage in percent
    pub ram_percent: f32,
    pub load_1: f32,
    pub load_5: f32,
    pub load_15: f32,
    pub local_ip: String<IP_LEN>,
    pub public_ip: String<IP_LEN>,
    /// CPU temperature in °C
    pub cpu_temp_c: f32,
    /// Upload rate in Mbit/s
    pub net_up_mbps: f32,
    /// Download rate in Mbit/s
    pub net_down_mbps: f32,
    /// Keys received at least once
    pub seen: KeySet,
}

/// Who the host says it is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identity<'a> {
    /// Both user and hostname are known
    UserAtHost(&'a str, &'a str),
    /// Only the hostname is known
    Host(&'a str),
    /// No hostname received yet
    Unknown,
}

impl StatsRecord {
    /// Overwrite the field `field` refers to
    pub fn apply(&mut self, field: Field<'_>) {
        self.seen = self.seen.with(field.key());
        match field {
            Field::Time(v) => set_text(&mut self.time, v),
            Field::User(v) => set_text(&mut self.user, v),
            Field::Hostname(v) => set_text(&mut self.hostname, v),
            Field::Cpu(v) => self.cpu = v,
            Field::RamUsedMb(v) => self.ram_used_mb = v,
            Field::RamTotalMb(v) => self.ram_total_mb = v,
            Field::RamPercent(v) => self.ram_percent = v,
            Field::Load1(v) => self.load_1 = v,
            Field::Load5(v) => self.load_5 = v,
            Field::Load15(v) => self.load_15 = v,
            Field::LocalIp(v) => set_text(&mut self.local_ip, v),
            Field::PublicIp(v) => set_text(&mut self.public_ip, v),
            Field::CpuTempC(v) => self.cpu_temp_c = v,
            Field::NetUpMbps(v) => self.net_up_mbps = v,
            Field::NetDownMbps(v) => self.net_down_mbps = v,
        }
    }

    /// Host identity for the header
    pub fn identity(&self) -> Identity<'_> {
        match (self.user.is_empty(), self.hostname.is_empty()) {
            (_, true) => Identity::Unknown,
            (true, false) => Identity::Host(&self.hostname),
            (false, false) => Identity::UserAtHost(&self.user, &self.hostname),
        }
    }

    /// True once a line has carried `key`
    pub fn has(&self, key: Key) -> bool {
        self.seen.contains(key)
    }

    /// RAM percentage is only meaningful once the total is known
    pub fn has_ram_total(&self) -> bool {
        self.ram_total_mb != 0
    }
}

/// Replace `dst` with `value`, truncated at a character boundary
fn set_text<const N: usize>(dst: &mut String<N>, value: &str) {
    let mut end = value.len().min(N);
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    dst.clear();
    // Cannot fail: end <= N
    let _ = dst.push_str(&value[..end]);
}

/// The single persistent record plus merge bookkeeping
#[derive(Debug, Clone, Default)]
pub struct StatsModel {
    record: StatsRecord,
    lines_merged: u32,
}

impl StatsModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a set of field updates; returns how many were applied
    pub fn merge<'a>(&mut self, fields: impl IntoIterator<Item = Field<'a>>) -> usize {
        let mut applied = 0;
        for field in fields {
            self.record.apply(field);
            applied += 1;
        }
        applied
    }

    /// Parse `line` against `keys` and merge the result
    pub fn merge_line(&mut self, line: &str, keys: KeySet) -> usize {
        let applied = self.merge(parse_line(line, keys));
        self.lines_merged = self.lines_merged.wrapping_add(1);
        applied
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> &StatsRecord {
        &self.record
    }

    /// Number of lines merged since startup
    pub fn lines_merged(&self) -> u32 {
        self.lines_merged
    }
}
