//! Line parser
//!
//! Turns one assembled line into the typed field updates it carries.
//! [`Fields`] is a lazy iterator that borrows the line, so parsing never
//! copies or allocates.

use core::str::Split;

use crate::convert::{lenient_f32, lenient_i32};
use crate::keys::{Key, KeySet};

/// Token separator
const TOKEN_SEPARATOR: char = ';';

/// Key/value separator
const KV_SEPARATOR: char = '=';

/// One field update carried by a line
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field<'a> {
    Time(&'a str),
    User(&'a str),
    Hostname(&'a str),
    /// CPU usage in percent, not clamped
    Cpu(f32),
    RamUsedMb(i32),
    RamTotalMb(i32),
    /// RAM usage in percent, not clamped
    RamPercent(f32),
    Load1(f32),
    Load5(f32),
    Load15(f32),
    LocalIp(&'a str),
    PublicIp(&'a str),
    /// CPU temperature in °C
    CpuTempC(f32),
    /// Upload rate in Mbit/s
    NetUpMbps(f32),
    /// Download rate in Mbit/s
    NetDownMbps(f32),
}

impl<'a> Field<'a> {
    /// Build the field for `key` from its raw (trimmed) value
    pub fn from_key(key: Key, value: &'a str) -> Self {
        match key {
            Key::Time => Field::Time(value),
            Key::User => Field::User(value),
            Key::Hostname => Field::Hostname(value),
            Key::Cpu => Field::Cpu(lenient_f32(value)),
            Key::RamUsedMb => Field::RamUsedMb(lenient_i32(value)),
            Key::RamTotalMb => Field::RamTotalMb(lenient_i32(value)),
            Key::RamPercent => Field::RamPercent(lenient_f32(value)),
            Key::Load1 => Field::Load1(lenient_f32(value)),
            Key::Load5 => Field::Load5(lenient_f32(value)),
            Key::Load15 => Field::Load15(lenient_f32(value)),
            Key::LocalIp => Field::LocalIp(value),
            Key::PublicIp => Field::PublicIp(value),
            Key::CpuTempC => Field::CpuTempC(lenient_f32(value)),
            Key::NetUpMbps => Field::NetUpMbps(lenient_f32(value)),
            Key::NetDownMbps => Field::NetDownMbps(lenient_f32(value)),
        }
    }

    /// The key this field updates
    pub fn key(&self) -> Key {
        match self {
            Field::Time(_) => Key::Time,
            Field::User(_) => Key::User,
            Field::Hostname(_) => Key::Hostname,
            Field::Cpu(_) => Key::Cpu,
            Field::RamUsedMb(_) => Key::RamUsedMb,
            Field::RamTotalMb(_) => Key::RamTotalMb,
            Field::RamPercent(_) => Key::RamPercent,
            Field::Load1(_) => Key::Load1,
            Field::Load5(_) => Key::Load5,
            Field::Load15(_) => Key::Load15,
            Field::LocalIp(_) => Key::LocalIp,
            Field::PublicIp(_) => Key::PublicIp,
            Field::CpuTempC(_) => Key::CpuTempC,
            Field::NetUpMbps(_) => Key::NetUpMbps,
            Field::NetDownMbps(_) => Key::NetDownMbps,
        }
    }
}

/// Split a token into trimmed key and value at the first `=`
///
/// Returns `None` when there is no `=`, the `=` is the first character, or
/// the key is blank.
pub fn split_key_value(token: &str) -> Option<(&str, &str)> {
    let idx = token.find(KV_SEPARATOR)?;
    if idx == 0 {
        return None;
    }

    let key = token[..idx].trim();
    if key.is_empty() {
        return None;
    }

    let value = token[idx + 1..].trim();
    Some((key, value))
}

/// Iterator over the recognized fields of one line
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    tokens: Split<'a, char>,
    keys: KeySet,
}

impl<'a> Iterator for Fields<'a> {
    type Item = Field<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for token in self.tokens.by_ref() {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }

            let Some((name, value)) = split_key_value(token) else {
                continue;
            };

            match Key::from_name(name) {
                Some(key) if self.keys.contains(key) => return Some(Field::from_key(key, value)),
                _ => continue,
            }
        }
        None
    }
}

/// Parse a line into the fields whose keys are in `keys`
///
/// Malformed tokens and keys outside `keys` are skipped. A key that appears
/// more than once yields one field per occurrence, so the last one wins
/// when merged.
pub fn parse_line(line: &str, keys: KeySet) -> Fields<'_> {
    Fields {
        tokens: line.split(TOKEN_SEPARATOR),
        keys,
    }
}
