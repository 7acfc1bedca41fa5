//! Recognized telemetry keys
//!
//! Each panel profile only understands a subset of keys; [`KeySet`] is that
//! subset as a bit set so filtering a token costs one mask test.

/// A telemetry key understood by the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Key {
    Time = 0,
    User = 1,
    Hostname = 2,
    Cpu = 3,
    RamUsedMb = 4,
    RamTotalMb = 5,
    RamPercent = 6,
    Load1 = 7,
    Load5 = 8,
    Load15 = 9,
    LocalIp = 10,
    PublicIp = 11,
    CpuTempC = 12,
    NetUpMbps = 13,
    NetDownMbps = 14,
}

impl Key {
    /// Every key, in wire documentation order
    pub const ALL: [Key; 15] = [
        Key::Time,
        Key::User,
        Key::Hostname,
        Key::Cpu,
        Key::RamUsedMb,
        Key::RamTotalMb,
        Key::RamPercent,
        Key::Load1,
        Key::Load5,
        Key::Load15,
        Key::LocalIp,
        Key::PublicIp,
        Key::CpuTempC,
        Key::NetUpMbps,
        Key::NetDownMbps,
    ];

    /// Look up a key by its wire name (case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "time" => Key::Time,
            "user" => Key::User,
            "hostname" => Key::Hostname,
            "cpu" => Key::Cpu,
            "ram_used_mb" => Key::RamUsedMb,
            "ram_total_mb" => Key::RamTotalMb,
            "ram_percent" => Key::RamPercent,
            "load_1" => Key::Load1,
            "load_5" => Key::Load5,
            "load_15" => Key::Load15,
            "local_ip" => Key::LocalIp,
            "public_ip" => Key::PublicIp,
            "cpu_temp_c" => Key::CpuTempC,
            "net_up_mbps" => Key::NetUpMbps,
            "net_down_mbps" => Key::NetDownMbps,
            _ => return None,
        };
        Some(key)
    }

    /// Wire name of the key
    pub const fn name(self) -> &'static str {
        match self {
            Key::Time => "time",
            Key::User => "user",
            Key::Hostname => "hostname",
            Key::Cpu => "cpu",
            Key::RamUsedMb => "ram_used_mb",
            Key::RamTotalMb => "ram_total_mb",
            Key::RamPercent => "ram_percent",
            Key::Load1 => "load_1",
            Key::Load5 => "load_5",
            Key::Load15 => "load_15",
            Key::LocalIp => "local_ip",
            Key::PublicIp => "public_ip",
            Key::CpuTempC => "cpu_temp_c",
            Key::NetUpMbps => "net_up_mbps",
            Key::NetDownMbps => "net_down_mbps",
        }
    }

    const fn bit(self) -> u16 {
        1 << (self as u8)
    }
}

/// Set of keys a parser accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeySet(u16);

impl KeySet {
    /// No keys
    pub const EMPTY: Self = Self(0);

    /// Every known key
    pub const ALL: Self = Self::of(&Key::ALL);

    /// Build a set from a list of keys
    pub const fn of(keys: &[Key]) -> Self {
        let mut set = Self::EMPTY;
        let mut i = 0;
        while i < keys.len() {
            set = set.with(keys[i]);
            i += 1;
        }
        set
    }

    /// This set plus `key`
    pub const fn with(self, key: Key) -> Self {
        Self(self.0 | key.bit())
    }

    /// This set minus `key`
    pub const fn without(self, key: Key) -> Self {
        Self(self.0 & !key.bit())
    }

    pub const fn contains(self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the keys in the set, in [`Key::ALL`] order
    pub fn iter(self) -> impl Iterator<Item = Key> {
        Key::ALL.into_iter().filter(move |key| self.contains(*key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for key in Key::ALL {
            assert_eq!(Key::from_name(key.name()), Some(key));
        }
    }

    #[test]
    fn test_unknown_and_case_sensitive_names() {
        assert_eq!(Key::from_name("CPU"), None);
        assert_eq!(Key::from_name("gpu"), None);
        assert_eq!(Key::from_name(""), None);
    }

    #[test]
    fn test_all_contains_every_key() {
        assert_eq!(KeySet::ALL.len(), Key::ALL.len());
        assert!(Key::ALL.iter().all(|key| KeySet::ALL.contains(*key)));
    }

    #[test]
    fn test_set_operations() {
        let set = KeySet::of(&[Key::Cpu, Key::RamPercent]);
        assert!(set.contains(Key::Cpu));
        assert!(set.contains(Key::RamPercent));
        assert!(!set.contains(Key::Time));
        assert_eq!(set.len(), 2);

        let set = set.without(Key::Cpu).with(Key::Time);
        assert!(!set.contains(Key::Cpu));
        assert!(set.contains(Key::Time));

        let mut keys = set.iter();
        assert_eq!(keys.next(), Some(Key::Time));
        assert_eq!(keys.next(), Some(Key::RamPercent));
        assert_eq!(keys.next(), None);
    }

    #[test]
    fn test_empty() {
        assert!(KeySet::EMPTY.is_empty());
        assert_eq!(KeySet::EMPTY.iter().count(), 0);
        assert_eq!(KeySet::default(), KeySet::EMPTY);
    }
}
