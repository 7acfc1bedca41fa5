//! Minimal TOML parser for the panel configuration
//!
//! Handles only the subset `panel.toml` uses. The build script checks the
//! file against the full TOML grammar first, so this parser can stay small.
//!
//! Supported:
//! - `[section]` headers: `panel`, `serial`, `timing`, `input`
//! - `key = value` pairs with quoted strings or decimal integers
//!   (underscore separators allowed)
//! - Comments (`# ...`), including after a value
//!
//! Unknown keys are ignored so older firmware accepts newer files; an
//! unknown section is an error.

use super::types::{PanelConfig, Profile};

/// What went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigErrorKind {
    /// Malformed section header
    InvalidSection,
    /// Section name not known
    UnknownSection,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Value has the wrong type or does not parse
    InvalidValue,
    /// Profile name not known
    UnknownProfile,
    /// Number outside the accepted range
    OutOfRange,
}

/// Parse error with the 1-based line it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigError {
    pub kind: ConfigErrorKind,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Panel,
    Serial,
    Timing,
    Input,
}

/// Parse `panel.toml` content, starting from the defaults
pub fn parse_config(input: &str) -> Result<PanelConfig, ConfigError> {
    let mut config = PanelConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let at = |kind: ConfigErrorKind| ConfigError {
            kind,
            line: index + 1,
        };

        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line).map_err(at)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(at(ConfigErrorKind::InvalidLine))?;
        apply_value(section, key, value, &mut config).map_err(at)?;
    }

    Ok(config)
}

/// Cut a trailing comment, leaving `#` inside quotes alone
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_section_header(line: &str) -> Result<Section, ConfigErrorKind> {
    let name = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or(ConfigErrorKind::InvalidSection)?
        .trim();

    match name {
        "panel" => Ok(Section::Panel),
        "serial" => Ok(Section::Serial),
        "timing" => Ok(Section::Timing),
        "input" => Ok(Section::Input),
        "" => Err(ConfigErrorKind::InvalidSection),
        _ => Err(ConfigErrorKind::UnknownSection),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Parse a quoted string value
fn parse_string(value: &str) -> Result<&str, ConfigErrorKind> {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or(ConfigErrorKind::InvalidValue)
}

/// Parse a decimal integer, allowing `_` between digits
fn parse_u32(value: &str) -> Result<u32, ConfigErrorKind> {
    let bytes = value.as_bytes();
    if bytes.first() == Some(&b'_') || bytes.last() == Some(&b'_') {
        return Err(ConfigErrorKind::InvalidValue);
    }

    let mut result: u32 = 0;
    let mut digits = 0;
    let mut previous_underscore = false;
    for &byte in bytes {
        match byte {
            b'0'..=b'9' => {
                result = result
                    .checked_mul(10)
                    .and_then(|r| r.checked_add(u32::from(byte - b'0')))
                    .ok_or(ConfigErrorKind::OutOfRange)?;
                digits += 1;
                previous_underscore = false;
            }
            b'_' if !previous_underscore => previous_underscore = true,
            _ => return Err(ConfigErrorKind::InvalidValue),
        }
    }

    if digits == 0 {
        return Err(ConfigErrorKind::InvalidValue);
    }
    Ok(result)
}

fn parse_in_range(value: &str, min: u32, max: u32) -> Result<u32, ConfigErrorKind> {
    let number = parse_u32(value)?;
    if (min..=max).contains(&number) {
        Ok(number)
    } else {
        Err(ConfigErrorKind::OutOfRange)
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut PanelConfig,
) -> Result<(), ConfigErrorKind> {
    match (section, key) {
        (Section::Panel, "profile") => {
            let name = parse_string(value)?;
            config.profile = Profile::from_name(name).ok_or(ConfigErrorKind::UnknownProfile)?;
        }
        (Section::Serial, "baud_rate") => {
            config.baud_rate = parse_in_range(value, 1_200, 1_000_000)?;
        }
        (Section::Timing, "dashboard_interval_ms") => {
            config.dashboard_interval_ms = parse_in_range(value, 1, 10_000)?;
        }
        (Section::Timing, "rain_delay_ms") => {
            config.rain_delay_ms = parse_in_range(value, 0, 1_000)?;
        }
        (Section::Timing, "loop_sleep_ms") => {
            config.loop_sleep_ms = parse_in_range(value, 1, 1_000)?;
        }
        (Section::Input, "debounce_ms") => {
            config.debounce_ms = parse_in_range(value, 0, 500)?;
        }
        _ => {
            // Unknown key, ignored
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
# Deckstat panel
[panel]
profile = "network"   # which widgets to show

[serial]
baud_rate = 57_600

[timing]
dashboard_interval_ms = 250
rain_delay_ms = 30
loop_sleep_ms = 10

[input]
debounce_ms = 15
"#,
        )
        .unwrap();

        assert_eq!(config.profile, Profile::Network);
        assert_eq!(config.baud_rate, 57_600);
        assert_eq!(config.dashboard_interval_ms, 250);
        assert_eq!(config.rain_delay_ms, 30);
        assert_eq!(config.loop_sleep_ms, 10);
        assert_eq!(config.debounce_ms, 15);
    }

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config("").unwrap(), PanelConfig::default());
        assert_eq!(parse_config("# nothing\n\n").unwrap(), PanelConfig::default());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = parse_config("[panel]\nprofile = \"classic\"\ntheme = \"amber\"\n").unwrap();
        assert_eq!(config.profile, Profile::Classic);
    }

    #[test]
    fn test_unknown_section_reports_line() {
        let err = parse_config("[panel]\nprofile = \"classic\"\n[wifi]\n").unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::UnknownSection);
        assert_eq!(err.line, 3);
    }

    #[test]
    fn test_unknown_profile() {
        let err = parse_config("[panel]\nprofile = \"retro\"\n").unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::UnknownProfile);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_unquoted_profile_is_invalid() {
        let err = parse_config("[panel]\nprofile = classic\n").unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::InvalidValue);
    }

    #[test]
    fn test_out_of_range() {
        let err = parse_config("[serial]\nbaud_rate = 300\n").unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::OutOfRange);

        let err = parse_config("[timing]\nloop_sleep_ms = 99999999999\n").unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::OutOfRange);
    }

    #[test]
    fn test_invalid_lines() {
        let err = parse_config("[timing]\nrain_delay_ms\n").unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::InvalidLine);

        let err = parse_config("[timing\n").unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::InvalidSection);

        let err = parse_config("[timing]\nrain_delay_ms = -5\n").unwrap_err();
        assert_eq!(err.kind, ConfigErrorKind::InvalidValue);
    }

    #[test]
    fn test_parse_u32_underscores() {
        assert_eq!(parse_u32("115_200"), Ok(115_200));
        assert_eq!(parse_u32("_1"), Err(ConfigErrorKind::InvalidValue));
        assert_eq!(parse_u32("1_"), Err(ConfigErrorKind::InvalidValue));
        assert_eq!(parse_u32("1__0"), Err(ConfigErrorKind::InvalidValue));
        assert_eq!(parse_u32(""), Err(ConfigErrorKind::InvalidValue));
    }

    #[test]
    fn test_strip_comment_respects_quotes() {
        assert_eq!(strip_comment("a = 1 # note"), "a = 1 ");
        assert_eq!(strip_comment("a = \"#1\""), "a = \"#1\"");
    }
}
