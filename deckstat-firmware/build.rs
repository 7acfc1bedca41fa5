//! Build script for deckstat-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates panel.toml at compile time

use std::env;
use std::fs;
use std::path::PathBuf;

/// Profiles the firmware knows about
const PROFILES: [&str; 3] = ["classic", "network", "cyberdeck"];

/// (section, key, min, max) for every numeric setting
const RANGES: [(&str, &str, i64, i64); 5] = [
    ("serial", "baud_rate", 1_200, 1_000_000),
    ("timing", "dashboard_interval_ms", 1, 10_000),
    ("timing", "rain_delay_ms", 0, 1_000),
    ("timing", "loop_sleep_ms", 1, 1_000),
    ("input", "debounce_ms", 0, 500),
];

const SECTIONS: [&str; 4] = ["panel", "serial", "timing", "input"];

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("memory.x"), include_bytes!("memory.x")).unwrap();
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=panel.toml");

    let content = fs::read_to_string("panel.toml")
        .unwrap_or_else(|e| fail("Cannot read panel.toml", &[e.to_string()]));
    let config: toml::Value = toml::from_str(&content)
        .unwrap_or_else(|e| fail("Invalid TOML syntax in panel.toml", &[e.message().to_string()]));

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_profile(&config, &mut errors);
    validate_ranges(&config, &mut errors);
    if !errors.is_empty() {
        fail("Invalid panel configuration", &errors);
    }
}

/// Abort the build with a boxed error report
fn fail(title: &str, lines: &[String]) -> ! {
    let rule = "═".repeat(68);
    let body = lines
        .iter()
        .map(|line| format!("║  • {:<62} ║", line))
        .collect::<Vec<_>>()
        .join("\n");
    panic!("\n╔{rule}╗\n║  ERROR: {title:<58} ║\n╠{rule}╣\n{body}\n╚{rule}╝\n");
}

/// Only the known sections may appear, and each must be a table
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };
    for (name, value) in root {
        if !SECTIONS.contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

/// `[panel] profile` must name a built-in profile
fn validate_profile(config: &toml::Value, errors: &mut Vec<String>) {
    match config.get("panel").and_then(|p| p.get("profile")) {
        None => {}
        Some(toml::Value::String(name)) => {
            if !PROFILES.contains(&name.as_str()) {
                errors.push(format!(
                    "[panel] profile must be one of {}",
                    PROFILES.join(", ")
                ));
            }
        }
        Some(_) => errors.push("[panel] profile must be a string".to_string()),
    }
}

/// Numeric settings must be integers inside their accepted range
fn validate_ranges(config: &toml::Value, errors: &mut Vec<String>) {
    for (section, key, min, max) in RANGES {
        match config.get(section).and_then(|s| s.get(key)) {
            None => {}
            Some(toml::Value::Integer(value)) => {
                if *value < min || *value > max {
                    errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
                }
            }
            Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
        }
    }
}
