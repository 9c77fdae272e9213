//! Build script for fakemri-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates pad.toml at compile time
//! - Generates the tuning constants from pad.toml

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    let config = validate_config();
    generate_tuning(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate pad.toml at compile time
fn validate_config() -> toml::Value {
    println!("cargo:rerun-if-changed=pad.toml");

    let config_path = Path::new("pad.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: pad.toml not found!                                      ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a pad.toml tuning file.                   ║\n\
            ║  Please create one in the fakemri-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read pad.toml                                  ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in pad.toml                          ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    validate_required_sections(&config);
    validate_timing(&config);
    validate_usb(&config);

    println!("cargo:warning=pad.toml validated successfully");
    config
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Abort the build with a list of problems in one section
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

fn validate_required_sections(config: &toml::Value) {
    let mut errors = Vec::new();

    for section in ["timing", "usb"] {
        match config.get(section) {
            Some(toml::Value::Table(_)) => {}
            Some(_) => errors.push(format!("[{}] must be a table", section)),
            None => errors.push(format!("Missing [{}] section", section)),
        }
    }

    if !errors.is_empty() {
        fail("Missing required sections in pad.toml", &errors);
    }
}

/// Check an integer field against an inclusive range
fn check_int(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max))
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
        None => errors.push(format!("[{}] missing '{}'", section, key)),
    }
}

fn check_str(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) {
    match config.get(section).and_then(|s| s.get(key)) {
        Some(toml::Value::String(s)) if !s.is_empty() && s.len() <= 64 => {}
        Some(toml::Value::String(_)) => {
            errors.push(format!("[{}] {} must be 1-64 characters", section, key))
        }
        Some(_) => errors.push(format!("[{}] {} must be a string", section, key)),
        None => errors.push(format!("[{}] missing '{}'", section, key)),
    }
}

fn validate_timing(config: &toml::Value) {
    let mut errors = Vec::new();

    check_int(config, "timing", "loop_period_us", 100, 10_000, &mut errors);
    // Must stay well below the shortest TR (0.5 s)
    check_int(config, "timing", "latency_budget_ns", 0, 100_000_000, &mut errors);
    check_int(config, "timing", "key_debounce_samples", 1, 255, &mut errors);
    check_int(config, "timing", "button_debounce_samples", 1, 255, &mut errors);
    check_int(config, "timing", "encoder_poll_us", 50, 5_000, &mut errors);

    if !errors.is_empty() {
        fail("Invalid timing configuration", &errors);
    }
}

fn validate_usb(config: &toml::Value) {
    let mut errors = Vec::new();

    check_int(config, "usb", "vid", 0, 0xFFFF, &mut errors);
    check_int(config, "usb", "pid", 0, 0xFFFF, &mut errors);
    check_str(config, "usb", "manufacturer", &mut errors);
    check_str(config, "usb", "product", &mut errors);
    check_int(config, "usb", "poll_ms", 1, 255, &mut errors);

    if !errors.is_empty() {
        fail("Invalid usb configuration", &errors);
    }
}

/// Write `$OUT_DIR/tuning.rs` from a validated config
fn generate_tuning(config: &toml::Value) {
    let int = |section: &str, key: &str| -> i64 {
        config[section][key].as_integer().unwrap()
    };
    let string = |section: &str, key: &str| -> String {
        config[section][key].as_str().unwrap().to_string()
    };

    let source = format!(
        "// Generated by build.rs from pad.toml\n\
        pub const LOOP_PERIOD_US: u64 = {};\n\
        pub const LATENCY_BUDGET_NS: u64 = {};\n\
        pub const KEY_DEBOUNCE_SAMPLES: u8 = {};\n\
        pub const BUTTON_DEBOUNCE_SAMPLES: u8 = {};\n\
        pub const ENCODER_POLL_US: u64 = {};\n\
        pub const USB_VID: u16 = {:#06x};\n\
        pub const USB_PID: u16 = {:#06x};\n\
        pub const USB_MANUFACTURER: &str = {:?};\n\
        pub const USB_PRODUCT: &str = {:?};\n\
        pub const USB_POLL_MS: u8 = {};\n",
        int("timing", "loop_period_us"),
        int("timing", "latency_budget_ns"),
        int("timing", "key_debounce_samples"),
        int("timing", "button_debounce_samples"),
        int("timing", "encoder_poll_us"),
        int("usb", "vid"),
        int("usb", "pid"),
        string("usb", "manufacturer"),
        string("usb", "product"),
        int("usb", "poll_ms"),
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("tuning.rs"), source).unwrap();
}
