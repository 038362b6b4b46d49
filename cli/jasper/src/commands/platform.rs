//! `jasper platform` — platform listing, description, pin lookup and validation.

use std::fmt;

use anyhow::{bail, Context, Result};
use jasper_platform::parse::{platform_to_json, platform_to_toml};
use jasper_platform::{
    discover_platforms, has_errors, validate_platform, Pin, Platform, PlatformError,
    PlatformRoot, DEFAULT_PIN_INDEX,
};

fn load(root: &PlatformRoot, name: &str) -> Result<Platform> {
    Platform::load(root, name).with_context(|| format!("loading platform '{name}'"))
}

/// List all platform definitions under the root.
pub fn list(root: &PlatformRoot) -> Result<()> {
    let platforms = discover_platforms(root)
        .with_context(|| format!("reading {}", root.platforms_dir().display()))?;
    if platforms.is_empty() {
        println!("No platforms found in {}", root.platforms_dir().display());
        return Ok(());
    }

    println!("Platforms in {}:", root.platforms_dir().display());
    println!();
    for (name, path) in &platforms {
        match Platform::from_path(path) {
            Ok(p) => println!("  {name:<20} {} ({})", p.fpga(), p.backend_target()),
            Err(e) => println!("  {name:<20} <unreadable: {e}>"),
        }
    }
    println!();
    println!("Use 'jasper platform describe <name>' for details.");
    Ok(())
}

/// Describe a platform in the requested format.
pub fn describe(root: &PlatformRoot, name: &str, format: Option<&str>) -> Result<()> {
    let platform = load(root, name)?;
    let rendered = match format.unwrap_or("text") {
        "text" => describe_text(&platform),
        "json" => platform_to_json(&platform)?,
        "toml" => platform_to_toml(&platform)?,
        other => bail!("unknown format '{other}' (expected text, json or toml)"),
    };
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Human-readable summary of a platform.
pub fn describe_text(platform: &Platform) -> String {
    Description(platform).to_string()
}

struct Description<'a>(&'a Platform);

impl fmt::Display for Description<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let platform = self.0;
        writeln!(f, "=== Platform: {} ===", platform.name())?;
        writeln!(f, "FPGA:         {}", platform.fpga())?;
        writeln!(f, "Backend:      {}", platform.backend_target())?;
        if let Some(manufacturer) = platform.manufacturer() {
            writeln!(f, "Manufacturer: {manufacturer}")?;
        }
        writeln!(f)?;

        write_list(f, "Provides", platform.provides())?;
        write_list(f, "Sources", platform.sources())?;
        write_list(f, "Constraints", platform.consts())?;

        writeln!(f, "--- Pins ---")?;
        for (bank, pins) in platform.pins() {
            let iostd = pins.first().and_then(Pin::iostd).unwrap_or("-");
            let locs: Vec<&str> = pins.iter().map(|p| p.loc().unwrap_or("?")).collect();
            writeln!(f, "  {bank:<20} {iostd:<12} {}", locs.join(" "))?;
        }
        Ok(())
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, title: &str, items: &[String]) -> fmt::Result {
    writeln!(f, "--- {title} ---")?;
    if items.is_empty() {
        writeln!(f, "  (none)")?;
    }
    for item in items {
        writeln!(f, "  {item}")?;
    }
    writeln!(f)
}

/// Print the physical pins of one bank.
pub fn pins(root: &PlatformRoot, name: &str, bank: &str, indices: &[usize], all: bool) -> Result<()> {
    let platform = load(root, name)?;
    for (index, pin) in select_pins(&platform, bank, indices, all)? {
        println!(
            "{bank}[{index}]  loc={}  iostd={}",
            pin.loc().unwrap_or("-"),
            pin.iostd().unwrap_or("-"),
        );
    }
    Ok(())
}

/// Resolve the pin selection given on the command line.
///
/// No indices means the default index; `all` means every pin in the bank.
fn select_pins<'a>(
    platform: &'a Platform,
    bank: &str,
    indices: &[usize],
    all: bool,
) -> Result<Vec<(usize, &'a Pin)>> {
    let indices: Vec<usize> = if all {
        let len = platform
            .bank_len(bank)
            .ok_or_else(|| PlatformError::UnknownPin {
                name: bank.to_string(),
            })?;
        (0..len).collect()
    } else if indices.is_empty() {
        vec![DEFAULT_PIN_INDEX]
    } else {
        indices.to_vec()
    };
    let pins = platform.get_pins(bank, &indices)?;
    Ok(indices.into_iter().zip(pins).collect())
}

/// Validate a platform and print every issue found.
pub fn validate(root: &PlatformRoot, name: &str) -> Result<()> {
    let platform = load(root, name)?;
    match validate_platform(&platform) {
        Ok(()) => {
            println!("Platform '{}' is valid.", platform.name());
            Ok(())
        }
        Err(issues) => {
            for issue in &issues {
                println!("  {}: {}", issue.severity, issue.message);
            }
            if has_errors(&issues) {
                bail!("platform '{}' has validation errors", platform.name());
            }
            println!("Platform '{}' is valid (with warnings).", platform.name());
            Ok(())
        }
    }
}
