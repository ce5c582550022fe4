use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, Config};
use crate::scoring::{validate_tolerance, ScoringConfig};
use crate::stats::DEFAULT_TOLERANCE_M;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Keep asking until the answer parses as a number accepted by `check`.
fn prompt_number<F>(message: &str, default: f64, check: F) -> Result<f64>
where
    F: Fn(f64) -> Result<(), String>,
{
    loop {
        let input = prompt_with_default(message, &default.to_string())?;
        match parse_number(&input) {
            Some(value) => match check(value) {
                Ok(()) => return Ok(value),
                Err(e) => println!("  Invalid: {}. Try again.", e),
            },
            None => println!("  Invalid: '{}' is not a number. Try again.", input),
        }
    }
}

fn parse_number(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn non_negative(value: f64) -> Result<(), String> {
    if value < 0.0 {
        Err("must be non-negative".to_string())
    } else {
        Ok(())
    }
}

fn any_number(_value: f64) -> Result<(), String> {
    Ok(())
}

fn prompt_scoring() -> Result<ScoringConfig> {
    let defaults = ScoringConfig::default();
    println!();
    println!("Scores are lower-is-better: base + distance + time + penalties - bonus.");

    Ok(ScoringConfig {
        base_score: Some(prompt_number("Base score", defaults.base_score(), any_number)?),
        distance_weight: Some(prompt_number(
            "Points per cm of distance",
            defaults.distance_weight(),
            any_number,
        )?),
        time_weight: Some(prompt_number(
            "Points per second of time",
            defaults.time_weight(),
            any_number,
        )?),
        failed_distance_cm: Some(prompt_number(
            "Distance (cm) charged for a failed run",
            defaults.failed_distance_cm(),
            non_negative,
        )?),
        bucket_bonus: Some(prompt_number(
            "Bucket bonus (points subtracted)",
            defaults.bucket_bonus(),
            non_negative,
        )?),
        competition_penalty: Some(prompt_number(
            "Competition violation penalty",
            defaults.competition_penalty(),
            non_negative,
        )?),
        construction_penalty: Some(prompt_number(
            "Construction violation penalty",
            defaults.construction_penalty(),
            non_negative,
        )?),
    })
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("setup-scout configuration");
    println!("=========================");
    println!();

    // 1. Competitor
    let user = loop {
        let name = prompt("Competitor name (runs are saved under this name): ")?;
        if !name.is_empty() {
            break name;
        }
        println!("  Name is required.");
    };

    // 2. Target filter tolerance
    println!();
    println!("`summary --target` keeps runs within this many meters of the target.");
    let tolerance_m = prompt_number("Target tolerance (m)", DEFAULT_TOLERANCE_M, validate_tolerance)?;

    // 3. Scoring
    println!();
    let scoring = if prompt_yes_no("Customize scoring constants? (n keeps the standard rules)", false)? {
        prompt_scoring()?
    } else {
        ScoringConfig::default()
    };

    // 4. Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 5. Write config
    let config = Config {
        user: Some(user),
        store_path: None,
        tolerance_m: Some(tolerance_m),
        scoring: Some(scoring),
    };

    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `setup-scout score --help` to record your first run.");

    Ok(())
}
