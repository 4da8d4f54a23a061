use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use showtime_config::Config;
use std::path::Path;

pub fn run_config(cmd: crate::ConfigCommands, config: &Config, config_file: &Path, output: &Output) -> Result<bool> {
    match cmd {
        crate::ConfigCommands::Show => show_config(config, config_file, output),
        crate::ConfigCommands::Init { force } => init_config(config_file, force, output),
        crate::ConfigCommands::Path => {
            match output.format() {
                OutputFormat::Human => println!("{}", config_file.display()),
                OutputFormat::Json | OutputFormat::JsonPretty => {
                    output.json(&json!({ "config_file": config_file.display().to_string() }))
                }
            }
            Ok(true)
        }
    }
}

fn show_config(config: &Config, config_file: &Path, output: &Output) -> Result<bool> {
    let exists = config_file.exists();
    let valid = config.validate();

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(valid.is_ok());
            }

            let mut info_table = Table::new();
            info_table.set_header(vec![
                Cell::new("Config File").add_attribute(comfy_table::Attribute::Bold),
                Cell::new(config_file.display().to_string()),
            ]);
            info_table.load_preset(comfy_table::presets::UTF8_FULL);
            info_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", info_table);
            if !exists {
                println!("{}", "Not found, showing defaults".bright_black());
            }
            println!();

            let mut normalize_table = Table::new();
            normalize_table.set_header(vec![Cell::new("Normalize")
                .fg(comfy_table::Color::Cyan)
                .add_attribute(comfy_table::Attribute::Bold)]);
            normalize_table.add_row(vec![
                Cell::new("Data directory"),
                Cell::new(config.normalize.data_dir.display().to_string()),
            ]);
            normalize_table.add_row(vec![Cell::new("File suffix"), Cell::new(&config.normalize.file_suffix)]);
            normalize_table.add_row(vec![
                Cell::new("Write output"),
                Cell::new(if config.normalize.write_output { "✓".green().to_string() } else { "✗".red().to_string() }),
            ]);
            normalize_table.load_preset(comfy_table::presets::UTF8_FULL);
            normalize_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", normalize_table);
            println!();

            let mut logging_table = Table::new();
            logging_table.set_header(vec![Cell::new("Logging")
                .fg(comfy_table::Color::Cyan)
                .add_attribute(comfy_table::Attribute::Bold)]);
            logging_table.add_row(vec![Cell::new("Level"), Cell::new(&config.logging.level)]);
            logging_table.add_row(vec![
                Cell::new("JSON"),
                Cell::new(if config.logging.json { "✓".green().to_string() } else { "✗".red().to_string() }),
            ]);
            logging_table.add_row(vec![
                Cell::new("File"),
                Cell::new(
                    config
                        .logging
                        .file
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "stderr".to_string()),
                ),
            ]);
            logging_table.load_preset(comfy_table::presets::UTF8_FULL);
            logging_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", logging_table);

            if let Err(e) = &valid {
                output.error(format!("Invalid configuration: {}", e));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "exists": exists,
                "valid": valid.is_ok(),
                "error": valid.as_ref().err().map(|e| e.to_string()),
                "normalize": {
                    "data_dir": config.normalize.data_dir.display().to_string(),
                    "file_suffix": config.normalize.file_suffix,
                    "write_output": config.normalize.write_output,
                },
                "logging": {
                    "level": config.logging.level,
                    "json": config.logging.json,
                    "file": config.logging.file.as_ref().map(|p| p.display().to_string()),
                },
            }));
        }
    }

    Ok(valid.is_ok())
}

fn init_config(config_file: &Path, force: bool, output: &Output) -> Result<bool> {
    if config_file.exists() && !force {
        output.warn(format!(
            "Configuration already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
        return Ok(false);
    }

    Config::default()
        .save_to_file(config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write config to {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(true)
}
