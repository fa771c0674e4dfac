//! Command-line collision header exporter
//!
//! Install with: cargo install collision_map
//! Run with: collision_map_export maps/level1.tmj

use clap::Parser;
use collision_map::integration::format::MapFormat;
use collision_map::integration::format::{ButanoCollisionsFormat, BUTANO_COLLISIONS_ID};
use collision_map::integration::manager::ConfigManager;
use collision_map::integration::registry::FormatRegistry;
use collision_map::{export_map_file, render_map_file};
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

const INPUT_HELP: &str = "\
Only Tiled JSON maps (.tmj / .json) are read. Save TMX maps with
File > Export As... > JSON map files before exporting them.";

/// Export the "Collisions" layer of a Tiled JSON map as a Butano header
#[derive(Debug, Parser)]
#[command(name = "collision_map_export", version, about, after_help = INPUT_HELP)]
struct Cli {
    /// Tiled JSON map (.tmj / .json); TMX is not supported
    #[arg(required_unless_present = "list_formats")]
    map: Option<PathBuf>,

    /// File name the output location is derived from (defaults to the map path)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export format id
    #[arg(short, long, default_value = BUTANO_COLLISIONS_ID)]
    format: String,

    /// Format metadata TOML to register before exporting
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip format files from the user config directory
    #[arg(long)]
    no_user_config: bool,

    /// Print the header to stdout instead of writing it
    #[arg(long)]
    print: bool,

    /// List the registered export formats and exit
    #[arg(long)]
    list_formats: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn build_registry(cli: &Cli) -> Result<FormatRegistry, String> {
    let mut registry = FormatRegistry::with_builtin();

    if !cli.no_user_config {
        let mut manager = ConfigManager::from_default_config();
        match manager.load_metadata() {
            Ok(()) => manager.register_into(&mut registry),
            Err(e) => log::warn!("Ignoring user format configuration: {}", e),
        }
    }

    if let Some(path) = &cli.config {
        let meta = ConfigManager::load_file(path).map_err(|e| e.to_string())?;
        log::info!("Using format '{}' from {}", meta.format.id, path.display());
        registry.register_format(ButanoCollisionsFormat::from_meta(&meta));
    }

    Ok(registry)
}

fn format_line(format: &dyn MapFormat) -> String {
    let mut line = format!("{}\t.{}\t{}", format.id(), format.extension(), format.name());
    if !format.description().is_empty() {
        line.push_str(" - ");
        line.push_str(format.description());
    }
    line
}

fn run(cli: &Cli) -> Result<(), String> {
    let registry = build_registry(cli)?;

    if cli.list_formats {
        for format in registry.formats() {
            println!("{}", format_line(format));
        }
        return Ok(());
    }

    let Some(map) = cli.map.as_deref() else {
        return Err("No map file given".to_string());
    };
    let output = cli.output.as_deref();

    if cli.print {
        let text = render_map_file(&registry, &cli.format, map, output)?;
        print!("{text}");
        return Ok(());
    }

    export_map_file(&registry, &cli.format, map, output)?;
    log::info!("Exported {} as '{}'", map.display(), cli.format);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use collision_map::integration::format::{ButanoCollisionsFormat, BUTANO_COLLISIONS_DESCRIPTION};

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn help_states_json_only() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("Only Tiled JSON maps (.tmj / .json) are read"));
        assert!(help.contains("TMX is not supported"));
    }

    #[test]
    fn list_formats_needs_no_map() {
        let cli = Cli::try_parse_from(["collision_map_export", "--list-formats"]).unwrap();
        assert!(cli.list_formats);
        assert!(cli.map.is_none());

        assert!(Cli::try_parse_from(["collision_map_export"]).is_err());
    }

    #[test]
    fn format_line_shows_description() {
        let line = format_line(&ButanoCollisionsFormat::new());
        assert_eq!(
            line,
            format!(
                "butano-collisions\t.hh\tButano Header - Collision Map - {}",
                BUTANO_COLLISIONS_DESCRIPTION
            )
        );
    }
}
