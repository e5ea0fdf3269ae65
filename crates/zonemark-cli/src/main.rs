//! Command-line listing of a saved region configuration.
//!
//! ```text
//! zonemark [--settings <settings.json>] <regions.json | dir>
//! ```
//!
//! Given a directory, the configuration file named in the settings is read
//! from it.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use zonemark_core::storage::load_from_path;
use zonemark_core::{EditorSettings, NullSurface, RegionStore, StorageError};

const USAGE: &str = "usage: zonemark [--settings <settings.json>] <regions.json | dir>";

#[derive(Debug, PartialEq)]
struct Options {
    config: PathBuf,
    settings: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Option<Options> {
    let mut config = None;
    let mut settings = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--settings" => settings = Some(PathBuf::from(iter.next()?)),
            _ if config.is_none() => config = Some(PathBuf::from(arg)),
            _ => return None,
        }
    }
    Some(Options {
        config: config?,
        settings,
    })
}

fn resolve_config(path: &Path, settings: &EditorSettings) -> PathBuf {
    if path.is_dir() {
        settings.config_path(path)
    } else {
        path.to_path_buf()
    }
}

/// Load `path` and render the ordered listing.
fn list_regions(path: &Path, settings: &EditorSettings) -> Result<String, StorageError> {
    let json = load_from_path(path)?;
    let mut store = RegionStore::with_transformer(NullSurface::new(), settings.transformer());
    let report = store.load_json(&json)?;

    let mut out = format!("Loaded {} regions from {}\n", report.loaded, path.display());
    for (i, (label, r)) in store.ordered_regions().iter().enumerate() {
        out.push_str(&format!(
            "{}. {} ({}, {}, {}, {})\n",
            i + 1,
            label,
            r.x0,
            r.y0,
            r.x1,
            r.y1
        ));
    }
    for skipped in &report.skipped {
        out.push_str(&format!("Skipped: {skipped}\n"));
    }
    Ok(out)
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(options) = parse_args(&args) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let settings = match &options.settings {
        Some(path) => EditorSettings::load_or_default(path),
        None => EditorSettings::default(),
    };

    let config = resolve_config(&options.config, &settings);
    match list_regions(&config, &settings) {
        Ok(listing) => {
            print!("{listing}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to list {}: {}", config.display(), e);
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(
            parse_args(&args(&["regions.json"])),
            Some(Options {
                config: PathBuf::from("regions.json"),
                settings: None
            })
        );
        assert_eq!(
            parse_args(&args(&["--settings", "s.json", "r.json"])),
            Some(Options {
                config: PathBuf::from("r.json"),
                settings: Some(PathBuf::from("s.json"))
            })
        );
        assert_eq!(parse_args(&args(&[])), None);
        assert_eq!(parse_args(&args(&["a.json", "b.json"])), None);
        assert_eq!(parse_args(&args(&["r.json", "--settings"])), None);
    }

    #[test]
    fn test_list_regions_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("regions.json");
        std::fs::write(
            &path,
            r#"{
                "regions": {
                    "Total": {"coords": [10, 20, 110, 40]},
                    "Date": {"coords": [1.5, 2, 3, 4]},
                    "Bad": {"coords": null}
                },
                "order": ["Total", "Date"]
            }"#,
        )
        .unwrap();

        let listing = list_regions(&path, &EditorSettings::default()).unwrap();
        let lines: Vec<&str> = listing.lines().collect();
        assert!(lines[0].starts_with("Loaded 2 regions from "));
        assert_eq!(lines[1], "1. Total (10, 20, 110, 40)");
        assert_eq!(lines[2], "2. Date (1.5, 2, 3, 4)");
        assert_eq!(lines[3], "Skipped: Bad: malformed coords");
    }

    #[test]
    fn test_directory_uses_configured_file_name() {
        let dir = tempdir().unwrap();
        let settings = EditorSettings {
            config_file: "zones.json".to_string(),
            ..EditorSettings::default()
        };
        let config = resolve_config(dir.path(), &settings);
        assert_eq!(config, dir.path().join("zones.json"));

        std::fs::write(
            &config,
            r#"{"regions": {"Date": {"coords": [1, 2, 3, 4]}}, "order": ["Date"]}"#,
        )
        .unwrap();
        let listing = list_regions(&config, &settings).unwrap();
        assert!(listing.contains("1. Date (1, 2, 3, 4)"));

        // Plain files pass through untouched
        assert_eq!(resolve_config(&config, &settings), config);
    }

    #[test]
    fn test_list_regions_unreadable() {
        let dir = tempdir().unwrap();
        let missing = list_regions(&dir.path().join("nope.json"), &EditorSettings::default());
        assert!(matches!(missing, Err(StorageError::NotFound(_))));

        let garbage = dir.path().join("garbage.json");
        std::fs::write(&garbage, "not json").unwrap();
        let result = list_regions(&garbage, &EditorSettings::default());
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }
}
