use anyhow::Result;
use linkref_config::Config;
use linkref_engine::{FormattedDocument, format_file, io};
use std::{env, path::PathBuf, process};

fn main() -> Result<()> {
    // Determine the source path from CLI args or the config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let source;
    let from_config;

    if args.len() == 2 {
        source = PathBuf::from(&args[1]);
        from_config = false;
    } else if args.len() == 1 {
        match Config::load() {
            Ok(Some(config)) => {
                source = config.docs_path;
                from_config = true;
            }
            Ok(None) => {
                eprintln!("Error: no source path provided and no config file found");
                eprintln!("Usage: {} <file-or-directory>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: failed to load config file: {e}");
                eprintln!("Usage: {} <file-or-directory>", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [file-or-directory]", args[0]);
        process::exit(1);
    };

    let files = if source.is_file() {
        vec![source.clone()]
    } else if source.is_dir() {
        io::scan_markdown_files(&source)?
    } else {
        let origin = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: source path '{}'{} does not exist",
            source.display(),
            origin
        );
        process::exit(1);
    };

    // One document's failure is reported and the batch moves on; nothing is
    // written for a failed document.
    let mut failed = false;
    for path in &files {
        println!("INFO: formatting {}", path.display());
        match format_file(path) {
            Ok(FormattedDocument { text, warnings }) => {
                for warning in &warnings {
                    eprintln!("WARN: {}: {warning}", path.display());
                }
                if let Err(e) = io::write_file(path, &text) {
                    eprintln!("ERROR: {}: {e}", path.display());
                    failed = true;
                }
            }
            Err(e) => {
                eprintln!("ERROR: {}: {e}", path.display());
                failed = true;
            }
        }
    }

    if failed {
        process::exit(1);
    }
    Ok(())
}
