use std::path::PathBuf;

use pocat::{CatOptions, fill_from_source, merge::strip_locations, sort_store, traits::CatalogFile};
use pocat_cli::{
    inputs::{STDIN, resolve_inputs},
    validation::{validate_directory, validate_output_path},
};
use tracing::{debug, info};

/// Arguments of the `en` command.
#[derive(clap::Args, Debug, Default)]
pub struct EnArgs {
    /// Catalog to fill (`-` reads standard input)
    pub input: String,

    /// Write to FILE instead of standard output
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Search a relative input name in DIRECTORY (repeatable)
    #[arg(short = 'D', long = "directory", value_name = "DIRECTORY")]
    pub directories: Vec<PathBuf>,

    /// Sort messages by msgid
    #[arg(short, long)]
    pub sort_output: bool,

    /// Sort messages by source location
    #[arg(short = 'F', long)]
    pub sort_by_file: bool,

    /// Drop source locations from the output
    #[arg(long, overrides_with = "add_location")]
    pub no_location: bool,

    /// Keep source locations (default)
    #[arg(long, overrides_with = "no_location")]
    pub add_location: bool,
}

impl EnArgs {
    /// The subset of catalog options `en` understands.
    fn options(&self) -> CatOptions {
        CatOptions::new()
            .with_sort_by_msgid(self.sort_output)
            .with_sort_by_file(self.sort_by_file)
            .with_location(!self.no_location)
    }
}

/// Run the en command: write a catalog whose untranslated messages carry
/// their source texts.
pub fn run_en_command(args: EnArgs) -> Result<(), String> {
    let options = args.options();
    let sort_mode = options.sort_mode().map_err(|e| e.to_string())?;
    for dir in &args.directories {
        validate_directory(dir).map_err(|e| format!("Directory validation failed: {}", e))?;
    }

    let sources = resolve_inputs(None, std::slice::from_ref(&args.input), &args.directories)?;
    let Some(source) = sources.first() else {
        return Err("No input file given".to_string());
    };
    let store = source
        .read()
        .map_err(|e| format!("Error reading {}: {}", source.label(), e))?;

    let mut filled = fill_from_source(store);
    if !options.location {
        strip_locations(&mut filled);
    }
    sort_store(&mut filled, sort_mode);
    debug!(?sort_mode, location = options.location, "finalized catalog");

    match args.output.as_deref() {
        Some(path) if path != STDIN => {
            validate_output_path(path)?;
            filled
                .write_to(path)
                .map_err(|e| format!("Error writing to {}: {}", path, e))?;
            info!(output = path, messages = filled.message_count(), "wrote catalog");
        }
        _ => {
            filled
                .to_writer(std::io::stdout())
                .map_err(|e| format!("Error writing to standard output: {}", e))?;
            println!();
        }
    }
    Ok(())
}
