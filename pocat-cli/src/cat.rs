use std::{io::Write, path::PathBuf};

use pocat::{CatOptions, OutputSyntax, catenate, write_catalog};
use pocat_cli::{
    config::Config,
    inputs::{STDIN, resolve_inputs},
    validation::{ValidationContext, validate_context},
};
use tracing::{debug, info};

/// Arguments of the `cat` command.
#[derive(clap::Args, Debug, Default)]
pub struct CatArgs {
    /// Input catalogs, in merge order (`-` reads standard input)
    pub inputs: Vec<String>,

    /// Read input file names from FILE, one per line
    #[arg(short = 'f', long, value_name = "FILE")]
    pub files_from: Option<PathBuf>,

    /// Search relative input names in DIRECTORY (repeatable)
    #[arg(short = 'D', long = "directory", value_name = "DIRECTORY")]
    pub directories: Vec<PathBuf>,

    /// Write to FILE instead of standard output
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Keep messages defined in more than N inputs
    #[arg(long, value_name = "N")]
    pub more_than: Option<usize>,

    /// Keep messages defined in fewer than N inputs
    #[arg(long, value_name = "N")]
    pub less_than: Option<usize>,

    /// Keep only messages defined in a single input (same as --less-than=2)
    #[arg(short, long)]
    pub unique: bool,

    /// Keep the first translation instead of the latest one
    #[arg(long)]
    pub use_first: bool,

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

    /// Encode the output in ENCODING and declare it in the header
    #[arg(short, long, value_name = "ENCODING")]
    pub to_code: Option<String>,

    /// Output syntax: json, po, properties, stringtable
    #[arg(long, value_name = "SYNTAX")]
    pub output_syntax: Option<String>,

    /// Read defaults from a TOML file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl CatArgs {
    /// Combines configuration file values and command-line flags, flags winning.
    pub fn options(&self, config: &Config) -> Result<CatOptions, String> {
        let mut options = config.cat.apply(CatOptions::new());

        if let Some(more_than) = self.more_than {
            options = options.with_more_than(more_than);
        }
        if let Some(less_than) = self.less_than {
            options = options.with_less_than(less_than);
        }
        if self.unique {
            options = options.with_unique();
        }
        if self.use_first {
            options = options.with_use_first(true);
        }
        if self.sort_output {
            options = options.with_sort_by_msgid(true);
        }
        if self.sort_by_file {
            options = options.with_sort_by_file(true);
        }
        if self.no_location {
            options = options.with_location(false);
        } else if self.add_location {
            options = options.with_location(true);
        }
        if self.to_code.is_some() {
            options = options.with_to_code(self.to_code.clone());
        }
        if let Some(syntax) = &self.output_syntax {
            let syntax: OutputSyntax = syntax.parse().map_err(|e: pocat::Error| e.to_string())?;
            options = options.with_output_syntax(syntax);
        }
        Ok(options)
    }
}

/// Run the cat command: merge the inputs and write the result.
pub fn run_cat_command(args: CatArgs) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let options = args.options(&config)?;
    options.validate().map_err(|e| e.to_string())?;
    debug!(?options, "validated options");

    let mut directories = config.cat.directory.clone();
    directories.extend(args.directories.iter().cloned());

    let sources = resolve_inputs(args.files_from.as_deref(), &args.inputs, &directories)?;

    let mut context = ValidationContext::new().with_input_sources(&sources);
    for dir in &directories {
        context = context.with_directory(dir.clone());
    }
    if let Some(output) = args.output.as_ref().filter(|o| o.as_str() != STDIN) {
        context = context.with_output_file(output.clone());
    }
    validate_context(&context)?;

    let mut stores = Vec::with_capacity(sources.len());
    for source in &sources {
        let store = source
            .read()
            .map_err(|e| format!("Error reading {}: {}", source.label(), e))?;
        debug!(input = %source.label(), messages = store.message_count(), "read catalog");
        stores.push(store);
    }

    let merged = catenate(&stores, &options).map_err(|e| e.to_string())?;
    let bytes = write_catalog(&merged, &options).map_err(|e| e.to_string())?;

    match args.output.as_deref() {
        Some(path) if path != STDIN => {
            std::fs::write(path, &bytes).map_err(|e| format!("Error writing to {}: {}", path, e))?;
            info!(output = path, messages = merged.message_count(), "wrote catalog");
        }
        _ => {
            std::io::stdout()
                .write_all(&bytes)
                .map_err(|e| format!("Error writing to standard output: {}", e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let config = Config::from_toml_str("[cat]\nuse_first = true\nlocation = false\n").unwrap();
        let args = CatArgs {
            add_location: true,
            unique: true,
            ..CatArgs::default()
        };
        let options = args.options(&config).unwrap();
        assert!(options.use_first);
        assert!(options.location);
        assert_eq!(options.less_than, 2);
    }

    #[test]
    fn test_unknown_output_syntax() {
        let args = CatArgs {
            output_syntax: Some("yaml".to_string()),
            ..CatArgs::default()
        };
        let err = args.options(&Config::default()).unwrap_err();
        assert!(err.contains("yaml"));
    }
}
