use pocat::{CheckOptions, check_store};
use pocat_cli::inputs::{InputSource, resolve_inputs};
use tracing::info;

/// Arguments of the `check` command.
#[derive(clap::Args, Debug, Default)]
pub struct CheckArgs {
    /// Catalog to check (`-` reads standard input)
    pub input: String,

    /// Also fail on source strings that are not valid format strings
    #[arg(long)]
    pub strict: bool,

    /// Log every issue as it is found
    #[arg(long)]
    pub noisy: bool,

    /// Also check messages marked fuzzy
    #[arg(long)]
    pub include_fuzzy: bool,

    /// Print the report as JSON on standard output
    #[arg(long)]
    pub json: bool,
}

/// Run the check command. Returns whether the catalog passed.
pub fn run_check_command(args: CheckArgs) -> Result<bool, String> {
    let source = resolve_inputs(None, std::slice::from_ref(&args.input), &[])?
        .pop()
        .unwrap_or(InputSource::Stdin);
    let store = source
        .read()
        .map_err(|e| format!("Error reading {}: {}", source.label(), e))?;

    let options = CheckOptions::new()
        .with_strict(args.strict)
        .with_noisy(args.noisy)
        .with_include_fuzzy(args.include_fuzzy);
    let report = check_store(&store, &options);

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Error serializing report: {}", e))?;
        println!("{}", json);
    } else if !args.noisy {
        for issue in &report.issues {
            eprintln!("{}", issue);
        }
        for issue in &report.plural_issues {
            eprintln!("{}", issue);
        }
    }

    let errors = report.error_count(args.strict);
    info!(
        checked = report.checked,
        skipped = report.skipped,
        errors,
        "checked {}",
        source.label()
    );
    Ok(!report.is_failure(args.strict))
}
