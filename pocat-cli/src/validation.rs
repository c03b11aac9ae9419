use crate::inputs::{InputSource, STDIN};
use std::path::{Path, PathBuf};

/// Filesystem checks for the `cat` command, run before any catalog is read.
///
/// Option combinations are checked by [`pocat::CatOptions::validate`].
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    pub input_files: Vec<String>,
    pub output_file: Option<String>,
    pub directories: Vec<PathBuf>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_file(mut self, file: String) -> Self {
        self.input_files.push(file);
        self
    }

    pub fn with_input_sources(self, sources: &[InputSource]) -> Self {
        sources.iter().fold(self, |context, source| {
            context.with_input_file(match source {
                InputSource::Stdin => STDIN.to_string(),
                InputSource::File(path) => path.display().to_string(),
            })
        })
    }

    pub fn with_output_file(mut self, file: String) -> Self {
        self.output_file = Some(file);
        self
    }

    pub fn with_directory(mut self, dir: PathBuf) -> Self {
        self.directories.push(dir);
        self
    }
}

/// Validate file path exists and is readable
pub fn validate_file_path(path: &str) -> Result<(), String> {
    if path == STDIN {
        return Ok(());
    }
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

/// Validate output directory exists or can be created
pub fn validate_output_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if let Some(parent) = path_obj.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return Err(format!("Cannot create output directory: {}", e));
            }
        }
    }

    Ok(())
}

/// Validate a `--directory` search path
pub fn validate_directory(dir: &Path) -> Result<(), String> {
    if !dir.is_dir() {
        return Err(format!("Not a directory: {}", dir.display()));
    }
    Ok(())
}

/// Validate a complete validation context
pub fn validate_context(context: &ValidationContext) -> Result<(), String> {
    if context.input_files.is_empty() {
        return Err("No input files given".to_string());
    }

    for (i, input) in context.input_files.iter().enumerate() {
        validate_file_path(input)
            .map_err(|e| format!("Input file {} validation failed: {}", i + 1, e))?;
    }

    for dir in &context.directories {
        validate_directory(dir).map_err(|e| format!("Directory validation failed: {}", e))?;
    }

    if let Some(ref output) = context.output_file {
        validate_output_path(output).map_err(|e| format!("Output validation failed: {}", e))?;
    }

    Ok(())
}
