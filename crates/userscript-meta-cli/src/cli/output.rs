//! Output formatting for the CLI.
//!
//! This module provides human-readable and JSON output for check results,
//! read failures and validation errors.

use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use userscript_meta_core::{ReadError, ValidationError, Warning};

/// Result of checking a single file.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    /// The metadata block is valid.
    Valid { warnings: Vec<Warning> },
    /// The metadata block could not be read or is invalid.
    Invalid { error: ReadError },
}

impl Outcome {
    /// Returns true if the file failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Invalid { .. })
    }

    /// Returns the warnings of a valid file.
    pub fn warnings(&self) -> &[Warning] {
        match self {
            Outcome::Valid { warnings } => warnings,
            Outcome::Invalid { .. } => &[],
        }
    }
}

/// A checked file in JSON format.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// Path of the file as given or found.
    pub path: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Output formatter for human-readable console output.
pub struct HumanOutput<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> HumanOutput<W> {
    /// Creates a new human output formatter.
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    /// Writes a header for a file.
    pub fn write_file_header(&mut self, path: &str) -> std::io::Result<()> {
        let header = format!("==> {}", path);
        if self.use_colors {
            writeln!(self.writer, "\n{}", header.cyan().bold())?;
        } else {
            writeln!(self.writer, "\n{}", header)?;
        }
        Ok(())
    }

    fn write_label(&mut self, label: &str, message: &str) -> std::io::Result<()> {
        if self.use_colors {
            let colored_label = match label {
                "ERROR" => format!("[{}]", label).red().bold(),
                _ => format!("[{}]", label).yellow().bold(),
            };
            writeln!(self.writer, "  {} {}", colored_label, message)
        } else {
            writeln!(self.writer, "  [{}] {}", label, message)
        }
    }

    /// Writes a single validation error.
    pub fn write_validation_error(&mut self, error: &ValidationError) -> std::io::Result<()> {
        match error.reason() {
            Some(reason) if !matches!(error, ValidationError::InvalidKey { .. }) => {
                self.write_label("ERROR", &format!("@{}: {}", error_key(error), reason))
            }
            _ => self.write_label("ERROR", &error.to_string()),
        }
    }

    /// Writes every validation error.
    pub fn write_validation_errors(&mut self, errors: &[ValidationError]) -> std::io::Result<()> {
        for error in errors {
            self.write_validation_error(error)?;
        }
        Ok(())
    }

    /// Writes why reading a userscript failed.
    pub fn write_read_error(&mut self, error: &ReadError) -> std::io::Result<()> {
        match error {
            ReadError::Extract { reason } => self.write_label("ERROR", &reason.to_string()),
            ReadError::Parse { lines } => {
                for line in lines {
                    self.write_label("ERROR", &format!("not a directive: {:?}", line))?;
                }
                Ok(())
            }
            ReadError::Validate { errors } => self.write_validation_errors(errors),
        }
    }

    /// Writes a single warning.
    pub fn write_warning(&mut self, warning: &Warning) -> std::io::Result<()> {
        self.write_label("WARN", &warning.summary)?;
        if !warning.description.is_empty() {
            writeln!(self.writer, "         {}", warning.description)?;
        }
        Ok(())
    }

    /// Writes every warning.
    pub fn write_warnings(&mut self, warnings: &[Warning]) -> std::io::Result<()> {
        for warning in warnings {
            self.write_warning(warning)?;
        }
        Ok(())
    }

    /// Writes the result for one file. Valid files without warnings are skipped.
    pub fn write_report(&mut self, report: &FileReport) -> std::io::Result<()> {
        match &report.outcome {
            Outcome::Valid { warnings } if warnings.is_empty() => Ok(()),
            Outcome::Valid { warnings } => {
                self.write_file_header(&report.path)?;
                self.write_warnings(warnings)
            }
            Outcome::Invalid { error } => {
                self.write_file_header(&report.path)?;
                self.write_read_error(error)
            }
        }
    }

    /// Writes a summary of all checked files.
    pub fn write_summary(
        &mut self,
        total_files: usize,
        invalid_files: usize,
        total_warnings: usize,
    ) -> std::io::Result<()> {
        writeln!(self.writer)?;

        if invalid_files == 0 && total_warnings == 0 {
            let message = format!("✓ {} userscript(s) valid", total_files);
            if self.use_colors {
                writeln!(self.writer, "{}", message.green().bold())?;
            } else {
                writeln!(self.writer, "{}", message)?;
            }
        } else {
            let message = format!(
                "✗ {} of {} userscript(s) invalid, {} warning(s)",
                invalid_files, total_files, total_warnings
            );
            if self.use_colors {
                writeln!(self.writer, "{}", message.red().bold())?;
            } else {
                writeln!(self.writer, "{}", message)?;
            }
        }

        Ok(())
    }

    /// Writes a startup error.
    pub fn write_error(&mut self, message: &str) -> std::io::Result<()> {
        if self.use_colors {
            writeln!(self.writer, "{} {}", "Error:".red().bold(), message)?;
        } else {
            writeln!(self.writer, "Error: {}", message)?;
        }
        Ok(())
    }
}

fn error_key(error: &ValidationError) -> &str {
    error
        .entry()
        .map(|entry| entry.key.as_str())
        .or_else(|| error.item().map(|item| item.key()))
        .unwrap_or_default()
}

/// Collects the results of a `check` run, in the order files were checked.
#[derive(Debug, Default)]
pub struct CheckResults {
    reports: Vec<FileReport>,
}

impl CheckResults {
    /// Creates a new empty results collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the outcome for a file.
    pub fn add(&mut self, path: &Path, outcome: Outcome) {
        self.reports.push(FileReport {
            path: path.display().to_string(),
            outcome,
        });
    }

    /// Returns the number of checked files.
    pub fn total_files(&self) -> usize {
        self.reports.len()
    }

    /// Returns the number of files that failed.
    pub fn invalid_files(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.outcome.is_failure())
            .count()
    }

    /// Returns the total number of warnings.
    pub fn total_warnings(&self) -> usize {
        self.reports.iter().map(|r| r.outcome.warnings().len()).sum()
    }

    /// Returns true if any file failed.
    pub fn has_failures(&self) -> bool {
        self.invalid_files() > 0
    }

    /// Returns true if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        self.total_warnings() > 0
    }

    /// Iterates over reports in order.
    pub fn iter(&self) -> impl Iterator<Item = &FileReport> {
        self.reports.iter()
    }

    /// Writes results in human-readable format.
    pub fn write_human<W: Write>(&self, writer: &mut W, use_colors: bool) -> std::io::Result<()> {
        let mut output = HumanOutput::new(writer, use_colors);

        for report in self.iter() {
            output.write_report(report)?;
        }

        output.write_summary(
            self.total_files(),
            self.invalid_files(),
            self.total_warnings(),
        )
    }

    /// Writes results in JSON format.
    pub fn write_json<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        write_json(writer, &self.reports)
    }
}

/// Writes a value as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    writeln!(writer, "{}", json)
}
