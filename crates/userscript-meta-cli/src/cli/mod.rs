//! Command-line interface definitions.

pub mod config;
pub mod output;
pub mod walk;

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use userscript_meta_core::Options;
use userscript_meta_core::options::DEFAULT_SPACING;

/// Userscript metadata tool.
///
/// Checks the metadata blocks of userscripts, extracts them as JSON and
/// formats JSON metadata back into a block.
#[derive(Parser, Debug)]
#[command(name = "userscript-meta")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Output results as JSON instead of human-readable format.
    #[arg(long, short = 'j', global = true, env = "USERSCRIPT_META_JSON")]
    pub json: bool,

    /// Increase verbosity level (-v for info, -vv for debug, -vvv for trace).
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check the metadata blocks of userscript files.
    Check(CheckArgs),
    /// Format metadata JSON as a metadata block.
    Format(FormatArgs),
    /// Print the metadata of a userscript as JSON.
    Extract(ExtractArgs),
}

/// Flags shared by every command that maps keys.
#[derive(ClapArgs, Debug, Clone, Copy)]
pub struct KeyArgs {
    /// Keep underscores in keys instead of treating them as hyphens.
    #[arg(long, env = "USERSCRIPT_META_NO_UNDERSCORES_AS_HYPHENS")]
    pub no_underscores_as_hyphens: bool,
}

#[derive(ClapArgs, Debug)]
pub struct CheckArgs {
    /// Files or directories to check. Directories are searched for `*.user.js` files.
    #[arg(required = true, env = "USERSCRIPT_META_PATHS", value_delimiter = ',')]
    pub paths: Vec<PathBuf>,

    /// Respect `.gitignore` rules when searching directories.
    #[arg(long, env = "USERSCRIPT_META_GITIGNORE")]
    pub gitignore: bool,

    /// Search hidden files and directories.
    #[arg(long, env = "USERSCRIPT_META_HIDDEN")]
    pub hidden: bool,

    /// Treat warnings as failures (exit code 3).
    #[arg(long, env = "USERSCRIPT_META_FAIL_ON_WARNINGS")]
    pub fail_on_warnings: bool,

    #[command(flatten)]
    pub keys: KeyArgs,
}

#[derive(ClapArgs, Debug)]
pub struct FormatArgs {
    /// JSON file holding the metadata. Reads standard input when omitted.
    pub file: Option<PathBuf>,

    /// Do not align values into a column.
    #[arg(long, env = "USERSCRIPT_META_NO_ALIGN")]
    pub no_align: bool,

    /// Emit the most compact block (overrides alignment and spacing).
    #[arg(long, env = "USERSCRIPT_META_MINIFY")]
    pub minify: bool,

    /// Number of spaces between the longest key and its value.
    #[arg(long, env = "USERSCRIPT_META_SPACING", default_value_t = DEFAULT_SPACING)]
    pub spacing: usize,

    #[command(flatten)]
    pub keys: KeyArgs,
}

#[derive(ClapArgs, Debug)]
pub struct ExtractArgs {
    /// Userscript file to read.
    pub file: PathBuf,

    #[command(flatten)]
    pub keys: KeyArgs,
}

impl KeyArgs {
    fn options(self) -> Options {
        Options::default().with_underscores_as_hyphens(!self.no_underscores_as_hyphens)
    }
}

impl CheckArgs {
    /// Returns the library options for reading each file.
    pub fn options(&self) -> Options {
        self.keys.options()
    }
}

impl FormatArgs {
    /// Returns the library options for rendering the block.
    pub fn options(&self) -> Options {
        self.keys
            .options()
            .with_align(!self.no_align)
            .with_minify(self.minify)
            .with_spacing(self.spacing)
    }
}

impl ExtractArgs {
    /// Returns the library options for reading the file.
    pub fn options(&self) -> Options {
        self.keys.options()
    }
}
