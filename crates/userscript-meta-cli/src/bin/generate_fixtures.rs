//! Writes generated userscripts for the CLI benchmarks.
//!
//! Usage: cargo run --release --bin generate-fixtures --features generate -- [output_dir]
//!
//! Each preset from the core `generate` module becomes `<preset>.user.js`.
//! Output is deterministic, so the files only change when the generator does.

use std::path::{Path, PathBuf};
use std::{fs, io, process::ExitCode};
use userscript_meta_core::generate::{GeneratorConfig, generate_metadata, generate_userscript};
use userscript_meta_core::metadata::to_entries;

const DEFAULT_OUTPUT_DIR: &str = "benches/cli/fixtures";

/// Presets shared with `benches/fixtures.rs` in the core crate.
fn presets() -> [(&'static str, GeneratorConfig); 3] {
    [
        ("small", GeneratorConfig::small()),
        ("medium", GeneratorConfig::medium()),
        ("large", GeneratorConfig::large()),
    ]
}

/// What one generated fixture contains.
struct Fixture {
    path: PathBuf,
    bytes: usize,
    keys: usize,
    directives: usize,
}

fn write_fixture(output_dir: &Path, name: &str, config: &GeneratorConfig) -> io::Result<Fixture> {
    let metadata = generate_metadata(config);
    let script = generate_userscript(config);
    let path = output_dir.join(format!("{name}.user.js"));
    fs::write(&path, &script)?;

    Ok(Fixture {
        path,
        bytes: script.len(),
        keys: metadata.len(),
        directives: to_entries(&metadata, true).len(),
    })
}

fn main() -> ExitCode {
    let output_dir = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), PathBuf::from);

    if let Err(e) = fs::create_dir_all(&output_dir) {
        eprintln!("Error: cannot create {}: {e}", output_dir.display());
        return ExitCode::FAILURE;
    }

    for (name, config) in presets() {
        match write_fixture(&output_dir, name, &config) {
            Ok(fixture) => println!(
                "{}: {} keys, {} directives, {} bytes",
                fixture.path.display(),
                fixture.keys,
                fixture.directives,
                fixture.bytes
            ),
            Err(e) => {
                eprintln!("Error: {name}: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
