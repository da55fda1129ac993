//! Random userscript generation for benchmarking and testing.
//!
//! Generated metadata always satisfies the built-in schema.

use crate::metadata::{Metadata, Value};
use crate::options::Options;
use crate::stringify::stringify;
use crate::validate::RUN_AT_VALUES;
use rand::prelude::*;
use rand::rngs::StdRng;

/// Configuration for generating userscripts.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of `@match` directives (at least one).
    pub num_matches: usize,
    /// Number of `@grant` directives.
    pub num_grants: usize,
    /// Number of `@require` directives.
    pub num_requires: usize,
    /// Lines of code after the metadata block.
    pub code_lines: usize,
    /// Seed for deterministic generation.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_matches: 5,
            num_grants: 2,
            num_requires: 1,
            code_lines: 50,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with the given number of `@match` directives and
    /// proportional grants, requires and code.
    pub fn new(num_matches: usize) -> Self {
        Self {
            num_matches: num_matches.max(1),
            num_grants: num_matches / 2,
            num_requires: num_matches / 5,
            code_lines: num_matches * 10,
            ..Default::default()
        }
    }

    /// Small fixture (~3 matches).
    pub fn small() -> Self {
        Self::new(3)
    }

    /// Medium fixture (~30 matches).
    pub fn medium() -> Self {
        Self::new(30)
    }

    /// Large fixture (~300 matches).
    pub fn large() -> Self {
        Self::new(300)
    }

    /// Set the random seed for deterministic generation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of code lines explicitly.
    pub fn with_code_lines(mut self, code_lines: usize) -> Self {
        self.code_lines = code_lines;
        self
    }
}

/// Vocabulary for generating realistic metadata.
mod vocabulary {
    pub const NAMES: &[&str] = &["Dark Mode", "Ad Skipper", "Tab Tamer", "Link Fixer", "Quiet Feed"];
    pub const AUTHORS: &[&str] = &["alice", "bob", "charlie", "dev", "maintainer"];
    pub const SCHEMES: &[&str] = &["*", "http", "https"];
    pub const HOSTS: &[&str] = &["example.com", "github.com", "news.ycombinator.com", "wikipedia.org"];
    pub const PATHS: &[&str] = &["/*", "/", "/index.html", "/*/issues/*", "/wiki/*"];
    pub const GRANTS: &[&str] = &[
        "GM_getValue",
        "GM_setValue",
        "GM_addStyle",
        "GM_xmlhttpRequest",
        "unsafeWindow",
    ];
    pub const LIBRARIES: &[&str] = &["jquery", "lodash", "moment", "axios"];
    pub const STATEMENTS: &[&str] = &[
        "const el = document.querySelector(\"#main\");",
        "el.style.display = \"none\";",
        "// tweak the layout",
        "window.addEventListener(\"load\", () => run());",
        "const url = \"https://example.com/api\"; // not metadata",
        "/* block comment */",
    ];
}

/// Probability of emitting `@noframes` (percentage).
const NOFRAMES_PROBABILITY: u32 = 30;

/// Probability of a subdomain wildcard in a match host (percentage).
const WILDCARD_PROBABILITY: u32 = 50;

fn pick<'a>(rng: &mut StdRng, choices: &[&'a str]) -> &'a str {
    choices[rng.random_range(0..choices.len())]
}

fn list(values: Vec<String>) -> Option<Value> {
    match values.len() {
        0 => None,
        1 => values.into_iter().next().map(Value::text),
        _ => Some(Value::texts(values)),
    }
}

fn generate_match(rng: &mut StdRng) -> String {
    use vocabulary::*;

    let scheme = pick(rng, SCHEMES);
    let host = pick(rng, HOSTS);
    let path = pick(rng, PATHS);
    if rng.random_ratio(WILDCARD_PROBABILITY, 100) {
        format!("{scheme}://*.{host}{path}")
    } else {
        format!("{scheme}://{host}{path}")
    }
}

/// Generates random metadata that satisfies the built-in schema.
pub fn generate_metadata(config: &GeneratorConfig) -> Metadata {
    use vocabulary::*;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let author = pick(&mut rng, AUTHORS);
    let mut metadata = Metadata::new()
        .with("name", pick(&mut rng, NAMES))
        .with("namespace", format!("https://{author}.example.com"))
        .with(
            "version",
            format!(
                "{}.{}.{}",
                rng.random_range(0..5),
                rng.random_range(0..20),
                rng.random_range(0..100)
            ),
        )
        .with("author", author);

    let matches = (0..config.num_matches.max(1))
        .map(|_| generate_match(&mut rng))
        .collect();
    if let Some(value) = list(matches) {
        metadata.insert("match", value);
    }

    let grants = (0..config.num_grants)
        .map(|_| pick(&mut rng, GRANTS).to_string())
        .collect();
    if let Some(value) = list(grants) {
        metadata.insert("grant", value);
    }

    let requires = (0..config.num_requires)
        .map(|i| {
            let library = pick(&mut rng, LIBRARIES);
            format!("https://cdn.example.com/{library}/{i}/{library}.min.js")
        })
        .collect();
    if let Some(value) = list(requires) {
        metadata.insert("require", value);
    }

    metadata.insert("run_at", pick(&mut rng, &RUN_AT_VALUES));
    if rng.random_ratio(NOFRAMES_PROBABILITY, 100) {
        metadata.insert("noframes", Value::flag());
    }
    metadata
}

/// Generates a complete userscript: a metadata block followed by code.
pub fn generate_userscript(config: &GeneratorConfig) -> String {
    use vocabulary::*;

    let metadata = generate_metadata(config);
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(1));
    let mut script = stringify(&metadata, &Options::default());
    script.push_str("\n\n");
    for _ in 0..config.code_lines {
        script.push_str(pick(&mut rng, STATEMENTS));
        script.push('\n');
    }
    script
}
