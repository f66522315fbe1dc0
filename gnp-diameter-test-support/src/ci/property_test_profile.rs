//! Property-test run profile parsing for CI and local overrides.
//!
//! Property suites over random graphs are cheap for small vertex counts and
//! cubic for large ones, so both the number of cases and the largest graph a
//! strategy may generate are tunable from the environment.

use std::env;

/// Environment variable controlling proptest case counts.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable controlling proptest process forking.
pub const GNP_DIAMETER_PBT_FORK_ENV_KEY: &str = "GNP_DIAMETER_PBT_FORK";
/// Environment variable capping the vertex count of generated graphs.
pub const GNP_DIAMETER_PBT_MAX_VERTICES_ENV_KEY: &str = "GNP_DIAMETER_PBT_MAX_VERTICES";

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
    max_vertices: usize,
}

impl ProptestRunProfile {
    /// Load a profile from environment variables with provided defaults.
    ///
    /// Invalid overrides are logged and replaced by the defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use gnp_diameter_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false).with_default_max_vertices(24);
    /// assert!(profile.cases() > 0);
    /// assert!(profile.max_vertices() >= 2);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        let cases = read_env_or_default(PROGTEST_CASES_ENV_KEY, default_cases, parse_cases);
        let fork = read_env_or_default(GNP_DIAMETER_PBT_FORK_ENV_KEY, default_fork, parse_bool);
        Self {
            cases,
            fork,
            max_vertices: DEFAULT_MAX_VERTICES,
        }
    }

    /// Replaces the built-in vertex cap unless the environment overrides it.
    #[must_use]
    pub fn with_default_max_vertices(mut self, default_max: usize) -> Self {
        self.max_vertices = read_env_or_default(
            GNP_DIAMETER_PBT_MAX_VERTICES_ENV_KEY,
            default_max.max(MIN_VERTICES),
            parse_max_vertices,
        );
        self
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether to run proptest cases in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }

    /// Largest vertex count a graph strategy should generate.
    #[must_use]
    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }
}

const DEFAULT_MAX_VERTICES: usize = 16;
const MIN_VERTICES: usize = 2;

fn read_env_or_default<T, F>(key: &'static str, default: T, parser: F) -> T
where
    T: Copy,
    F: Fn(&str) -> Result<T, String>,
{
    match env::var(key) {
        Ok(raw) => match parser(&raw) {
            Ok(value) => value,
            Err(reason) => {
                tracing::warn!(
                    env = key,
                    raw = %raw,
                    reason = %reason,
                    "invalid property-test profile override; using default",
                );
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    let parsed = raw
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("parse error: {error}"))?;
    if parsed == 0 {
        return Err("cases must be > 0".to_owned());
    }
    Ok(parsed)
}

fn parse_max_vertices(raw: &str) -> Result<usize, String> {
    let parsed = raw
        .trim()
        .parse::<usize>()
        .map_err(|error| format!("parse error: {error}"))?;
    if parsed < MIN_VERTICES {
        return Err(format!("max vertices must be >= {MIN_VERTICES}"));
    }
    Ok(parsed)
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected one of: true/false/1/0/yes/no/on/off".to_owned()),
    }
}
