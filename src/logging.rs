//! Logger bootstrap for the demo binary and tests.
//!
//! Combat crates log at `info` (or `debug` when verbose) while engine and
//! third-party crates stay at `warn`, so attack and pull traces are not buried
//! under scheduler noise.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Crates whose records follow the verbosity flag.
const COMBAT_TARGETS: [&str; 2] = ["melee_core", "melee_demo"];

/// Builds the default `env_logger` filter for `verbose`.
///
/// ```
/// use melee_core::logging::default_filter;
///
/// assert_eq!(
///     default_filter(true),
///     "warn,melee_core=debug,melee_demo=debug"
/// );
/// ```
#[must_use]
pub fn default_filter(verbose: bool) -> String {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let level = level.as_str().to_ascii_lowercase();
    COMBAT_TARGETS
        .iter()
        .fold(LevelFilter::Warn.as_str().to_ascii_lowercase(), |filter, target| {
            format!("{filter},{target}={level}")
        })
}

/// Installs the global logger using [`default_filter`]. `RUST_LOG` replaces
/// the default entirely.
///
/// Returns `false` when a logger was already installed, which lets tests call
/// this repeatedly.
#[must_use = "a `false` result means another logger is active"]
pub fn init(verbose: bool) -> bool {
    let env = Env::default().default_filter_or(default_filter(verbose));
    Builder::from_env(env).try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::quiet(false, "warn,melee_core=info,melee_demo=info")]
    #[case::verbose(true, "warn,melee_core=debug,melee_demo=debug")]
    fn filter_scopes_verbosity_to_combat_crates(#[case] verbose: bool, #[case] expected: &str) {
        assert_eq!(default_filter(verbose), expected);
    }

    #[rstest]
    fn second_init_is_harmless() {
        let _installed = init(false);
        assert!(!init(true));
    }
}
