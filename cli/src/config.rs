use std::path::Path;

use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Configuration for the CLI.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Configuration for the `match` command.
    #[serde(rename = "match")]
    pub match_: MatchConfig,
    /// Configuration for the `dump` command.
    pub dump: DumpConfig,
}

/// Configuration for the `match` command.
#[derive(Deserialize, Serialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct MatchConfig {
    /// Print the inputs that don't match, not only the matching ones.
    pub print_non_matching: bool,
}

/// Configuration for the `dump` command.
#[derive(Deserialize, Serialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct DumpConfig {
    /// Mark accepting states with an asterisk. When false, accepting states
    /// are listed in a line of their own.
    pub mark_accepting: bool,
}

impl Default for MatchConfig {
    fn default() -> MatchConfig {
        MatchConfig { print_non_matching: true }
    }
}

impl Default for DumpConfig {
    fn default() -> DumpConfig {
        DumpConfig { mark_accepting: true }
    }
}

/// Load a config file from a given path. Path must contain a valid TOML file
/// or this function will propagate the error. Options missing in the file
/// take their default values.
pub fn load_config_from_file(
    config_file: &Path,
) -> Result<Config, Box<figment::Error>> {
    let config: Config =
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file_exact(config_file))
            .extract()?;
    Ok(config)
}
