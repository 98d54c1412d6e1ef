use std::path::PathBuf;

use serde::Deserialize;
use structopt::StructOpt;

use shardnode_protocol::Addr64;

use crate::error::NodeError;

/// Command-line flags. Anything set here overrides both the config file
/// and the built-in defaults.
#[derive(Debug, StructOpt)]
#[structopt(name = "shardnode", about = "A sharded PoS blockchain validator")]
pub struct CommandLine {
    /// Path to a TOML config file. Defaults to the platform config
    /// directory if present, otherwise built-in defaults apply.
    #[structopt(long, parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// Directory the store's environment and its buckets live under.
    #[structopt(long, parse(from_os_str))]
    pub data_dir: Option<PathBuf>,

    /// This validator's 64-byte address, hex-encoded.
    #[structopt(long)]
    pub validator_address: Option<String>,

    #[structopt(long)]
    pub number_of_shards: Option<u32>,

    #[structopt(long)]
    pub log_level: Option<String>,
}

/// The subset of settings a TOML config file may specify. Every field is
/// optional so a file only needs to mention what it overrides.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub data_dir: Option<PathBuf>,
    pub validator_address: Option<String>,
    pub number_of_shards: Option<u32>,
    pub block_size: Option<u32>,
    pub epoch_length: Option<u32>,
    pub slashing_window_size: Option<u64>,
    pub log_level: Option<String>,
}

impl ConfigFile {
    /// Loads `path` if given, otherwise looks under the platform config
    /// directory; an absent file at either location is not an error, it
    /// just means no overrides apply.
    pub fn find(command_line: &CommandLine) -> Result<Self, NodeError> {
        let path = match &command_line.config {
            Some(path) => path.clone(),
            None => match directories::ProjectDirs::from("dev", "shardnode", "shardnode") {
                Some(dirs) => dirs.config_dir().join("shardnode.toml"),
                None => return Ok(ConfigFile::default()),
            },
        };

        if !path.exists() {
            return Ok(ConfigFile::default());
        }

        let contents =
            std::fs::read_to_string(&path).map_err(|source| NodeError::ReadConfig {
                path: path.clone(),
                source,
            })?;
        toml::from_str(&contents).map_err(|source| NodeError::ParseConfig { path, source })
    }
}

/// The fully resolved configuration: built-in defaults, overridden by the
/// config file, overridden in turn by explicit command-line flags.
#[derive(Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub validator_address: Addr64,
    pub number_of_shards: u32,
    pub block_size: u32,
    pub epoch_length: u32,
    pub slashing_window_size: u64,
    pub log_level: log::LevelFilter,
}

impl Config {
    pub fn build(file: ConfigFile, command_line: CommandLine) -> Result<Self, NodeError> {
        let data_dir = command_line
            .data_dir
            .or(file.data_dir)
            .unwrap_or_else(default_data_dir);

        let address_hex = command_line
            .validator_address
            .or(file.validator_address)
            .unwrap_or_else(|| "00".repeat(64));
        let validator_address = parse_address(&address_hex)?;

        let number_of_shards = command_line
            .number_of_shards
            .or(file.number_of_shards)
            .unwrap_or(1);

        let log_level_name = command_line
            .log_level
            .or(file.log_level)
            .unwrap_or_else(|| "info".to_string());
        let log_level = log_level_name.parse().unwrap_or(log::LevelFilter::Info);

        Ok(Config {
            data_dir,
            validator_address,
            number_of_shards,
            block_size: file.block_size.unwrap_or(2_000_000),
            epoch_length: file.epoch_length.unwrap_or(100),
            slashing_window_size: file.slashing_window_size.unwrap_or(100),
            log_level,
        })
    }
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("dev", "shardnode", "shardnode")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./shardnode-data"))
}

fn parse_address(hex_str: &str) -> Result<Addr64, NodeError> {
    let bytes = hex::decode(hex_str).map_err(|_| NodeError::InvalidAddress(hex_str.to_string()))?;
    let array: [u8; 64] = bytes
        .try_into()
        .map_err(|_| NodeError::InvalidAddress(hex_str.to_string()))?;
    Ok(Addr64(array))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_overrides_file_and_defaults() {
        let file = ConfigFile {
            number_of_shards: Some(4),
            ..ConfigFile::default()
        };
        let command_line = CommandLine {
            config: None,
            data_dir: None,
            validator_address: None,
            number_of_shards: Some(8),
            log_level: None,
        };
        let config = Config::build(file, command_line).unwrap();
        assert_eq!(config.number_of_shards, 8);
    }

    #[test]
    fn file_overrides_built_in_default() {
        let file = ConfigFile {
            number_of_shards: Some(4),
            ..ConfigFile::default()
        };
        let command_line = CommandLine {
            config: None,
            data_dir: None,
            validator_address: None,
            number_of_shards: None,
            log_level: None,
        };
        let config = Config::build(file, command_line).unwrap();
        assert_eq!(config.number_of_shards, 4);
    }

    #[test]
    fn invalid_hex_address_is_rejected() {
        let command_line = CommandLine {
            config: None,
            data_dir: None,
            validator_address: Some("not-hex".to_string()),
            number_of_shards: None,
            log_level: None,
        };
        assert!(Config::build(ConfigFile::default(), command_line).is_err());
    }
}
