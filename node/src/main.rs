#[macro_use]
extern crate log;

mod config;
mod error;
mod logging;

use std::time::Duration;

use structopt::StructOpt;

use shardnode_shard::{NumberOfShards, ValidatorShardMap};
use shardnode_store::Store;
use shardnode_validator::{ActiveParameters, Node};

use config::{CommandLine, Config, ConfigFile};
use error::NodeError;

fn build_config() -> Result<Config, NodeError> {
    let command_line = CommandLine::from_args();
    trace!("Command line: {:#?}", command_line);

    let config_file = ConfigFile::find(&command_line)?;
    trace!("Config file: {:#?}", config_file);

    let config = Config::build(config_file, command_line)?;
    debug!("Resolved configuration: {:#?}", config);
    Ok(config)
}

fn build_node(config: &Config) -> Result<Node, NodeError> {
    let store = Store::open(&config.data_dir)?;

    let mut validator_shard_map = ValidatorShardMap::new();
    validator_shard_map.insert(config.validator_address, 1);

    let params = ActiveParameters {
        block_size: config.block_size,
        epoch_length: config.epoch_length,
        slashing_window_size: config.slashing_window_size,
    };

    Ok(Node::new(
        store,
        config.validator_address,
        NumberOfShards(config.number_of_shards),
        validator_shard_map,
        params,
    ))
}

#[tokio::main]
async fn main() -> Result<(), NodeError> {
    let config = build_config()?;
    if let Err(e) = logging::initialize_logging(config.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!("Starting shardnode validator");
    let node = build_node(&config)?;

    let mut ticker = tokio::time::interval(Duration::from_secs(10));
    loop {
        ticker.tick().await;
        let block = node.prepare_block()?;
        info!(
            "Prepared candidate block at height {} with {} transactions",
            block.height,
            block.tx_count()
        );
    }
}
