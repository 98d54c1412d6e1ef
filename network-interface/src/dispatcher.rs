use async_trait::async_trait;
use thiserror::Error;

use shardnode_hash::Hash32;
use shardnode_protocol::Block;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("no connection to any miner peer")]
    NoConnection,
}

/// The P2P collaborator's half of the contract: how the validator core
/// asks for a transaction or block to reach (or be fetched from) the rest
/// of the network, without this crate knowing anything about transport.
///
/// Tx and block requests are broadcast to every connected miner peer;
/// every other request selects one peer at random. A caller with no
/// peers available gets [`NetworkError::NoConnection`].
#[async_trait]
pub trait PeerRequestDispatcher: Send + Sync {
    async fn broadcast_to_miners(&self, block: &Block) -> Result<(), NetworkError>;

    async fn request_random_peer(&self, tx_hash: Hash32) -> Result<(), NetworkError>;
}
