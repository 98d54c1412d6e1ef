use shardnode_hash::Hash32;
use shardnode_mempool::Mempool;
use shardnode_protocol::{Addr64, Block, Transaction};
use shardnode_shard::{assign_transaction_to_shard, NumberOfShards, ShardId};

use crate::error::ValidatorError;
use crate::parameters::ActiveParameters;

/// Puts admin transactions ahead of fund transfers, then stably sorts the
/// fund transfers by ascending `tx_cnt`.
///
/// The source comparator isn't a strict weak order (`Less(i,j)` is true
/// whenever `i` is non-Funds, regardless of `j`, so two non-Funds entries
/// both claim to precede each other), which makes feeding it straight to a
/// general sort undefined behavior. Partitioning first sidesteps that: the
/// non-Funds prefix is left in arrival order (the source never specifies
/// one), and only the well-ordered Funds suffix is sorted.
fn sort_for_block_preparation(mut txs: Vec<Transaction>) -> Vec<Transaction> {
    let split = itertools_partition_point(&mut txs);
    txs[split..].sort_by_key(|tx| tx.tx_cnt());
    txs
}

/// Partitions `txs` in place into non-Funds first, Funds second, returning
/// the index of the first Funds entry.
fn itertools_partition_point(txs: &mut [Transaction]) -> usize {
    let mut next_funds = 0;
    for i in 0..txs.len() {
        if !txs[i].is_funds() {
            txs.swap(i, next_funds);
            next_funds += 1;
        }
    }
    next_funds
}

/// Identifies the block to extend and the most recently closed epoch
/// block, the two pieces of chain state block preparation reasons about.
pub struct ChainHead {
    pub last_block_height: u32,
    pub last_block_hash: Hash32,
    pub last_epoch_block_height: u32,
}

/// Builds a candidate block for `my_shard` out of the mempool's current
/// open transactions, respecting the active block size bound and
/// quarantining any transaction `add_tx` rejects.
///
/// Transactions assigned to other shards are skipped outright; they are
/// left in the mempool for whichever validator owns that shard.
pub fn prepare_block(
    mempool: &Mempool,
    chain_head: &ChainHead,
    params: &ActiveParameters,
    shards: NumberOfShards,
    my_shard: ShardId,
    beneficiary: Addr64,
) -> Block {
    let mut block = Block::open(
        chain_head.last_block_hash,
        chain_head.last_block_height + 1,
        beneficiary,
    );
    block.shard_id = my_shard as u8;

    let snapshot = mempool.read_all_open_txs();
    let sorted = sort_for_block_preparation(snapshot);

    let is_epoch_boundary = chain_head.last_block_height
        == chain_head.last_epoch_block_height + params.epoch_length - 1;

    for tx in sorted {
        let assigned_shard = assign_transaction_to_shard(&tx, shards);
        if assigned_shard != my_shard {
            continue;
        }

        // Pre-admit size check: would admitting one more hash overflow the
        // configured block size? `block.get_size()` already counts only
        // this shard's admitted hashes, so `+ HASH_LEN` is the prospective
        // cost of the candidate.
        if block.get_size() + shardnode_protocol::HASH_LEN > params.block_size {
            break;
        }

        if matches!(tx, Transaction::Stake(_)) && !is_epoch_boundary {
            continue;
        }

        match add_tx(&mut block, &tx) {
            Ok(()) => {}
            Err(e) => {
                log::debug!("Rejecting transaction {:?}: {}", tx.hash(), e);
                mempool.write_invalid_open_tx(&tx.hash());
            }
        }
    }

    block
}

/// Admits `tx` into `block` if it passes minimal semantic validation,
/// appending its hash to the matching per-kind list.
///
/// Signature verification, balance accounting, and contract eligibility
/// are collaborator concerns (the account/crypto layers); this crate only
/// enforces the checks it can make locally from the transaction body
/// itself.
pub fn add_tx(block: &mut Block, tx: &Transaction) -> Result<(), ValidatorError> {
    match tx {
        Transaction::Funds(funds_tx) => {
            if funds_tx.amount == 0 {
                return Err(ValidatorError::InsufficientBalance);
            }
            block.funds_tx_data.push(tx.hash());
        }
        Transaction::Contract(_) => {
            block.contract_tx_data.push(tx.hash());
        }
        Transaction::Config(_) => {
            block.config_tx_data.push(tx.hash());
        }
        Transaction::Stake(_) => {
            block.stake_tx_data.push(tx.hash());
        }
    }
    Ok(())
}

/// Removes each of the given transaction hashes from the open mempool,
/// used once a peer confirms its shard has already closed them.
///
/// Missing hashes are not an error; they simply weren't in our mempool to
/// begin with.
pub fn delete_transaction_from_mempool(
    mempool: &Mempool,
    contract_data: &[Hash32],
    funds_data: &[Hash32],
    config_data: &[Hash32],
    stake_data: &[Hash32],
) {
    let mut deleted = 0usize;
    for hash in contract_data
        .iter()
        .chain(funds_data)
        .chain(config_data)
        .chain(stake_data)
    {
        if mempool.delete_open_tx(hash).is_some() {
            log::debug!("Pruned transaction {:?} from mempool", hash);
            deleted += 1;
        }
    }
    log::info!("Pruned {} transactions from mempool", deleted);
}
