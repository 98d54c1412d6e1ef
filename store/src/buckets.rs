//! Names of the 11 named buckets a shardnode store keeps, carried over
//! verbatim (modulo casing) from the source protocol's bucket constants.

pub const OPENBLOCKS: &str = "openblocks";
pub const CLOSEDBLOCKS: &str = "closedblocks";
pub const CLOSEDFUNDS: &str = "closedfunds";
pub const CLOSEDACCS: &str = "closedaccs";
pub const CLOSEDSTAKES: &str = "closedstakes";
pub const CLOSEDCONFIGS: &str = "closedconfigs";
pub const LASTCLOSEDBLOCK: &str = "lastclosedblock";
pub const GENESIS: &str = "genesis";
pub const CLOSEDEPOCHBLOCKS: &str = "closedepochblocks";
pub const LASTCLOSEDEPOCHBLOCKS: &str = "lastclosedepochblocks";
pub const OPENEPOCHBLOCK: &str = "openepochblock";

pub const ALL: &[&str] = &[
    OPENBLOCKS,
    CLOSEDBLOCKS,
    CLOSEDFUNDS,
    CLOSEDACCS,
    CLOSEDSTAKES,
    CLOSEDCONFIGS,
    LASTCLOSEDBLOCK,
    GENESIS,
    CLOSEDEPOCHBLOCKS,
    LASTCLOSEDEPOCHBLOCKS,
    OPENEPOCHBLOCK,
];

/// The closed-transaction buckets, in the order `read_closed_tx` probes
/// them when the caller doesn't know the transaction's kind up front.
pub const CLOSED_TX_BUCKETS: &[&str] = &[CLOSEDFUNDS, CLOSEDACCS, CLOSEDCONFIGS, CLOSEDSTAKES];

/// The single key every genesis record is stored under.
pub const GENESIS_KEY: &[u8] = b"genesis";

/// The single key the last-closed-block/epoch-block buckets hold.
pub const LATEST_KEY: &[u8] = b"latest";
