/// The 1-byte message tag every peer message leads with.
///
/// Inbound dispatch is a flat switch over this single byte; there is no
/// nested framing below it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeId {
    // Broadcasts
    FundsTxBrdcst = 1,
    AccTxBrdcst = 2,
    ConfigTxBrdcst = 3,
    StakeTxBrdcst = 4,
    BlockBrdcst = 5,
    ValidatorShardBrdcst = 6,
    TimeBrdcst = 7,

    // Requests
    FundsTxReq = 10,
    ContractTxReq = 11,
    ConfigTxReq = 12,
    StakeTxReq = 13,
    BlockReq = 14,
    ValidatorShardReq = 15,
    BlockHeaderReq = 16,
    AccReq = 17,
    StateReq = 18,
    RootAccReq = 19,
    MinerPing = 20,
    ClientPing = 21,
    NeighborReq = 22,
    IntermediateNodesReq = 23,
    GenesisReq = 24,
    FirstEpochBlockReq = 25,
    EpochBlockReq = 26,
    LastEpochBlockReq = 27,

    // Responses (paired with the requests above)
    FundsTxRes = 40,
    ContractTxRes = 41,
    ConfigTxRes = 42,
    StakeTxRes = 43,
    BlockRes = 44,
    ValidatorShardRes = 45,
    BlockHeaderRes = 46,
    AccRes = 47,
    StateRes = 48,
    RootAccRes = 49,
    MinerPingRes = 50,
    ClientPingRes = 51,
    NeighborRes = 52,
    IntermediateNodesRes = 53,
    GenesisRes = 54,
    FirstEpochBlockRes = 55,
    EpochBlockRes = 56,
    LastEpochBlockRes = 57,
}

impl TypeId {
    /// Transaction and block messages fan out to every connected miner
    /// peer; everything else is answered by a single random peer.
    pub fn is_broadcast(self) -> bool {
        matches!(
            self,
            TypeId::FundsTxBrdcst
                | TypeId::AccTxBrdcst
                | TypeId::ConfigTxBrdcst
                | TypeId::StakeTxBrdcst
                | TypeId::BlockBrdcst
                | TypeId::ValidatorShardBrdcst
                | TypeId::TimeBrdcst
        )
    }
}
