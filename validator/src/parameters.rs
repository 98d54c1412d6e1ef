/// The subset of genesis-fixed network parameters the validator consults
/// while preparing blocks and detecting slashable equivocation.
///
/// Named `ActiveParameters` in the source protocol, where it is a mutable
/// global updated by config transactions; here it is passed explicitly to
/// the functions that need it, one per [`crate::node::Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveParameters {
    pub block_size: u32,
    pub epoch_length: u32,
    pub slashing_window_size: u64,
}

impl Default for ActiveParameters {
    fn default() -> Self {
        ActiveParameters {
            block_size: 2_000_000,
            epoch_length: 100,
            slashing_window_size: 100,
        }
    }
}
