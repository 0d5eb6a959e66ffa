use crate::{
    miner::MinerId,
    reward::{Atomic, RewardCurve},
};

/// Height of a block on the chain.
pub type Height = u64;

/// Result of one round of the block lottery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    /// Height of this block.
    pub height: Height,
    /// The tracked miner which won this block, or `None` if the untracked
    /// rest of the network won it.
    pub miner: Option<MinerId>,
    /// Reward minted by this block, in atomic units.
    pub reward: Atomic,
}

impl Block {
    pub fn new(height: Height, miner: Option<MinerId>, reward: Atomic) -> Self {
        Self { height, miner, reward }
    }

    /// Virtual block which precedes every simulation run. Its reward is the
    /// base reward at zero supply, so at least one real block gets mined.
    pub(crate) fn sentinel(curve: &RewardCurve) -> Self {
        Self::new(0, None, curve.sentinel_reward())
    }

    /// Returns true if no tracked miner won this block.
    #[inline]
    pub fn is_residual(&self) -> bool {
        self.miner.is_none()
    }
}
