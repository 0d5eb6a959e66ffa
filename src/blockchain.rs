use crate::{block::Height, reward::Atomic};

/// Height and cumulative supply of the simulated chain.
///
/// Owned by exactly one simulation run. Height grows by one and supply by the
/// block's reward each time a block is mined; supply stays below the curve's
/// ceiling because rewards shrink with the remaining supply.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChainState {
    height: Height,
    supply: Atomic,
}

impl ChainState {
    pub fn new(height: Height, supply: Atomic) -> Self {
        Self { height, supply }
    }

    /// Height of the most recent block.
    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    /// Total amount minted so far, in atomic units.
    #[inline]
    pub fn supply(&self) -> Atomic {
        self.supply
    }

    /// Appends a block carrying `reward` and returns its height.
    pub(crate) fn advance(&mut self, reward: Atomic) -> Height {
        self.height += 1;
        self.supply += reward;

        self.height
    }
}
