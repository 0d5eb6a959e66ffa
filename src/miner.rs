/*!
Tracked participants in the block lottery

A [`Miner`] (typically a mining pool) holds a fixed share of the network's
hash power and keeps a running ledger of the blocks it has won during a single
simulation run. Miners are created by
[`SimulationBuilder`](crate::simulation::SimulationBuilder) and cloned fresh
for every run.
*/

use crate::{block::Block, power_dist::PowerValue, reward::Atomic};

/// Unique identifier of a [`Miner`]. Corresponds to a [`usize`].
///
/// Identifiers are 1-based and assigned in the order miners are added to a
/// [`SimulationBuilder`](crate::simulation::SimulationBuilder), which is also
/// the order in which the block lottery visits them.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinerId(pub(crate) usize);

impl MinerId {
    /// Returns the [`usize`] corresponding to this [`MinerId`].
    pub fn get(&self) -> usize {
        self.0
    }
}

impl From<usize> for MinerId {
    fn from(value: usize) -> Self {
        assert_ne!(value, 0, "newly made MinerId must be greater than 0");
        Self(value)
    }
}

impl Default for MinerId {
    fn default() -> Self {
        Self(1)
    }
}

impl std::fmt::Display for MinerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A named participant with a fixed hash power share and a running ledger.
///
/// # Invariants
///
/// `rewards` is always the sum of the rewards of every block counted in
/// `blocks`, and both only grow within a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Miner {
    id: MinerId,
    name: String,
    power: PowerValue,
    blocks: u64,
    rewards: Atomic,
}

impl Miner {
    pub(crate) fn new<N: Into<String>>(
        id: MinerId,
        name: N,
        power: PowerValue,
    ) -> Self {
        Self { id, name: name.into(), power, blocks: 0, rewards: 0 }
    }

    pub fn id(&self) -> MinerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Share of the network's hash power, in `(0.0, 1.0]`.
    pub fn power(&self) -> PowerValue {
        self.power
    }

    /// Number of blocks won so far.
    pub fn blocks(&self) -> u64 {
        self.blocks
    }

    /// Total reward of all blocks won so far, in atomic units.
    pub fn rewards(&self) -> Atomic {
        self.rewards
    }

    /// Records `block` as won by this miner.
    pub(crate) fn credit(&mut self, block: &Block) {
        debug_assert_eq!(block.miner, Some(self.id));

        self.blocks += 1;
        self.rewards += block.reward;
    }

    /// Returns a copy of this miner with an empty ledger.
    pub(crate) fn fresh(&self) -> Self {
        Self::new(self.id, self.name.clone(), self.power)
    }
}
