use std::collections::HashSet;

use crate::{
    block::Height,
    blockchain::ChainState,
    miner::{Miner, MinerId},
    power_dist::{PowerDistribution, PowerDistributionError, PowerValue},
    reward::{Atomic, RewardCurve},
};

use super::SimulationGroup;

/// Builds a [`SimulationGroup`].
#[derive(Debug, Default)]
pub struct SimulationBuilder {
    pub starting_height: Option<Height>,
    pub starting_supply: Option<Atomic>,
    pub curve: Option<RewardCurve>,
    pub seeds: Option<Vec<u64>>,
    miners: Vec<(String, PowerValue)>,
}

#[derive(Debug, thiserror::Error)]
pub enum SimulationBuildError {
    #[error("no miners were added")]
    NoMinersGiven,
    #[error("number of simulation runs must be greater than 0")]
    ZeroRuns,
    #[error("miner name {0:?} is used more than once")]
    DuplicateMinerName(String),
    #[error("floor reward must be greater than 0")]
    ZeroFloor,
    #[error("supply ceiling {ceiling} must exceed the starting supply {supply}")]
    CeilingNotAboveSupply { ceiling: Atomic, supply: Atomic },
    #[error("base reward at zero supply does not exceed the floor reward")]
    FlatCurve,
    #[error("a simulation run would overflow the supply counter")]
    SupplyOverflow,
    #[error("a simulation run would overflow the chain height")]
    HeightOverflow,
    #[error(transparent)]
    PowerDistributionError(#[from] PowerDistributionError),
}

impl SimulationBuilder {
    /// Creates a new [`SimulationBuilder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tracked miner with the given share of the network's hash power.
    /// Miners take part in the block lottery in the order they are added.
    pub fn add_miner<N: Into<String>>(
        mut self,
        name: N,
        power: PowerValue,
    ) -> Self {
        self.miners.push((name.into(), power));

        self
    }

    /// Sets the height of the chain at the start of each run (default 0).
    pub fn starting_height(mut self, height: Height) -> Self {
        self.starting_height = Some(height);

        self
    }

    /// Sets the cumulative supply at the start of each run, in atomic units
    /// (default 0).
    pub fn starting_supply(mut self, supply: Atomic) -> Self {
        self.starting_supply = Some(supply);

        self
    }

    /// Sets the reward curve ([`RewardCurve::default`] used otherwise).
    pub fn curve(mut self, curve: RewardCurve) -> Self {
        self.curve = Some(curve);

        self
    }

    /// Runs the simulation `num` times, using seeds `1..=num` (default 1).
    pub fn runs(mut self, num: u64) -> Self {
        self.seeds = Some((1..=num).collect());

        self
    }

    /// Runs the simulation once for each of the given seeds.
    pub fn seeds<I>(mut self, seeds: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        self.seeds = Some(seeds.into_iter().collect());

        self
    }

    /// Creates a [`SimulationGroup`] from the specified parameters.
    pub fn build(self) -> Result<SimulationGroup, SimulationBuildError> {
        use SimulationBuildError::*;

        let SimulationBuilder {
            starting_height,
            starting_supply,
            curve,
            seeds,
            miners,
        } = self;

        if miners.is_empty() {
            return Err(NoMinersGiven);
        }

        {
            let mut names = HashSet::new();
            for (name, _) in &miners {
                if !names.insert(name.as_str()) {
                    return Err(DuplicateMinerName(name.clone()));
                }
            }
        }

        miners
            .iter()
            .map(|&(_, power)| power)
            .collect::<PowerDistribution>()
            .validate()?;

        let seeds = seeds.unwrap_or_else(|| vec![1]);
        if seeds.is_empty() {
            return Err(ZeroRuns);
        }

        let curve = curve.unwrap_or_default();
        let height = starting_height.unwrap_or_default();
        let supply = starting_supply.unwrap_or_default();

        if curve.floor() == 0 {
            return Err(ZeroFloor);
        }
        if curve.ceiling() <= supply {
            return Err(CeilingNotAboveSupply {
                ceiling: curve.ceiling(),
                supply,
            });
        }
        if curve.is_tail(curve.sentinel_reward()) {
            return Err(FlatCurve);
        }

        let blocks = curve.blocks_until_tail(supply).ok_or(SupplyOverflow)?;
        if height.checked_add(blocks).is_none() {
            return Err(HeightOverflow);
        }

        let miners = miners
            .into_iter()
            .enumerate()
            .map(|(i, (name, power))| {
                Miner::new(MinerId::from(i + 1), name, power)
            })
            .collect();

        Ok(SimulationGroup {
            chain: ChainState::new(height, supply),
            curve,
            miners,
            seeds,
        })
    }
}
