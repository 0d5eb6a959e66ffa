//! Building and running seeded emission simulations

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    block::{Block, Height},
    blockchain::ChainState,
    lottery,
    miner::Miner,
    power_dist::PowerDistribution,
    results::ResultsBuilder,
    reward::{Atomic, RewardCurve},
};

pub mod builder;

pub use builder::{SimulationBuildError, SimulationBuilder};

/// Container for a group of simulations which run on the same set of miners
/// and the same starting chain, one per seed. Simulations should be run using
/// this struct's `run_all` method.
#[derive(Debug, Clone)]
pub struct SimulationGroup {
    chain: ChainState,
    curve: RewardCurve,
    miners: Vec<Miner>,
    seeds: Vec<u64>,
}

impl SimulationGroup {
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    /// Miners in lottery order, with empty ledgers.
    pub fn miners(&self) -> &[Miner] {
        &self.miners
    }

    /// Seeds of the simulation runs, in the order their results are reported.
    pub fn seeds(&self) -> &[u64] {
        &self.seeds
    }

    pub fn curve(&self) -> RewardCurve {
        self.curve
    }

    /// Chain state every run starts from.
    pub fn starting_chain(&self) -> ChainState {
        self.chain
    }

    pub fn power_dist(&self) -> PowerDistribution {
        self.miners.iter().map(Miner::power).collect()
    }

    /// Returns the simulation run for `seed`, starting from fresh ledgers.
    pub fn simulation(&self, seed: u64) -> Simulation {
        Simulation {
            seed,
            chain: self.chain,
            curve: self.curve,
            miners: self.miners.iter().map(Miner::fresh).collect(),
        }
    }

    /// Runs one simulation per seed and collects every run's final ledgers.
    ///
    /// With the `rayon` feature, runs execute in parallel. Outputs are always
    /// aggregated in seed order.
    pub fn run_all(self) -> ResultsBuilder {
        let start = Instant::now();
        info!(
            runs = self.seeds.len(),
            miners = self.miners.len(),
            residual_share = self.power_dist().residual(),
            height = self.chain.height(),
            supply = self.chain.supply(),
            "starting simulation group"
        );

        let sims: Vec<_> =
            self.seeds.iter().map(|&seed| self.simulation(seed)).collect();

        #[cfg(feature = "rayon")]
        let outputs: Vec<_> =
            sims.into_par_iter().map(Simulation::run).collect();
        #[cfg(not(feature = "rayon"))]
        let outputs: Vec<_> = sims.into_iter().map(Simulation::run).collect();

        info!(
            runs = outputs.len(),
            elapsed_secs = start.elapsed().as_secs_f64(),
            "simulation group finished"
        );

        ResultsBuilder::new(&self.miners, outputs)
    }
}

/// A single run of the emission lottery under one seed.
///
/// # Details
/// Blocks are mined until a block carrying the curve's floor reward has been
/// mined. The first check is made against a virtual block whose reward is
/// the base reward at zero supply, so at least one block is always mined.
#[derive(Debug, Clone)]
pub struct Simulation {
    seed: u64,
    chain: ChainState,
    curve: RewardCurve,
    miners: Vec<Miner>,
}

/// Contains the output data from a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutput {
    pub seed: u64,
    /// Miners with their final ledgers, in lottery order.
    pub miners: Vec<Miner>,
    pub blocks_mined: u64,
    /// Blocks won by the untracked rest of the network.
    pub residual_blocks: u64,
    /// Total reward of all blocks mined during the run.
    pub total_minted: Atomic,
    pub final_height: Height,
    pub final_supply: Atomic,
    /// Reward of the block which ended the run.
    pub last_reward: Atomic,
}

impl SimulationOutput {
    /// Total reward credited to tracked miners.
    pub fn credited_rewards(&self) -> Atomic {
        self.miners.iter().map(Miner::rewards).sum()
    }

    /// Total number of blocks won by tracked miners.
    pub fn credited_blocks(&self) -> u64 {
        self.miners.iter().map(Miner::blocks).sum()
    }
}

impl Simulation {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Executes the configured simulation.
    pub fn run(self) -> SimulationOutput {
        let Simulation { seed, mut chain, curve, mut miners } = self;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut blocks_mined = 0;
        let mut residual_blocks = 0;
        let mut total_minted: Atomic = 0;

        let mut last = Block::sentinel(&curve);
        while !curve.is_tail(last.reward) {
            last =
                lottery::mine_block(&mut chain, &mut miners, &curve, &mut rng);

            blocks_mined += 1;
            total_minted += last.reward;
            if last.is_residual() {
                residual_blocks += 1;
            }
        }

        debug!(
            seed,
            blocks_mined,
            residual_blocks,
            final_height = chain.height(),
            "simulation finished"
        );

        SimulationOutput {
            seed,
            miners,
            blocks_mined,
            residual_blocks,
            total_minted,
            final_height: chain.height(),
            final_supply: chain.supply(),
            last_reward: last.reward,
        }
    }
}
