/*!
The per-block lottery between tracked miners and the rest of the network

Each round draws a pivot uniformly from `[0, 1)` and walks the miners in their
given order, summing their hash power. The first miner whose running sum
reaches the pivot wins. If the pivot lies beyond the sum of all tracked shares,
the untracked rest of the network wins and no ledger is credited.
*/

use rand::Rng;
use tracing::trace;

use crate::{
    block::Block, blockchain::ChainState, miner::Miner,
    power_dist::PowerValue, reward::RewardCurve,
};

/// Returns the index of the winning share for the given pivot, or `None` if
/// the pivot falls in the residual share.
///
/// Ties (`running sum == pivot`) go to the share being evaluated, never to
/// the next one.
///
/// ```
/// use emission_sim::lottery::choose_winner;
///
/// assert_eq!(choose_winner([0.25, 0.25], 0.25), Some(0));
/// assert_eq!(choose_winner([0.25, 0.25], 0.3), Some(1));
/// assert_eq!(choose_winner([0.25, 0.25], 0.75), None);
/// ```
pub fn choose_winner<I>(powers: I, pivot: f64) -> Option<usize>
where
    I: IntoIterator<Item = PowerValue>,
{
    let mut cumulative = 0.0;

    for (i, power) in powers.into_iter().enumerate() {
        cumulative += power;
        if cumulative >= pivot {
            return Some(i);
        }
    }

    None
}

/// Mines one block on top of `chain`.
///
/// The block's reward is determined by the supply before the block. Chain
/// height and supply are advanced, and the winning miner (if any) is credited
/// with the block.
pub fn mine_block<R>(
    chain: &mut ChainState,
    miners: &mut [Miner],
    curve: &RewardCurve,
    rng: &mut R,
) -> Block
where
    R: Rng,
{
    let pivot: f64 = rng.gen();
    let winner = choose_winner(miners.iter().map(Miner::power), pivot);

    let reward = curve.reward(chain.supply());
    let height = chain.advance(reward);
    let block = Block::new(height, winner.map(|i| miners[i].id()), reward);

    if let Some(i) = winner {
        miners[i].credit(&block);
    }

    trace!(height, reward, miner = ?block.miner, "mined block");

    block
}
