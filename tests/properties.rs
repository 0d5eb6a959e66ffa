//! Property-based tests for the emission curve, the block lottery, and run
//! aggregation.

use emission_sim::prelude::*;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Starting supply a few thousand blocks before tail emission.
fn near_tail(curve: &RewardCurve) -> Atomic {
    curve.supply_for_reward(coins(0.603))
}

proptest! {
    #[test]
    fn reward_never_below_floor(supply in 0u64..u64::MAX) {
        let curve = RewardCurve::default();

        prop_assert!(curve.reward(supply) >= curve.floor());
    }

    #[test]
    fn reward_non_increasing(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let curve = RewardCurve::default();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        prop_assert!(curve.reward(low) >= curve.reward(high));
    }

    #[test]
    fn mine_block_advances_chain(
        height in 0u64..u64::MAX - 1,
        supply in 0u64..u64::MAX - TAIL_EMISSION,
        seed in any::<u64>()
    ) {
        let curve = RewardCurve::default();
        let group = SimulationBuilder::new()
            .add_miner("A", 0.3)
            .add_miner("B", 0.003)
            .starting_supply(near_tail(&curve))
            .build()
            .unwrap();
        let mut miners = group.miners().to_vec();
        let mut chain = ChainState::new(height, supply);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let block = mine_block(&mut chain, &mut miners, &curve, &mut rng);

        prop_assert_eq!(block.height, height + 1);
        prop_assert_eq!(chain.height(), height + 1);
        prop_assert_eq!(block.reward, curve.reward(supply));
        prop_assert_eq!(chain.supply(), supply + block.reward);

        let credited: u64 = miners.iter().map(Miner::blocks).sum();
        prop_assert_eq!(credited, u64::from(!block.is_residual()));
    }

    #[test]
    fn credited_rewards_bounded_by_minted(
        a in 0.01f64..0.5,
        b in 0.01f64..0.5,
        seed in any::<u64>()
    ) {
        let curve = RewardCurve::default();
        let group = SimulationBuilder::new()
            .add_miner("A", a)
            .add_miner("B", b)
            .starting_supply(near_tail(&curve))
            .build()
            .unwrap();

        let out = group.simulation(seed).run();

        prop_assert!(out.credited_rewards() <= out.total_minted);
        prop_assert_eq!(
            out.credited_blocks() + out.residual_blocks,
            out.blocks_mined
        );
        if out.residual_blocks == 0 {
            prop_assert_eq!(out.credited_rewards(), out.total_minted);
        }
    }

    #[test]
    fn identical_seeds_identical_ledgers(seed in any::<u64>()) {
        let curve = RewardCurve::default();
        let group = SimulationBuilder::new()
            .add_miner("A", 0.3)
            .add_miner("B", 0.003)
            .starting_supply(near_tail(&curve))
            .build()
            .unwrap();

        let first = group.simulation(seed).run();
        prop_assert_eq!(first, group.simulation(seed).run());
    }

    #[test]
    fn summary_ignores_sample_order(
        values in prop::collection::vec(-1e6f64..1e6, 1..200),
        rotation in 0usize..200
    ) {
        let mut forward = StatsSet::new("x");
        forward.extend(values.iter().copied());

        let mut permuted = values.clone();
        permuted.reverse();
        let len = permuted.len();
        permuted.rotate_left(rotation % len);
        let mut shuffled = StatsSet::new("x");
        shuffled.extend(permuted);

        let a = forward.summary().unwrap();
        let b = shuffled.summary().unwrap();
        prop_assert_eq!(a.samples, b.samples);
        prop_assert!((a.mean - b.mean).abs() <= 1e-6);
        prop_assert!((a.error - b.error).abs() <= 1e-6);
    }
}
