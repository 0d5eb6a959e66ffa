//! End-to-end scenarios over full simulation groups.

use emission_sim::prelude::*;

const STARTING_HEIGHT: Height = 2_082_536;

/// Supply at which the reward is just above the tail floor.
fn supply_just_above_floor(curve: &RewardCurve) -> Atomic {
    curve.supply_for_reward(coins(0.61))
}

#[test]
fn two_pools_with_residual_share() {
    let curve = RewardCurve::default();
    let supply = supply_just_above_floor(&curve);
    let expected_blocks = curve.blocks_until_tail(supply).unwrap();

    let results = SimulationBuilder::new()
        .add_miner("A", 0.3)
        .add_miner("B", 0.003)
        .starting_height(STARTING_HEIGHT)
        .starting_supply(supply)
        .curve(curve)
        .runs(40)
        .build()
        .expect("valid simulation build")
        .run_all();

    let stats = results.miner_stats();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].name(), "A");
    assert_eq!(stats[0].blocks.len(), 40);
    assert_eq!(stats[1].reward.len(), 40);

    // Pool A should win roughly 30% of the blocks
    let a = stats[0].blocks.summary().unwrap();
    let share = a.mean / expected_blocks as f64;
    assert!((0.25..0.35).contains(&share), "share of A was {share}");

    for out in results.data() {
        // The number of blocks only depends on the curve, not the seed
        assert_eq!(out.blocks_mined, expected_blocks);
        assert_eq!(out.final_height, STARTING_HEIGHT + expected_blocks);
        assert_eq!(out.last_reward, TAIL_EMISSION);

        let credited = out.credited_blocks();
        assert_eq!(credited + out.residual_blocks, out.blocks_mined);
        if out.residual_blocks > 0 {
            assert!(credited < out.blocks_mined);
            assert!(out.credited_rewards() < out.total_minted);
        }
    }
}

#[test]
fn single_pool_with_whole_network() {
    let curve = RewardCurve::default();

    let results = SimulationBuilder::new()
        .add_miner("solo", 1.0)
        .starting_supply(supply_just_above_floor(&curve))
        .runs(5)
        .build()
        .expect("valid simulation build")
        .run_all();

    let solo = &results.miner_stats()[0];
    let network = results.network_stats();
    assert_eq!(solo.blocks.values(), network.blocks_mined.values());
    assert_eq!(solo.reward.values(), network.minted.values());
    assert!(network.residual_blocks.values().iter().all(|&x| x == 0.0));

    // Every run mines the same blocks, so there is no spread
    assert_eq!(solo.blocks.summary().unwrap().error, 0.0);
}

#[test]
fn whole_network_split_between_pools() {
    let curve = RewardCurve::default();

    let group = SimulationBuilder::new()
        .add_miner("A", 0.25)
        .add_miner("B", 0.25)
        .add_miner("C", 0.5)
        .starting_supply(supply_just_above_floor(&curve))
        .runs(20)
        .build()
        .expect("valid simulation build");
    assert!(group.power_dist().is_complete());

    let results = group.run_all();
    for out in results.clone().data() {
        assert_eq!(out.residual_blocks, 0);
        assert_eq!(out.credited_blocks(), out.blocks_mined);
        assert_eq!(out.credited_rewards(), out.total_minted);
    }

    let network = results.network_stats();
    assert!(network.residual_blocks.values().iter().all(|&x| x == 0.0));
}

#[test]
fn repeated_groups_are_reproducible() {
    let curve = RewardCurve::default();
    let run = || {
        SimulationBuilder::new()
            .add_miner("A", 0.3)
            .add_miner("B", 0.003)
            .starting_supply(supply_just_above_floor(&curve))
            .seeds([2, 4, 8])
            .build()
            .expect("valid simulation build")
            .run_all()
            .data()
    };

    assert_eq!(run(), run());
}

#[test]
fn first_block_already_at_floor() {
    let curve = RewardCurve::default();

    let out = SimulationBuilder::new()
        .add_miner("A", 0.5)
        .starting_supply(curve.supply_for_reward(TAIL_EMISSION))
        .build()
        .expect("valid simulation build")
        .simulation(1)
        .run();

    assert_eq!(out.blocks_mined, 1);
    assert_eq!(out.total_minted, TAIL_EMISSION);
}

#[test]
fn report_lists_every_pool() {
    let curve = RewardCurve::default();

    let table = SimulationBuilder::new()
        .add_miner("A", 0.3)
        .add_miner("B", 0.003)
        .starting_supply(supply_just_above_floor(&curve))
        .runs(3)
        .build()
        .expect("valid simulation build")
        .run_all()
        .build();

    let text = table.to_string();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "Pool A");
    assert!(lines[1].starts_with("blocks: "));
    assert!(lines[2].starts_with("reward: "));
    assert_eq!(lines[3], "Pool B");
}
