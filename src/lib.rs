/*!
Monte Carlo simulator for block counts and rewards of mining pools under a
block reward emission that decays toward a fixed tail floor.

Each simulation run starts from a configured chain height and supply and
awards blocks by lottery between the tracked pools and the untracked rest of
the network, until the reward reaches the tail emission. Runs are repeated
once per seed, and each pool's block count and accrued reward are summarized
across runs.

```
use emission_sim::prelude::*;

let curve = RewardCurve::default();
let results = SimulationBuilder::new()
    .add_miner("A", 0.3)
    .add_miner("B", 0.003)
    .starting_height(2_082_536)
    .starting_supply(curve.supply_for_reward(coins(0.601)))
    .curve(curve)
    .runs(10)
    .build()
    .unwrap()
    .run_all();

let a = &results.miner_stats()[0];
assert_eq!(a.blocks.len(), 10);
println!("{}", results.build());
```
*/

pub mod block;
pub mod blockchain;
pub mod lottery;
pub mod miner;
pub mod power_dist;
pub mod prelude;
pub mod results;
pub mod reward;
pub mod simulation;
pub mod stats;
