/*!
Re-export of common values and datatypes used for running and analyzing
simulations. Must be imported manually.

```
use emission_sim::prelude::*;
```
*/

use crate::{
    block, blockchain, lottery, miner, power_dist, results, reward, simulation,
    stats,
};

pub use block::{Block, Height};

pub use blockchain::ChainState;

pub use lottery::{choose_winner, mine_block};

pub use miner::{Miner, MinerId};

pub use power_dist::{PowerDistribution, PowerDistributionError, PowerValue};

pub use results::{
    Format, MinerStats, NetworkStats, ResultsBuilder, ResultsTable,
};

pub use reward::{
    coins, to_coins, Atomic, RewardCurve, ATOMIC_UNITS_PER_COIN, TAIL_EMISSION,
};

pub use simulation::{
    Simulation, SimulationBuildError, SimulationBuilder, SimulationGroup,
    SimulationOutput,
};

pub use stats::{StatsSet, Summary};
