/*!
Aggregating and presenting simulation result data

# Working with [`ResultsBuilder`]

Running a [`SimulationGroup`](crate::simulation::SimulationGroup) folds each
run's final ledgers into one [`StatsSet`] per miner and metric. The builder
then controls which statistics appear in the [`ResultsTable`] and how it is
formatted.

## Examples

```
use emission_sim::prelude::*;

let curve = RewardCurve::default();
let group = SimulationBuilder::new()
    .add_miner("A", 0.3)
    .add_miner("B", 0.003)
    .starting_supply(curve.supply_for_reward(coins(0.601)))
    .runs(5)
    .build()
    .unwrap();

let results = group
    .run_all()
    .network()              // Include network-wide block and reward counts
    .format(Format::CSV)    // Output results as CSV
    .build();

println!("{}", results);
```
*/

use std::fmt::Display;

use crate::{
    miner::Miner,
    power_dist::PowerValue,
    reward::to_coins,
    simulation::SimulationOutput,
    stats::{StatsSet, Summary},
};

/// Floating point precision of results tables.
pub const FLOAT_PRECISION_DIGITS: usize = 6;

/// Per-run samples of one tracked miner's ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct MinerStats {
    name: String,
    power: PowerValue,
    /// Blocks won in each run.
    pub blocks: StatsSet,
    /// Reward accrued in each run, in coins.
    pub reward: StatsSet,
}

impl MinerStats {
    pub fn new(miner: &Miner) -> Self {
        Self {
            name: miner.name().to_string(),
            power: miner.power(),
            blocks: StatsSet::new("blocks"),
            reward: StatsSet::new("reward"),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn power(&self) -> PowerValue {
        self.power
    }

    /// Adds one sample per metric from a miner's final ledger.
    pub fn accumulate(&mut self, miner: &Miner) {
        self.blocks.push(miner.blocks() as f64);
        self.reward.push(to_coins(miner.rewards()));
    }
}

/// Per-run samples of network-wide totals.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkStats {
    pub blocks_mined: StatsSet,
    /// Blocks won by the untracked rest of the network.
    pub residual_blocks: StatsSet,
    /// Reward minted by all blocks, in coins.
    pub minted: StatsSet,
}

impl NetworkStats {
    pub fn accumulate(&mut self, output: &SimulationOutput) {
        self.blocks_mined.push(output.blocks_mined as f64);
        self.residual_blocks.push(output.residual_blocks as f64);
        self.minted.push(to_coins(output.total_minted));
    }
}

impl Default for NetworkStats {
    fn default() -> Self {
        Self {
            blocks_mined: StatsSet::new("blocks mined"),
            residual_blocks: StatsSet::new("residual blocks"),
            minted: StatsSet::new("minted"),
        }
    }
}

/// Describes the appearance of a [`ResultsTable`] as given by its
/// [`Display`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// Comma-separated, without extra whitespace.
    CSV,
    /// Human-readable table.
    PrettyPrint,
    /// One `name: mean +/- error` line per metric, grouped by miner.
    #[default]
    Summary,
}

/// Builder for [`ResultsTable`]. Produced by running a
/// [`SimulationGroup`](crate::simulation::SimulationGroup).
#[derive(Debug, Clone)]
pub struct ResultsBuilder {
    data: Vec<SimulationOutput>,
    format: Format,
    miners: Vec<MinerStats>,
    network: NetworkStats,
    show_network: bool,
}

impl ResultsBuilder {
    /// Create a new [`ResultsBuilder`], adding one sample per metric from each
    /// simulation output, in order.
    pub(crate) fn new(miners: &[Miner], data: Vec<SimulationOutput>) -> Self {
        let mut miner_stats: Vec<_> =
            miners.iter().map(MinerStats::new).collect();
        let mut network = NetworkStats::default();

        for output in data.iter() {
            debug_assert_eq!(output.miners.len(), miner_stats.len());

            for (stats, miner) in miner_stats.iter_mut().zip(&output.miners) {
                stats.accumulate(miner);
            }
            network.accumulate(output);
        }

        Self {
            data,
            format: Format::default(),
            miners: miner_stats,
            network,
            show_network: false,
        }
    }

    /// Extract the raw [`SimulationOutput`] data from this [`ResultsBuilder`].
    /// Useful for running custom statistical analysis.
    ///
    /// # Ordering
    /// Outputs follow the order of the seeds given to
    /// [`SimulationBuilder`](crate::simulation::SimulationBuilder).
    pub fn data(self) -> Vec<SimulationOutput> {
        self.data
    }

    /// Statistics of each tracked miner, in lottery order.
    pub fn miner_stats(&self) -> &[MinerStats] {
        &self.miners
    }

    pub fn network_stats(&self) -> &NetworkStats {
        &self.network
    }

    /// Include network-wide statistics in the results table.
    pub fn network(mut self) -> Self {
        self.show_network = true;

        self
    }

    /// Specify the [`Format`] of the results table.
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;

        self
    }

    /// Create new [`ResultsTable`].
    pub fn build(self) -> ResultsTable {
        let ResultsBuilder { format, miners, network, show_network, .. } = self;

        ResultsTable {
            format,
            miners,
            network: show_network.then_some(network),
        }
    }
}

/// Formatted results from the completion of a
/// [`SimulationGroup`](crate::simulation::SimulationGroup). The results table
/// is given by the struct's [`Display`] implementation, as specified by
/// its [`Format`].
pub struct ResultsTable {
    format: Format,
    miners: Vec<MinerStats>,
    network: Option<NetworkStats>,
}

/// One line of a results table.
struct Row<'a> {
    participant: &'a str,
    power: Option<PowerValue>,
    stats: &'a StatsSet,
}

impl ResultsTable {
    const SEPARATOR_VERTICAL: char = '|';
    const SEPARATOR_HORIZONTAL: char = '-';
    const TITLES: [&'static str; 6] =
        ["Participant", "Power", "Metric", "Mean", "Error", "Runs"];
    const NETWORK: &'static str = "Network";

    pub fn format(&self) -> Format {
        self.format
    }

    fn rows(&self) -> Vec<Row<'_>> {
        let mut rows = vec![];

        for miner in self.miners.iter() {
            for stats in [&miner.blocks, &miner.reward] {
                rows.push(Row {
                    participant: miner.name(),
                    power: Some(miner.power()),
                    stats,
                });
            }
        }

        if let Some(network) = &self.network {
            let totals = [
                &network.blocks_mined,
                &network.residual_blocks,
                &network.minted,
            ];
            for stats in totals {
                rows.push(Row {
                    participant: Self::NETWORK,
                    power: None,
                    stats,
                });
            }
        }

        rows
    }

    fn cells(row: &Row<'_>) -> [String; 6] {
        let power = row
            .power
            .map(|p| format!("{:.1$}", p, FLOAT_PRECISION_DIGITS))
            .unwrap_or_default();
        let (mean, error, runs) = match row.stats.summary() {
            Some(Summary { mean, error, samples }) => (
                format!("{:.1$}", mean, FLOAT_PRECISION_DIGITS),
                format!("{:.1$}", error, FLOAT_PRECISION_DIGITS),
                samples.to_string(),
            ),
            None => ("no data".into(), "no data".into(), "0".into()),
        };

        [
            row.participant.to_string(),
            power,
            row.stats.name().to_string(),
            mean,
            error,
            runs,
        ]
    }
}

impl Display for ResultsTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.format {
            Format::Summary => {
                let mut lines = vec![];
                for miner in self.miners.iter() {
                    lines.push(format!("Pool {}", miner.name()));
                    lines.push(miner.blocks.to_string());
                    lines.push(miner.reward.to_string());
                }
                if let Some(network) = &self.network {
                    lines.push(Self::NETWORK.to_string());
                    lines.push(network.blocks_mined.to_string());
                    lines.push(network.residual_blocks.to_string());
                    lines.push(network.minted.to_string());
                }

                write!(f, "{}", lines.join("\n"))?;
            }
            Format::CSV => {
                write!(f, "{}", Self::TITLES.join(","))?;

                for row in self.rows().iter() {
                    writeln!(f)?;
                    write!(f, "{}", Self::cells(row).join(","))?;
                }
            }
            Format::PrettyPrint => {
                let rows: Vec<_> =
                    self.rows().iter().map(Self::cells).collect();

                let mut text_widths: Vec<_> =
                    Self::TITLES.iter().map(|title| title.len()).collect();
                for row in rows.iter() {
                    for (i, val) in row.iter().enumerate() {
                        text_widths[i] = text_widths[i].max(val.len());
                    }
                }

                for (i, title) in Self::TITLES.iter().enumerate() {
                    write!(
                        f,
                        " {:1$} {2}",
                        title,
                        text_widths[i],
                        Self::SEPARATOR_VERTICAL
                    )?;
                }
                writeln!(f)?;

                let total_width = text_widths.iter().map(|x| x + 3).sum();
                for _ in 0..total_width {
                    write!(f, "{}", Self::SEPARATOR_HORIZONTAL)?;
                }

                for row in rows.iter() {
                    writeln!(f)?;

                    for (i, val) in row.iter().enumerate() {
                        write!(
                            f,
                            " {:1$} {2}",
                            val,
                            text_widths[i],
                            Self::SEPARATOR_VERTICAL
                        )?;
                    }
                }
            }
        }

        Ok(())
    }
}
