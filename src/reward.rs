//! Block reward emission which decays toward a fixed tail floor

/// Integer type used for all reward and supply amounts, in minimal
/// (atomic) units.
pub type Atomic = u64;

/// Number of atomic units in one coin.
pub const ATOMIC_UNITS_PER_COIN: f64 = 1e12;

/// Right shift applied to the remaining supply to get the base reward of the
/// next block.
pub const EMISSION_SPEED_FACTOR: u32 = 18;

/// Tail emission of the reference curve (0.6 coins).
pub const TAIL_EMISSION: Atomic = 600_000_000_000;

/// Converts a coin amount to atomic units, rounding half up.
///
/// ```
/// use emission_sim::reward::{coins, TAIL_EMISSION};
///
/// assert_eq!(coins(0.6), TAIL_EMISSION);
/// ```
#[inline]
pub fn coins(amount: f64) -> Atomic {
    (amount * ATOMIC_UNITS_PER_COIN + 0.5) as Atomic
}

/// Converts atomic units to coins.
#[inline]
pub fn to_coins(amount: Atomic) -> f64 {
    amount as f64 / ATOMIC_UNITS_PER_COIN
}

/// Maps the cumulative supply of the chain to the reward of the next block.
///
/// The base reward is `(ceiling - supply) >> 18`, which shrinks as supply
/// approaches `ceiling` but never reaches it. Once the base reward falls below
/// `floor`, every block carries exactly `floor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RewardCurve {
    ceiling: Atomic,
    floor: Atomic,
}

impl RewardCurve {
    /// Creates a new [`RewardCurve`]. Parameters are checked when a
    /// simulation is built, not here.
    pub const fn new(ceiling: Atomic, floor: Atomic) -> Self {
        Self { ceiling, floor }
    }

    /// Creates the reference curve with a custom floor.
    pub const fn with_floor(floor: Atomic) -> Self {
        Self::new(Atomic::MAX, floor)
    }

    /// Supply value the base reward asymptotically approaches.
    pub fn ceiling(&self) -> Atomic {
        self.ceiling
    }

    /// Minimum reward of any block (tail emission).
    pub fn floor(&self) -> Atomic {
        self.floor
    }

    /// Reward given by the decay formula alone, without the floor.
    #[inline]
    pub fn base_reward(&self, supply: Atomic) -> Atomic {
        self.ceiling.saturating_sub(supply) >> EMISSION_SPEED_FACTOR
    }

    /// Reward of the block mined on top of a chain with the given supply.
    #[inline]
    pub fn reward(&self, supply: Atomic) -> Atomic {
        self.base_reward(supply).max(self.floor)
    }

    /// Reward of the virtual block which precedes the first block of every
    /// simulation run.
    #[inline]
    pub fn sentinel_reward(&self) -> Atomic {
        self.base_reward(0)
    }

    /// Returns true if a block carrying `reward` belongs to the tail emission
    /// era.
    #[inline]
    pub fn is_tail(&self, reward: Atomic) -> bool {
        reward <= self.floor
    }

    /// Returns the number of blocks mined on top of `supply` up to and
    /// including the first block which pays the floor reward, or `None` if the
    /// supply would overflow on the way.
    ///
    /// Rewards only depend on supply, so every simulation run starting from
    /// `supply` mines exactly this many blocks.
    pub fn blocks_until_tail(&self, mut supply: Atomic) -> Option<u64> {
        let mut blocks = 0;

        loop {
            let reward = self.reward(supply);
            supply = supply.checked_add(reward)?;
            blocks += 1;

            if self.is_tail(reward) {
                return Some(blocks);
            }
        }
    }

    /// Returns the supply at which the base reward equals `reward`, or 0 if no
    /// such supply exists.
    ///
    /// Useful for starting simulations at a chosen point on the curve.
    pub fn supply_for_reward(&self, reward: Atomic) -> Atomic {
        self.ceiling
            .saturating_sub(reward.saturating_mul(1 << EMISSION_SPEED_FACTOR))
    }
}

impl Default for RewardCurve {
    fn default() -> Self {
        Self::with_floor(TAIL_EMISSION)
    }
}
