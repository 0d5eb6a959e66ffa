//! Describing how hash power is split between tracked miners

/// Numeric type used to represent hash power shares.
pub type PowerValue = f64;

/// Ordered hash power shares of the tracked miners.
///
/// Shares do not need to sum to `1.0`. Whatever is left over belongs to the
/// rest of the network, which is never tracked (see
/// [`PowerDistribution::residual`]).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PowerDistribution(Vec<PowerValue>);

#[derive(Debug, thiserror::Error)]
pub enum PowerDistributionError {
    #[error("distribution values sum to {0}, which is greater than 1.0")]
    BadDistributionSum(PowerValue),
    #[error("power value {0} is not in the range (0.0, 1.0]")]
    BadPowerValue(PowerValue),
    #[error("cannot create a distribution for zero miners")]
    ZeroMinersGiven,
}

impl PowerDistribution {
    /// Allowable difference between a distribution sum and 1.0.
    pub const EPSILON_POWER: PowerValue = 1e-6;

    pub fn new(values: Vec<PowerValue>) -> Self {
        Self(values)
    }

    /// Returns true if every share is valid and the shares sum to at most 1.0.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Checks that each share lies in `(0.0, 1.0]` and that the shares do not
    /// sum to more than 1.0.
    pub fn validate(&self) -> Result<(), PowerDistributionError> {
        use PowerDistributionError::*;

        if self.0.is_empty() {
            return Err(ZeroMinersGiven);
        }

        if let Some(&val) = self
            .0
            .iter()
            .find(|&&x| x.is_nan() || x <= 0.0 || x > 1.0)
        {
            return Err(BadPowerValue(val));
        }

        let sum = self.total();
        if sum - 1.0 > Self::EPSILON_POWER {
            return Err(BadDistributionSum(sum));
        }

        Ok(())
    }

    /// Sum of all tracked shares.
    pub fn total(&self) -> PowerValue {
        self.0.iter().sum()
    }

    /// Probability that a block is won by the untracked rest of the network.
    pub fn residual(&self) -> PowerValue {
        (1.0 - self.total()).max(0.0)
    }

    /// Returns true if the tracked shares cover the whole network, in which
    /// case every block has a tracked winner.
    pub fn is_complete(&self) -> bool {
        self.residual() <= Self::EPSILON_POWER
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<PowerValue> for PowerDistribution {
    fn from_iter<T: IntoIterator<Item = PowerValue>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
