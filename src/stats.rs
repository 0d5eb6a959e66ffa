/*!
Summary statistics over repeated simulation runs

A [`StatsSet`] collects one sample per run for a single metric and reports the
sample mean along with an error estimate.

# Error estimate

The reported error is the population standard deviation of the samples
divided by the number of samples `N`:

```text
error = sqrt(sum((x - mean)^2) / N) / N
```

This is **not** the textbook standard error of the mean, which divides by
`sqrt(N)` instead. The divisor `N` is kept so results stay comparable with
previously published numbers; multiply by `sqrt(N)` to recover `σ/√N`.
*/

use std::fmt::Display;

/// Mean and error of a non-empty [`StatsSet`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub error: f64,
    /// Number of samples the summary was computed from.
    pub samples: usize,
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} +/- {}", self.mean, self.error)
    }
}

/// Append-only collection of per-run samples of one metric.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsSet {
    name: String,
    values: Vec<f64>,
}

impl StatsSet {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self { name: name.into(), values: vec![] }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends one sample.
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Samples in the order they were added.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the sample mean, or `None` if no samples have been added.
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }

        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    /// Returns the mean and error of the samples, or `None` if no samples have
    /// been added. See the [module documentation](self) for the error formula.
    pub fn summary(&self) -> Option<Summary> {
        let mean = self.mean()?;
        let n = self.values.len() as f64;

        let varsum: f64 = self.values.iter().map(|x| (x - mean).powi(2)).sum();
        let error = (varsum / n).sqrt() / n;

        Some(Summary { mean, error, samples: self.values.len() })
    }
}

impl Extend<f64> for StatsSet {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        self.values.extend(iter);
    }
}

impl Display for StatsSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.summary() {
            Some(summary) => write!(f, "{}: {}", self.name, summary),
            None => write!(f, "{}: no data", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StatsSet;

    #[test]
    fn empty_set_has_no_summary() {
        let set = StatsSet::new("blocks");

        assert!(set.mean().is_none());
        assert!(set.summary().is_none());
        assert_eq!(set.to_string(), "blocks: no data");
    }

    #[test]
    fn known_summary() {
        let mut set = StatsSet::new("blocks");
        set.extend([1.0, 2.0, 3.0, 4.0]);

        let summary = set.summary().unwrap();
        assert_eq!(summary.samples, 4);
        assert_eq!(summary.mean, 2.5);
        // sqrt(5 / 4) / 4
        assert!((summary.error - 0.279_508_497_187_473_7).abs() < 1e-12);
    }

    #[test]
    fn single_sample_has_zero_error() {
        let mut set = StatsSet::new("reward");
        set.push(17.25);

        let summary = set.summary().unwrap();
        assert_eq!(summary.mean, 17.25);
        assert_eq!(summary.error, 0.0);
        assert_eq!(set.to_string(), "reward: 17.25 +/- 0");
    }

    #[test]
    fn constant_samples_are_distinct_from_no_data() {
        let mut set = StatsSet::new("blocks");
        set.extend([0.0; 3]);

        let summary = set.summary().unwrap();
        assert_eq!(summary.mean, 0.0);
        assert_eq!(summary.error, 0.0);
        assert_eq!(summary.samples, 3);
    }
}
