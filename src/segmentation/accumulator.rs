use crate::sample::Observation;

/// Running totals for one bucket
///
/// Folded by value: `absorb` returns a new accumulator, nothing is shared
/// or mutated in place.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BucketAccumulator {
    pub count: usize,
    pub successes: usize,
    pub growth_sum: f64,
    pub tdr_sum: f64,
    pub velocity_sum: f64,
    pub metric_sum: f64,
    pub metric_min: f64,
    pub metric_max: f64,
}

impl Default for BucketAccumulator {
    fn default() -> Self {
        Self {
            count: 0,
            successes: 0,
            growth_sum: 0.0,
            tdr_sum: 0.0,
            velocity_sum: 0.0,
            metric_sum: 0.0,
            metric_min: f64::INFINITY,
            metric_max: f64::NEG_INFINITY,
        }
    }
}

impl BucketAccumulator {
    pub fn absorb(self, obs: &Observation, metric: f64) -> Self {
        Self {
            count: self.count + 1,
            successes: self.successes + usize::from(obs.got_next_round),
            growth_sum: self.growth_sum + obs.funding_growth_rate,
            tdr_sum: self.tdr_sum + obs.tdr_change,
            velocity_sum: self.velocity_sum + obs.composite_velocity,
            metric_sum: self.metric_sum + metric,
            metric_min: self.metric_min.min(metric),
            metric_max: self.metric_max.max(metric),
        }
    }

    fn mean(&self, sum: f64) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            sum / self.count as f64
        }
    }

    pub fn mean_growth(&self) -> f64 {
        self.mean(self.growth_sum)
    }

    pub fn mean_tdr(&self) -> f64 {
        self.mean(self.tdr_sum)
    }

    pub fn mean_velocity(&self) -> f64 {
        self.mean(self.velocity_sum)
    }

    pub fn mean_metric(&self) -> f64 {
        self.mean(self.metric_sum)
    }

    pub fn success_rate(&self) -> f64 {
        self.mean(self.successes as f64)
    }

    /// (min, max) of the bucketing metric, zeros when empty
    pub fn metric_range(&self) -> (f64, f64) {
        if self.count == 0 {
            (0.0, 0.0)
        } else {
            (self.metric_min, self.metric_max)
        }
    }
}
