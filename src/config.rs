//! Measurement protocol of the benchmark run.
//!
//! Defaults reproduce the original protocol: 5 warm-up and 20 measurement
//! iterations of one second each, 3 forks, average time in nanoseconds.
//! Criterion picks the report unit from the magnitude of the estimate, which
//! for these call sites is nanoseconds.

use std::{env, str::FromStr, time::Duration};
use tracing::warn;

pub const WARMUP_SECS_VAR: &str = "INVOKEBENCH_WARMUP_SECS";
pub const MEASUREMENT_SECS_VAR: &str = "INVOKEBENCH_MEASUREMENT_SECS";
pub const SAMPLE_SIZE_VAR: &str = "INVOKEBENCH_SAMPLE_SIZE";
pub const FORKS_VAR: &str = "INVOKEBENCH_FORKS";

/// What a sample measures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Mean time of one call, every sample running the same iteration count.
    #[default]
    AverageTime,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    pub mode: Mode,
    pub warmup_iterations: u32,
    pub warmup_time: Duration,
    pub measurement_iterations: u32,
    pub measurement_time: Duration,
    pub forks: u32,
    /// Samples collected per benchmark; criterion requires at least 10.
    pub sample_size: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            mode: Mode::AverageTime,
            warmup_iterations: 5,
            warmup_time: Duration::from_secs(1),
            measurement_iterations: 20,
            measurement_time: Duration::from_secs(1),
            forks: 3,
            sample_size: 100,
        }
    }
}

impl HarnessConfig {
    /// Defaults overridden by the `INVOKEBENCH_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    ///
    /// Unparsable or out-of-range values are ignored with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(secs) = parse::<u64>(&lookup, WARMUP_SECS_VAR) {
            cfg.warmup_time = Duration::from_secs(secs);
        }

        if let Some(secs) = parse::<u64>(&lookup, MEASUREMENT_SECS_VAR) {
            cfg.measurement_time = Duration::from_secs(secs);
        }

        if let Some(n) = parse::<usize>(&lookup, SAMPLE_SIZE_VAR) {
            if n >= 10 {
                cfg.sample_size = n;
            } else {
                warn!(var = SAMPLE_SIZE_VAR, value = n, "sample size below 10, ignored");
            }
        }

        if let Some(n) = parse::<u32>(&lookup, FORKS_VAR) {
            cfg.forks = n;
        }

        cfg
    }

    /// Total warm-up time per benchmark.
    pub fn total_warmup(&self) -> Duration {
        self.warmup_time * self.warmup_iterations
    }

    /// Total measurement time per benchmark.
    pub fn total_measurement(&self) -> Duration {
        self.measurement_time * self.measurement_iterations
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Option<T> {
    let raw = lookup(var)?;

    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var, value = %raw, "invalid value, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| vars.get(k).cloned()
    }

    #[test]
    fn defaults_match_protocol() {
        let cfg = HarnessConfig::default();
        assert_eq!(cfg.total_warmup(), Duration::from_secs(5));
        assert_eq!(cfg.total_measurement(), Duration::from_secs(20));
        assert_eq!(cfg.forks, 3);
        assert_eq!(cfg.mode, Mode::AverageTime);
    }

    #[test]
    fn overrides() {
        let cfg = HarnessConfig::from_lookup(lookup(&[
            (WARMUP_SECS_VAR, "2"),
            (MEASUREMENT_SECS_VAR, " 3 "),
            (SAMPLE_SIZE_VAR, "50"),
            (FORKS_VAR, "1"),
        ]));

        assert_eq!(cfg.total_warmup(), Duration::from_secs(10));
        assert_eq!(cfg.total_measurement(), Duration::from_secs(60));
        assert_eq!(cfg.sample_size, 50);
        assert_eq!(cfg.forks, 1);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let cfg = HarnessConfig::from_lookup(lookup(&[
            (WARMUP_SECS_VAR, "soon"),
            (SAMPLE_SIZE_VAR, "3"),
        ]));

        assert_eq!(cfg, HarnessConfig::default());
    }
}
