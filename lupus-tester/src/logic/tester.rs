use colored::Colorize;
use lupus_game::SessionConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::scenario::{ScenarioCtx, TestScenario};
use crate::util::{artifacts_dir, slugify, write_failure_artifacts};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

pub struct LogicTester {
    config: SessionConfig,
    verbose: bool,
    artifacts_base: Option<String>,
}

impl LogicTester {
    pub const fn new(config: SessionConfig, verbose: bool) -> Self {
        Self {
            config,
            verbose,
            artifacts_base: None,
        }
    }

    /// Write a session dump for every failed iteration under `base`.
    #[must_use]
    pub fn with_artifacts(mut self, base: impl Into<String>) -> Self {
        self.artifacts_base = Some(base.into());
        self
    }

    pub fn run_scenario(
        &self,
        scenario: &TestScenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::new();

        for &seed in seeds {
            if self.verbose {
                println!(
                    "🧪 Testing scenario: {} (seed: {})",
                    scenario.name.bright_white(),
                    seed
                );
            }

            results.push(self.run_single_scenario(scenario, seed, iterations));
        }

        results
    }

    fn run_single_scenario(
        &self,
        scenario: &TestScenario,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let (successes, failures, performance_data) =
            self.run_iterations(scenario, seed, iterations);

        let avg_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.name.to_string(),
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration: avg_duration,
            performance_data,
        }
    }

    fn run_iterations(
        &self,
        scenario: &TestScenario,
        seed: u64,
        iterations: usize,
    ) -> (usize, Vec<String>, Vec<Duration>) {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        for i in 0..iterations {
            let start_time = Instant::now();
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
            let mut ctx = ScenarioCtx::new(&self.config, iteration_seed, self.verbose);

            match scenario.run(&mut ctx) {
                Ok(()) => {
                    successes += 1;
                    let duration = start_time.elapsed();
                    performance_data.push(duration);

                    if self.verbose {
                        println!(
                            "  ✅ Iteration {}/{} passed ({duration:?}) turn:{} players:{}",
                            i + 1,
                            iterations,
                            ctx.session().turn(),
                            ctx.session().players().len()
                        );
                    }
                }
                Err(err) => {
                    let chain = format!("{err:#}");
                    failures.push(format!(
                        "Iteration {} (seed {}): {}",
                        i + 1,
                        iteration_seed,
                        chain
                    ));
                    self.record_failure(scenario, &ctx, &chain);

                    if self.verbose {
                        println!(
                            "  ❌ Iteration {}/{} failed: {}",
                            i + 1,
                            iterations,
                            chain.clone().red()
                        );
                    }
                }
            }
        }

        (successes, failures, performance_data)
    }

    fn record_failure(&self, scenario: &TestScenario, ctx: &ScenarioCtx, chain: &str) {
        let Some(base) = self.artifacts_base.as_deref() else {
            return;
        };
        let dir = artifacts_dir(base, &slugify(scenario.key), ctx.seed);
        if let Err(err) = write_failure_artifacts(Path::new(&dir), &ctx.snapshot(), chain) {
            log::warn!("could not write failure artifacts to {dir}: {err:#}");
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis: Vec<u128> = durations.iter().map(Duration::as_millis).collect();
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis_vec = Vec::<u128>::deserialize(deserializer)?;
        Ok(millis_vec
            .into_iter()
            .map(|m| Duration::from_millis(u64::try_from(m).unwrap_or(0)))
            .collect())
    }
}
