use anyhow::Result;
use lupus_game::{Session, SessionConfig};
use serde_json::json;

pub mod catalog;

/// Per-iteration context handed to a scenario script.
pub struct ScenarioCtx {
    pub seed: u64,
    pub verbose: bool,
    config: SessionConfig,
    session: Session,
}

impl ScenarioCtx {
    #[must_use]
    pub fn new(config: &SessionConfig, seed: u64, verbose: bool) -> Self {
        let config = config.clone().with_seed(seed);
        let session = Session::new(config.clone());
        Self {
            seed,
            verbose,
            config,
            session,
        }
    }

    /// The session under test.
    pub const fn session(&mut self) -> &mut Session {
        &mut self.session
    }

    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Session seeded like the current one, with `players` already added.
    pub fn session_with_players(&mut self, players: usize) -> &mut Session {
        self.session = Session::new(self.config.clone());
        for i in 0..players {
            self.session.add_player(&format!("Player {}", i + 1));
        }
        &mut self.session
    }

    /// JSON snapshot of the session, written alongside failure reports.
    #[must_use]
    pub fn snapshot(&self) -> serde_json::Value {
        let session = &self.session;
        let revealed: Vec<_> = session.visibility().iter().collect();
        json!({
            "seed": self.seed,
            "started": session.is_started(),
            "phase": session.phase(),
            "turn": session.turn(),
            "role_counts": session.role_counts(),
            "revealed": revealed,
            "players": session.players(),
            "notices": session.pending_notices(),
        })
    }
}

pub type ScenarioFn = fn(&mut ScenarioCtx) -> Result<()>;

#[derive(Clone)]
pub struct TestScenario {
    pub key: &'static str,
    pub name: &'static str,
    run: ScenarioFn,
}

impl TestScenario {
    #[must_use]
    pub const fn new(key: &'static str, name: &'static str, run: ScenarioFn) -> Self {
        Self { key, name, run }
    }

    /// Run the script once.
    ///
    /// # Errors
    ///
    /// Returns the first expectation the script found violated.
    pub fn run(&self, ctx: &mut ScenarioCtx) -> Result<()> {
        (self.run)(ctx)
    }
}

pub fn get_scenario(name: &str) -> Option<TestScenario> {
    let key = name.to_lowercase();
    catalog::catalog_scenarios()
        .into_iter()
        .find(|scenario| scenario.key == key || scenario.name.eq_ignore_ascii_case(&key))
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog::catalog_scenarios()
        .into_iter()
        .map(|scenario| (scenario.key, scenario.name))
        .collect()
}
