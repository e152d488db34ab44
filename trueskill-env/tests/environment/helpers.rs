use std::sync::LazyLock;
use trueskill_env::telemetry::{get_subscriber, init_subscriber};
use trueskill_env::{PlayerHandle, RatingEnvironment, RatingEnvironmentConfig};

// Ensure that the `tracing` stack is only initialised once
static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber(default_filter_level, std::io::stdout));
    } else {
        init_subscriber(get_subscriber(default_filter_level, std::io::sink));
    };
});

pub struct TestEnv {
    pub env: RatingEnvironment,
}

impl TestEnv {
    pub fn spawn(config: RatingEnvironmentConfig) -> Self {
        LazyLock::force(&TRACING);
        let env = RatingEnvironment::new(config).expect("Failed to build environment.");
        Self { env }
    }

    pub fn with_defaults() -> Self {
        Self::spawn(RatingEnvironmentConfig::default())
    }

    pub fn players<const N: usize>(&mut self, names: [&str; N]) -> [PlayerHandle; N] {
        names.map(|name| self.env.make_player(name).expect("Failed to make player."))
    }

    pub fn mu(&self, handle: &PlayerHandle) -> f64 {
        self.env.rating(handle).expect("Unknown player.").mu
    }

    pub fn sigma(&self, handle: &PlayerHandle) -> f64 {
        self.env.rating(handle).expect("Unknown player.").sig
    }

    /// Rates a match in which each team holds a single player.
    pub fn rate_solo(&mut self, players: &[&PlayerHandle], ranks: &[usize]) {
        let teams: Vec<Vec<PlayerHandle>> = players.iter().map(|&p| vec![p.clone()]).collect();
        self.env
            .rate(&teams, ranks, false)
            .expect("Failed to rate match.");
    }
}
