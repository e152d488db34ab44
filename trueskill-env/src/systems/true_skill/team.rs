use super::normal::{G_ZERO, Gaussian};

/// Variance of a single player's performance around their skill. With `trust > 0`,
/// uncertain players also perform less predictably.
pub fn performance_variance(skill: &Gaussian, beta: f64, trust: f64) -> f64 {
    beta * beta + trust * skill.variance()
}

/// Distribution of a team's total performance: each member's skill belief plus their
/// independent performance noise, summed over the team.
pub fn team_performance(members: &[Gaussian], beta: f64, trust: f64) -> Gaussian {
    members
        .iter()
        .map(|skill| skill.with_noise(performance_variance(skill, beta, trust).sqrt()))
        .fold(G_ZERO, Gaussian::combine_independent)
}
