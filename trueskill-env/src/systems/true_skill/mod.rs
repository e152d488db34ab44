mod normal;
mod team;
mod truncation;

use super::Player;
use crate::config::RatingEnvironmentConfig;
use crate::error::{NumericalInstability, RatingError, Result};
use itertools::Itertools;
use serde::Serialize;

pub use normal::{G_ZERO, Gaussian, MIN_SIGMA, MIN_VARIANCE};
pub use team::{performance_variance, team_performance};
pub use truncation::{
    TruncatedMoments, draw_moments, v_draw, v_win, w_draw, w_win, win_moments,
};

/// Forensic record of one comparison between two teams adjacent in the ranking.
#[derive(Clone, Debug, Serialize)]
pub struct EpUpdateReport {
    pub is_draw: bool,
    /// Draw margin divided by `c`.
    pub epsilon: f64,
    /// Standard deviation of the performance difference.
    pub c: f64,
    /// Mean performance difference divided by `c`.
    pub t: f64,
    pub v: f64,
    pub w: f64,
    /// The better-ranked team; for a draw, whichever of the two was listed first.
    pub winners: Vec<String>,
    pub losers: Vec<String>,
    pub delta_mu: Vec<(String, f64)>,
    pub new_sigmas: Vec<(String, f64)>,
    pub instability: Option<NumericalInstability>,
}

// Closed-form single-pass TrueSkill
#[derive(Clone, Debug)]
pub struct TrueSkill {
    // performance sigma
    pub beta: f64,
    // sigma growth per match
    pub tau: f64,
    // performance difference below which a match counts as a draw
    pub draw_margin: f64,
    // extra performance variance per unit of skill variance
    pub trust: f64,
}

impl Default for TrueSkill {
    fn default() -> Self {
        Self::from_config(&RatingEnvironmentConfig::default())
    }
}

struct Comparison {
    c: f64,
    t: f64,
    epsilon: f64,
    moments: TruncatedMoments,
    delta_mu: Vec<f64>,
}

/// Rejects match shapes that have no well-defined outcome.
pub fn check_match_shape<T>(teams: &[Vec<T>], ranks: &[usize]) -> Result<()> {
    if teams.len() != ranks.len() {
        return Err(RatingError::invalid_match(format!(
            "{} teams but {} ranks",
            teams.len(),
            ranks.len()
        )));
    }
    if teams.len() < 2 {
        return Err(RatingError::invalid_match(format!(
            "need at least 2 teams, got {}",
            teams.len()
        )));
    }
    if let Some(idx) = teams.iter().position(Vec::is_empty) {
        return Err(RatingError::invalid_match(format!("team {} is empty", idx)));
    }
    Ok(())
}

fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    assert_ne!(a, b);
    if a < b {
        let (lo, hi) = items.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}

impl TrueSkill {
    pub fn from_config(config: &RatingEnvironmentConfig) -> Self {
        Self {
            beta: config.beta,
            tau: config.tau,
            draw_margin: config.draw_margin(),
            trust: config.trust,
        }
    }

    /// Updates every participant in place and returns one report per adjacent pair of
    /// teams in rank order. The match must already have passed `check_match_shape`.
    pub fn round_update(
        &self,
        teams: &mut [Vec<&mut Player>],
        ranks: &[usize],
    ) -> Vec<EpUpdateReport> {
        debug_assert!(check_match_shape(teams, ranks).is_ok());

        // Skill drift since each player's previous match
        let mut skills: Vec<Vec<Gaussian>> = teams
            .iter()
            .map(|team| {
                team.iter()
                    .map(|player| player.skill().with_noise(self.tau))
                    .collect()
            })
            .collect();

        // A stable sort keeps tied teams in the order they were listed
        let order: Vec<usize> = (0..teams.len()).sorted_by_key(|&i| ranks[i]).collect();

        let mut reports = Vec::with_capacity(order.len() - 1);
        for (&a, &b) in order.iter().tuple_windows() {
            let is_draw = ranks[a] == ranks[b];
            let (winners, losers) = pair_mut(&mut skills, a, b);
            let comparison = self.compare(winners, losers, is_draw);

            tracing::debug!(
                "Team {} vs team {} (draw: {}): c={:.4} t={:.4} v={:.4} w={:.4}",
                a,
                b,
                is_draw,
                comparison.c,
                comparison.t,
                comparison.moments.v,
                comparison.moments.w,
            );
            if let Some(instability) = comparison.moments.instability {
                tracing::warn!("Clamped comparison of team {} vs team {}: {}", a, b, instability);
            }

            let names = |idx: usize| -> Vec<String> {
                teams[idx].iter().map(|p| p.name().to_owned()).collect()
            };
            let (winner_names, loser_names) = (names(a), names(b));
            let touched = winner_names.iter().chain(&loser_names);
            let new_sigmas = skills[a].iter().chain(&skills[b]).map(|skill| skill.sigma);

            reports.push(EpUpdateReport {
                is_draw,
                epsilon: comparison.epsilon,
                c: comparison.c,
                t: comparison.t,
                v: comparison.moments.v,
                w: comparison.moments.w,
                delta_mu: touched.clone().cloned().zip(comparison.delta_mu).collect(),
                new_sigmas: touched.cloned().zip(new_sigmas).collect(),
                winners: winner_names,
                losers: loser_names,
                instability: comparison.moments.instability,
            });
        }

        for (team, team_skills) in teams.iter_mut().zip(skills) {
            for (player, skill) in team.iter_mut().zip(team_skills) {
                player.update_rating(skill);
            }
        }
        reports
    }

    fn compare(&self, winners: &mut [Gaussian], losers: &mut [Gaussian], is_draw: bool) -> Comparison {
        let diff = team_performance(winners, self.beta, self.trust)
            - team_performance(losers, self.beta, self.trust);
        let c = diff.sigma;
        let t = diff.mu / c;
        let epsilon = self.draw_margin / c;
        let mut moments = if is_draw {
            draw_moments(t, epsilon)
        } else {
            win_moments(t, epsilon)
        };

        let signed = winners
            .iter()
            .map(|skill| (skill, 1.))
            .chain(losers.iter().map(|skill| (skill, -1.)));
        let updates: Vec<(f64, Option<Gaussian>)> = signed
            .map(|(skill, sign)| {
                let variance = skill.variance();
                let mean_delta = sign * variance / c * moments.v;
                let variance_multiplier = 1. - variance / (c * c) * moments.w;
                let posterior = variance_multiplier
                    .is_finite()
                    .then(|| skill.precision_update(mean_delta, variance_multiplier));
                (mean_delta, posterior)
            })
            .collect();

        // A comparison that cannot be evaluated in f64 leaves both teams as they were
        let finite = c.is_finite()
            && t.is_finite()
            && updates.iter().all(|(mean_delta, posterior)| {
                mean_delta.is_finite()
                    && posterior.is_some_and(|post| post.mu.is_finite() && post.sigma.is_finite())
            });
        if !finite {
            tracing::warn!("Skipping non-finite comparison: c={} t={}", c, t);
            moments.instability = Some(NumericalInstability::NonFinite);
            return Comparison {
                c,
                t,
                epsilon,
                moments,
                delta_mu: vec![0.; updates.len()],
            };
        }

        let delta_mu = winners
            .iter_mut()
            .chain(losers.iter_mut())
            .zip(updates)
            .map(|(skill, (mean_delta, posterior))| {
                *skill = posterior.unwrap_or(*skill);
                mean_delta
            })
            .collect();

        Comparison {
            c,
            t,
            epsilon,
            moments,
            delta_mu,
        }
    }
}
