use crate::data_processing::try_write_slice_to_file;
use crate::environment::RatingEnvironment;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub rank: usize,
    pub display_rating: f64,
    pub cur_mu: f64,
    pub cur_sigma: f64,
    pub num_matches: usize,
    pub handle: String,
}

/// All players ordered by conservative rating, best first; ties broken by handle.
pub fn make_leaderboard(env: &RatingEnvironment) -> Vec<PlayerSummary> {
    let mut rating_data: Vec<PlayerSummary> = env
        .players()
        .map(|player| PlayerSummary {
            rank: 0,
            display_rating: player.approx_posterior.conservative(),
            cur_mu: player.mu(),
            cur_sigma: player.sigma(),
            num_matches: player.num_matches,
            handle: player.name().to_owned(),
        })
        .collect();
    rating_data.sort_by(|a, b| {
        b.display_rating
            .total_cmp(&a.display_rating)
            .then_with(|| a.handle.cmp(&b.handle))
    });
    for (idx, data) in rating_data.iter_mut().enumerate() {
        data.rank = idx + 1;
    }
    rating_data
}

pub fn print_ratings(env: &RatingEnvironment, dir: impl AsRef<std::path::Path>) {
    let rating_data = make_leaderboard(env);
    let mean_mu =
        rating_data.iter().map(|data| data.cur_mu).sum::<f64>() / rating_data.len().max(1) as f64;
    tracing::info!("Mean rating.mu = {}", mean_mu);
    for data in rating_data.iter().take(10) {
        tracing::info!(
            "{:3} {:>16} {:8.3} (mu {:7.3}, sigma {:6.3})",
            data.rank,
            data.handle,
            data.display_rating,
            data.cur_mu,
            data.cur_sigma
        );
    }

    let filename = dir.as_ref().join("all_players.csv");
    try_write_slice_to_file(&rating_data, &filename);
}
