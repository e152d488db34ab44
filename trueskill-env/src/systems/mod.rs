mod common;
mod true_skill;

pub use common::{CONSERVATIVE_STDEVS, Player, PlayersByName, Rating};
pub use true_skill::{
    EpUpdateReport, G_ZERO, Gaussian, MIN_SIGMA, MIN_VARIANCE, TrueSkill,
    TruncatedMoments, check_match_shape, draw_moments, performance_variance, team_performance,
    v_draw, v_win, w_draw, w_win, win_moments,
};
