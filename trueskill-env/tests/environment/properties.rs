use crate::helpers::TestEnv;
use quickcheck_macros::quickcheck;
use trueskill_env::RatingEnvironmentConfig;

fn fixed_opponent_config() -> RatingEnvironmentConfig {
    RatingEnvironmentConfig {
        mu0: 25.,
        sigma0: 8.3,
        beta: 4.2,
        tau: 0.2,
        ..Default::default()
    }
}

#[quickcheck]
fn decisive_win_moves_means_apart(
    mu_w: i8,
    mu_l: i8,
    sig_w: u8,
    sig_l: u8,
    beta: u8,
    margin: u8,
) -> bool {
    let config = RatingEnvironmentConfig {
        beta: 1. + beta as f64 / 32.,
        ..Default::default()
    }
    .with_draw_margin(margin as f64 / 64.);
    let mut app = TestEnv::spawn(config);
    let winner = app
        .env
        .make_player_with("winner", mu_w as f64 / 32., 0.5 + sig_w as f64 / 32.)
        .unwrap();
    let loser = app
        .env
        .make_player_with("loser", mu_l as f64 / 32., 0.5 + sig_l as f64 / 32.)
        .unwrap();
    let (before_w, before_l) = (app.mu(&winner), app.mu(&loser));

    app.rate_solo(&[&loser, &winner], &[1, 0]);

    app.mu(&winner) > before_w && app.mu(&loser) < before_l
}

#[quickcheck]
fn symmetric_draw_keeps_means(mu: i16, sig: u8, margin: u8) -> bool {
    let config = RatingEnvironmentConfig::default().with_draw_margin(margin as f64 / 16.);
    let mut app = TestEnv::spawn(config);
    let (mu, sig) = (mu as f64 / 64., 0.5 + sig as f64 / 16.);
    let alice = app.env.make_player_with("alice", mu, sig).unwrap();
    let bob = app.env.make_player_with("bob", mu, sig).unwrap();

    app.rate_solo(&[&alice, &bob], &[0, 0]);

    app.mu(&alice) == mu && app.mu(&bob) == mu && app.sigma(&alice) == app.sigma(&bob)
}

#[test]
fn symmetric_draw_shrinks_both_sigmas() {
    let mut app = TestEnv::with_defaults();
    let [alice, bob] = app.players(["alice", "bob"]);

    app.rate_solo(&[&alice, &bob], &[0, 0]);

    assert_eq!(app.sigma(&alice), app.sigma(&bob));
    assert!(app.sigma(&alice) < 25. / 3.);
}

#[test]
fn sigma_never_grows_beyond_drift() {
    let config = fixed_opponent_config();
    let tau = config.tau;
    let mut app = TestEnv::spawn(config);
    let [alice, bob] = app.players(["alice", "bob"]);

    for round in 0..40 {
        let before = [app.sigma(&alice), app.sigma(&bob)];
        // alternate results so both players stay at similar skill
        let ranks: [usize; 2] = if round % 2 == 0 { [0, 1] } else { [1, 0] };
        app.rate_solo(&[&alice, &bob], &ranks);
        let after = [app.sigma(&alice), app.sigma(&bob)];

        for (b, a) in before.iter().zip(&after) {
            assert!(*a < b + tau, "sigma went from {} to {} in round {}", b, a, round);
        }
    }
}

#[test]
fn repeated_wins_converge() {
    let mut app = TestEnv::spawn(fixed_opponent_config());
    let [alice, bob] = app.players(["alice", "bob"]);

    let mut history = vec![(app.mu(&alice), app.sigma(&alice), app.mu(&bob))];
    for _ in 0..50 {
        app.rate_solo(&[&alice, &bob], &[0, 1]);
        history.push((app.mu(&alice), app.sigma(&alice), app.mu(&bob)));
    }

    let gains: Vec<f64> = history.windows(2).map(|w| w[1].0 - w[0].0).collect();
    assert!(gains.iter().all(|&gain| gain > 0.));
    // every extra win is less surprising than the one before
    assert!(gains.windows(2).all(|g| g[1] < g[0]));
    assert!(gains[49] < 0.01 * gains[0]);

    let &(alice_mu, alice_sigma, bob_mu) = history.last().unwrap();
    assert!(alice_mu < 40. && bob_mu > 10.);
    assert!(((alice_mu - 25.) - (25. - bob_mu)).abs() < 1e-9);

    let prev_sigma = history[49].1;
    assert!(alice_sigma > 3. && alice_sigma < prev_sigma);
    assert!(prev_sigma - alice_sigma < 0.02);
    assert_eq!(app.sigma(&alice), app.sigma(&bob));
}

#[test]
fn trust_changes_the_update_of_uncertain_players() {
    let mut ws = vec![];
    let mut shaky_sigmas = vec![];
    for trust in [0., 1.] {
        let mut app = TestEnv::spawn(RatingEnvironmentConfig::default().with_trust(trust));
        let shaky = app.env.make_player_with("shaky", 25., 25. / 3.).unwrap();
        let steady = app.env.make_player_with("steady", 25., 1.).unwrap();

        let reports = app
            .env
            .rate(&[vec![shaky.clone()], vec![steady]], &[0, 1], true)
            .unwrap();
        ws.push(reports[0].w);
        shaky_sigmas.push(app.sigma(&shaky));
    }

    assert!((ws[0] - ws[1]).abs() > 1e-3);
    // noisier performances say less about skill
    assert!(shaky_sigmas[1] > shaky_sigmas[0]);
}
