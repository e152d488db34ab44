use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trueskill_env::numerical::standard_normal_cdf_inv;
use trueskill_env::summary::print_ratings;
use trueskill_env::telemetry::{get_subscriber, init_subscriber};
use trueskill_env::{RatingEnvironment, RatingEnvironmentConfig};

const NUM_MATCHES: usize = 90;
const SEED: u64 = 7;

fn sample_normal(rng: &mut impl Rng, mu: f64, sigma: f64) -> f64 {
    mu + sigma * standard_normal_cdf_inv(rng.random_range(f64::EPSILON..1.))
}

/// Rates a series of random 1v1 matches between players with hidden true skills
fn main() {
    init_subscriber(get_subscriber("info".into(), std::io::stdout));

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        tracing::error!("Usage: {} [config_file]", args[0]);
        return;
    }
    let config = match args.get(1) {
        Some(file) => match RatingEnvironmentConfig::from_file(file) {
            Ok(config) => config,
            Err(err) => {
                tracing::error!("{:?}", err);
                return;
            }
        },
        None => RatingEnvironmentConfig::default(),
    };
    let beta = config.beta;
    let mut env = match RatingEnvironment::new(config) {
        Ok(env) => env,
        Err(err) => {
            tracing::error!("{}", err);
            return;
        }
    };

    let true_skills = [("Alice", 30.), ("Bob", 25.), ("Clara", 20.)];
    let handles: Vec<_> = true_skills
        .iter()
        .map(|&(name, _)| env.make_player(name).expect("Names are distinct"))
        .collect();

    // The simulated world uses its own draw threshold, unknown to the rating system
    let draw_threshold = 0.1 * beta;
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut last_report = None;
    for _ in 0..NUM_MATCHES {
        let i = rng.random_range(0..handles.len());
        let j = (i + rng.random_range(1..handles.len())) % handles.len();
        let perf_i = sample_normal(&mut rng, true_skills[i].1, beta);
        let perf_j = sample_normal(&mut rng, true_skills[j].1, beta);
        let ranks: [usize; 2] = if (perf_i - perf_j).abs() <= draw_threshold {
            [0, 0]
        } else if perf_i > perf_j {
            [0, 1]
        } else {
            [1, 0]
        };

        let teams = [vec![handles[i].clone()], vec![handles[j].clone()]];
        match env.rate(&teams, &ranks, true) {
            Ok(mut reports) => last_report = reports.pop(),
            Err(err) => tracing::error!("Failed to rate {} vs {}: {}", handles[i], handles[j], err),
        }
    }

    if let Some(report) = last_report {
        tracing::info!(
            "Last update: draw={}, eps={:.3}, c={:.3}, t={:.3}, v={:.3}, w={:.3}",
            report.is_draw,
            report.epsilon,
            report.c,
            report.t,
            report.v,
            report.w
        );
        for ((name, delta_mu), (_, sigma)) in report.delta_mu.iter().zip(&report.new_sigmas) {
            tracing::info!("  {}: delta_mu={:+.3}, sigma={:.3}", name, delta_mu, sigma);
        }
    }

    let dir = std::path::PathBuf::from("../data/output");
    std::fs::create_dir_all(&dir).expect("Could not create directory");
    print_ratings(&env, &dir);
}
