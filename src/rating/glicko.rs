use crate::config::settings::RatingSettings;

use super::types::{GlickoRating, Outcome};

// Glicko-2 internal scale factor (Glickman's constant).
const SCALE: f64 = 173.7178;
const BASE_RATING: f64 = 1500.0;

/// One-pass Glicko-2 update for a single decisive match.
///
/// Pure function of its inputs: identical arguments always produce
/// bit-identical results. Non-finite inputs are replaced with the configured
/// defaults before computing, so NaN never propagates into stored state.
pub fn update_rating(
    current: GlickoRating,
    opponent: GlickoRating,
    outcome: Outcome,
    settings: &RatingSettings,
) -> GlickoRating {
    let current = current.sanitized(settings);
    let opponent = opponent.sanitized(settings);
    let score = outcome.score();

    let mu = to_mu(current.rating);
    let phi = to_phi(current.deviation);
    let sigma = current.volatility;

    let mu_j = to_mu(opponent.rating);
    let phi_j = to_phi(opponent.deviation);

    let g = g_factor(phi_j);
    let expected = expected_score(mu, mu_j, g);

    // Estimated variance of the rating from this one result, and the
    // implied rating change.
    let v = 1.0 / (g * g * expected * (1.0 - expected));
    let delta_sum = g * (score - expected);
    let delta = v * delta_sum;

    let sigma_prime = solve_volatility(delta, phi, v, sigma, settings);

    let phi_star = (phi * phi + sigma_prime * sigma_prime).sqrt();
    let phi_prime = 1.0 / (1.0 / (phi_star * phi_star) + 1.0 / v).sqrt();
    let mu_prime = mu + phi_prime * phi_prime * delta_sum;

    let deviation = from_phi(phi_prime).clamp(settings.deviation_floor, settings.deviation_ceiling);

    GlickoRating {
        rating: from_mu(mu_prime),
        deviation,
        volatility: sigma_prime,
    }
}

fn to_mu(rating: f64) -> f64 {
    (rating - BASE_RATING) / SCALE
}

fn to_phi(deviation: f64) -> f64 {
    deviation / SCALE
}

fn from_mu(mu: f64) -> f64 {
    mu * SCALE + BASE_RATING
}

fn from_phi(phi: f64) -> f64 {
    phi * SCALE
}

fn g_factor(phi_j: f64) -> f64 {
    1.0 / (1.0 + 3.0 * phi_j * phi_j / (std::f64::consts::PI * std::f64::consts::PI)).sqrt()
}

fn expected_score(mu: f64, mu_j: f64, g: f64) -> f64 {
    1.0 / (1.0 + (-g * (mu - mu_j)).exp())
}

/// New volatility via regula falsi with the Illinois modification on
/// Glickman's convergence function, to the configured tolerance.
fn solve_volatility(
    delta: f64,
    phi: f64,
    v: f64,
    sigma: f64,
    settings: &RatingSettings,
) -> f64 {
    let a = (sigma * sigma).ln();
    let tau = settings.tau;
    let tolerance = settings.convergence_tolerance;

    let f = |x: f64| {
        let ex = x.exp();
        let phi2 = phi * phi;
        let num = ex * (delta * delta - phi2 - v - ex);
        let den = 2.0 * (phi2 + v + ex) * (phi2 + v + ex);
        num / den - (x - a) / (tau * tau)
    };

    let mut a_end = a;
    let mut b_end = if delta * delta > phi * phi + v {
        (delta * delta - phi * phi - v).ln()
    } else {
        let mut k = 1.0;
        while f(a - k * tau) < 0.0 {
            k += 1.0;
        }
        a - k * tau
    };

    let mut f_a = f(a_end);
    let mut f_b = f(b_end);

    let mut iterations = 0;
    while (b_end - a_end).abs() > tolerance && iterations < settings.max_iterations {
        let candidate = a_end + (a_end - b_end) * f_a / (f_b - f_a);
        let f_candidate = f(candidate);

        if f_candidate * f_b <= 0.0 {
            a_end = b_end;
            f_a = f_b;
        } else {
            // Illinois step: halve the retained endpoint's value so the
            // bracket keeps shrinking.
            f_a /= 2.0;
        }

        b_end = candidate;
        f_b = f_candidate;
        iterations += 1;
    }

    (a_end / 2.0).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> RatingSettings {
        RatingSettings::default()
    }

    fn default_rating() -> GlickoRating {
        GlickoRating::starter(&settings())
    }

    #[test]
    fn winner_gains_and_loser_drops_from_defaults() {
        let winner = update_rating(
            default_rating(),
            default_rating(),
            Outcome::Win,
            &settings(),
        );
        let loser = update_rating(
            default_rating(),
            default_rating(),
            Outcome::Loss,
            &settings(),
        );

        assert!(winner.rating > 1500.0);
        assert!(loser.rating < 1500.0);
    }

    #[test]
    fn deviation_shrinks_and_stays_clamped() {
        let updated = update_rating(
            default_rating(),
            default_rating(),
            Outcome::Win,
            &settings(),
        );

        assert!(updated.deviation < 350.0);
        assert!(updated.deviation >= 30.0);
        assert!(updated.deviation <= 350.0);
    }

    #[test]
    fn update_is_deterministic_bit_for_bit() {
        let current = GlickoRating::new(1621.4, 214.9, 0.059);
        let opponent = GlickoRating::new(1389.2, 77.3, 0.061);

        let first = update_rating(current, opponent, Outcome::Win, &settings());
        let second = update_rating(current, opponent, Outcome::Win, &settings());

        assert_eq!(first.rating.to_bits(), second.rating.to_bits());
        assert_eq!(first.deviation.to_bits(), second.deviation.to_bits());
        assert_eq!(first.volatility.to_bits(), second.volatility.to_bits());
    }

    #[test]
    fn non_finite_inputs_fall_back_to_defaults() {
        let corrupt = GlickoRating::new(f64::NAN, f64::INFINITY, f64::NAN);
        let updated = update_rating(corrupt, corrupt, Outcome::Win, &settings());

        assert!(updated.rating.is_finite());
        assert!(updated.deviation.is_finite());
        assert!(updated.volatility.is_finite());

        // Same result as starting from the documented defaults.
        let from_defaults = update_rating(
            default_rating(),
            default_rating(),
            Outcome::Win,
            &settings(),
        );
        assert_eq!(updated.rating.to_bits(), from_defaults.rating.to_bits());
    }

    #[test]
    fn upset_moves_rating_more_than_expected_win() {
        let favorite = GlickoRating::new(1700.0, 80.0, 0.06);
        let underdog = GlickoRating::new(1400.0, 80.0, 0.06);

        let upset_gain =
            update_rating(underdog, favorite, Outcome::Win, &settings()).rating - 1400.0;
        let expected_gain =
            update_rating(favorite, underdog, Outcome::Win, &settings()).rating - 1700.0;

        assert!(upset_gain > expected_gain);
    }

    #[test]
    fn volatility_stays_near_prior_for_unsurprising_result() {
        let updated = update_rating(
            default_rating(),
            default_rating(),
            Outcome::Win,
            &settings(),
        );
        assert!((updated.volatility - 0.06).abs() < 0.01);
    }
}
