use std::f64::consts::TAU;

use super::types::{InflationModel, InflationParams};

/// Compounded price-level multiplier after `years` years.
///
/// The cyclical model is walked year by year: compounding is path-dependent,
/// so the sinusoidal rate cannot be replaced by `(1 + average)^years`.
pub fn cumulative_inflation_factor(years: u32, params: &InflationParams) -> f64 {
    if !params.enabled {
        return 1.0;
    }

    match params.model {
        InflationModel::Linear { rate } => (1.0 + rate.max(0.0)).powi(years as i32),
        InflationModel::Cyclical {
            base_rate,
            amplitude,
            period_years,
        } => {
            let period = period_years.max(1.0);
            let mut factor = 1.0;
            for year in 1..=years {
                // No deflation is modeled; the floor is a 0% year.
                let rate = (base_rate + amplitude * (TAU * year as f64 / period).sin()).max(0.0);
                factor *= 1.0 + rate;
            }
            factor
        }
    }
}

/// Nominal future amount expressed in today's money.
pub fn to_present_value(nominal: f64, years: u32, params: &InflationParams) -> f64 {
    nominal / cumulative_inflation_factor(years, params)
}

/// Hard-asset purchasing-power multiplier. Deliberately separate from the
/// consumer-price factor: the two answer different display questions and are
/// never combined in one call.
pub fn debasement_factor(years: u32, rate: f64) -> f64 {
    (1.0 + rate.max(0.0)).powi(years as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn linear(rate: f64) -> InflationParams {
        InflationParams {
            enabled: true,
            model: InflationModel::Linear { rate },
        }
    }

    #[test]
    fn linear_factor_compounds_the_constant_rate() {
        assert_approx(cumulative_inflation_factor(0, &linear(0.03)), 1.0);
        assert_approx(cumulative_inflation_factor(1, &linear(0.03)), 1.03);
        assert_approx(cumulative_inflation_factor(10, &linear(0.03)), 1.03f64.powi(10));
    }

    #[test]
    fn present_value_divides_by_the_factor() {
        let params = linear(0.05);
        assert_approx(
            to_present_value(1_050.0, 1, &params),
            1_050.0 / 1.05,
        );
    }

    proptest! {
        #[test]
        fn prop_disabled_inflation_is_identity(
            nominal in 0u32..2_000_000_000,
            years in 0u32..120
        ) {
            let params = InflationParams {
                enabled: false,
                model: InflationModel::Linear { rate: 0.08 },
            };
            let nominal = nominal as f64 / 100.0;
            prop_assert!(to_present_value(nominal, years, &params) == nominal);
        }

        #[test]
        fn prop_factor_is_at_least_one(
            base_bp in 0u32..1_500,
            amplitude_bp in 0u32..1_500,
            period_tenths in 10u32..300,
            years in 0u32..80
        ) {
            let params = InflationParams {
                enabled: true,
                model: InflationModel::Cyclical {
                    base_rate: base_bp as f64 / 10_000.0,
                    amplitude: amplitude_bp as f64 / 10_000.0,
                    period_years: period_tenths as f64 / 10.0,
                },
            };
            prop_assert!(cumulative_inflation_factor(years, &params) >= 1.0 - 1e-12);
        }
    }

    #[test]
    fn cyclical_with_zero_amplitude_matches_linear() {
        let cyclical = InflationParams {
            enabled: true,
            model: InflationModel::Cyclical {
                base_rate: 0.04,
                amplitude: 0.0,
                period_years: 8.0,
            },
        };
        assert_approx(
            cumulative_inflation_factor(12, &cyclical),
            cumulative_inflation_factor(12, &linear(0.04)),
        );
    }

    #[test]
    fn cyclical_floors_each_year_at_zero() {
        // Amplitude far above base: the trough years clamp to 0% rather than
        // deflating, so the factor still exceeds the pure-base path would
        // suggest once the peak years are compounded in.
        let params = InflationParams {
            enabled: true,
            model: InflationModel::Cyclical {
                base_rate: 0.01,
                amplitude: 0.50,
                period_years: 4.0,
            },
        };
        let factor = cumulative_inflation_factor(4, &params);
        assert!(factor >= 1.0);
        // Year 3 sits at the sine trough (rate would be -49%); the floor
        // keeps the running product from ever shrinking.
        let through_trough = cumulative_inflation_factor(3, &params);
        assert!(factor >= through_trough);
    }

    #[test]
    fn debasement_compounds_separately() {
        assert_approx(debasement_factor(0, 0.07), 1.0);
        assert_approx(debasement_factor(20, 0.07), 1.07f64.powi(20));
    }
}
