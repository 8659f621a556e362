use super::growth::future_price;
use super::rng::{Rng, derive_seed};
use super::stats::{mean, percentile};
use super::types::{
    AccumulationInput, AccumulationResult, EngineError, MonteCarloParams, MonteCarloResult,
    PercentileBand, PercentileSummary, VolatilityDecay, YearlyProjectionPoint,
};

/// Randomized prices are clamped here so log-normal noise can never produce
/// a non-positive price.
const PRICE_FLOOR_USD: f64 = 0.01;

/// Floor for auto-decayed volatility. A starting volatility below the floor
/// is left untouched rather than inflated up to it.
const MIN_VOLATILITY: f64 = 0.25;

pub(crate) const MAX_HORIZON_YEARS: u32 = 120;

/// Deterministic year-by-year DCA projection along the configured growth
/// model's price path.
pub fn project(input: &AccumulationInput) -> Result<AccumulationResult, EngineError> {
    validate_accumulation_input(input)?;
    let prices = deterministic_price_path(input)?;
    Ok(accumulate_along_path(input, &prices))
}

/// Monte Carlo variant of [`project`]: `simulations` randomized price paths
/// (log-normal noise around the deterministic path, optional volatility
/// decay), aggregated into per-year percentile bands.
pub fn run_accumulation_monte_carlo(
    input: &AccumulationInput,
    params: &MonteCarloParams,
) -> Result<MonteCarloResult, EngineError> {
    validate_accumulation_input(input)?;
    validate_monte_carlo_params(params)?;

    let expected = deterministic_price_path(input)?;
    let period_count = expected.len().max(1);

    let mut values_by_year: Vec<Vec<f64>> = (0..period_count)
        .map(|_| Vec::with_capacity(params.simulations as usize))
        .collect();
    let mut final_balances = Vec::with_capacity(params.simulations as usize);

    let mut randomized = Vec::with_capacity(expected.len());
    for scenario_id in 0..params.simulations {
        let mut rng = Rng::new(derive_seed(params.seed, scenario_id));
        randomized.clear();
        randomize_price_path(&expected, params, &mut rng, &mut randomized);

        let result = accumulate_along_path(input, &randomized);
        for (year_idx, point) in result.yearly_points.iter().enumerate() {
            values_by_year[year_idx].push(point.portfolio_value_usd);
        }
        final_balances.push(result.final_balance);
    }

    let first_period = if expected.is_empty() { 0 } else { 1 };
    let yearly_bands = values_by_year
        .iter_mut()
        .enumerate()
        .map(|(idx, samples)| PercentileBand {
            period: first_period + idx as u32,
            p10: percentile(samples, 10.0),
            p50: percentile(samples, 50.0),
            p90: percentile(samples, 90.0),
            mean: mean(samples),
        })
        .collect::<Vec<_>>();

    let final_values = &mut values_by_year[period_count - 1];
    let final_value = PercentileSummary {
        p10: percentile(final_values, 10.0),
        p50: percentile(final_values, 50.0),
        p90: percentile(final_values, 90.0),
    };
    let final_balance = PercentileSummary {
        p10: percentile(&mut final_balances, 10.0),
        p50: percentile(&mut final_balances, 50.0),
        p90: percentile(&mut final_balances, 90.0),
    };

    Ok(MonteCarloResult {
        yearly_bands,
        final_value,
        final_balance,
    })
}

fn validate_accumulation_input(input: &AccumulationInput) -> Result<(), EngineError> {
    if !input.starting_price.is_finite() || input.starting_price <= 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "starting price must be > 0, got {}",
            input.starting_price
        )));
    }
    if !input.starting_balance.is_finite() || input.starting_balance < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "starting balance must be >= 0, got {}",
            input.starting_balance
        )));
    }
    if !input.contribution_amount.is_finite() || input.contribution_amount < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "contribution amount must be >= 0, got {}",
            input.contribution_amount
        )));
    }
    if input.yield_enabled && (!input.yield_rate.is_finite() || input.yield_rate <= -1.0) {
        return Err(EngineError::InvalidInput(format!(
            "yield rate must be > -100%, got {}",
            input.yield_rate
        )));
    }
    if input.years > MAX_HORIZON_YEARS {
        return Err(EngineError::InvalidInput(format!(
            "horizon must be at most {MAX_HORIZON_YEARS} years, got {}",
            input.years
        )));
    }
    Ok(())
}

fn validate_monte_carlo_params(params: &MonteCarloParams) -> Result<(), EngineError> {
    if !params.volatility.is_finite() || params.volatility < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "volatility must be >= 0, got {}",
            params.volatility
        )));
    }
    if params.simulations == 0 {
        return Err(EngineError::InvalidInput(
            "simulation count must be > 0".to_string(),
        ));
    }
    Ok(())
}

/// Expected end-of-year prices for years `1..=years`. Every year is anchored
/// to the initial price, not the previous year's output, so model error does
/// not compound through the stepping.
fn deterministic_price_path(input: &AccumulationInput) -> Result<Vec<f64>, EngineError> {
    let mut prices = Vec::with_capacity(input.years as usize);
    for year in 1..=input.years {
        prices.push(future_price(
            input.starting_price,
            year as f64,
            &input.growth_model,
        )?);
    }
    Ok(prices)
}

/// Multiplicative log-normal perturbation of the expected path. The
/// `-vol²/2` term keeps the expected value of each perturbed price at the
/// deterministic price.
fn randomize_price_path(
    expected: &[f64],
    params: &MonteCarloParams,
    rng: &mut Rng,
    out: &mut Vec<f64>,
) {
    let floor = MIN_VOLATILITY.min(params.volatility);
    let mut vol = params.volatility;
    for (year_idx, &expected_price) in expected.iter().enumerate() {
        let z = rng.standard_normal();
        let noise = (vol * z - 0.5 * vol * vol).exp();
        out.push((expected_price * noise).max(PRICE_FLOOR_USD));
        if params.decay == VolatilityDecay::Auto {
            vol = next_volatility(vol, year_idx as u32 + 1, floor);
        }
    }
}

/// Volatility decays in the same 5-year blocks as the CAGR schedule, with
/// its own constants, modeling price swings calming as the asset matures.
fn next_volatility(vol: f64, year: u32, floor: f64) -> f64 {
    let decay = match year {
        0..=5 => 0.05,
        6..=10 => 0.04,
        11..=15 => 0.03,
        16..=20 => 0.02,
        21..=25 => 0.01,
        _ => 0.005,
    };
    (vol * (1.0 - decay)).max(floor)
}

/// DCA accumulation against a prepared end-of-year price path. An empty path
/// (zero-year horizon, "spend now" mode) yields a single current-state point
/// so callers never see an empty series.
fn accumulate_along_path(input: &AccumulationInput, prices: &[f64]) -> AccumulationResult {
    if prices.is_empty() {
        let value = input.starting_balance * input.starting_price;
        let point = YearlyProjectionPoint {
            year: 0,
            asset_balance: input.starting_balance,
            asset_price: input.starting_price,
            portfolio_value_usd: value,
            total_invested_usd: 0.0,
            gain_usd: 0.0,
        };
        return AccumulationResult {
            yearly_points: vec![point],
            final_balance: input.starting_balance,
            final_price: input.starting_price,
            final_value_usd: value,
            total_invested_usd: 0.0,
            total_gain_usd: 0.0,
        };
    }

    let annual_contribution = input.contribution_amount * input.frequency.contributions_per_year();
    let mut balance = input.starting_balance;
    let mut total_invested = 0.0;
    let mut prev_price = input.starting_price;
    let mut points = Vec::with_capacity(prices.len());

    for (year_idx, &end_price) in prices.iter().enumerate() {
        // Contributions are assumed to fill at the year's average price.
        let avg_price = (prev_price + end_price) / 2.0;
        balance += annual_contribution / avg_price;
        if input.yield_enabled {
            balance *= 1.0 + input.yield_rate;
        }
        total_invested += annual_contribution;

        let value = balance * end_price;
        points.push(YearlyProjectionPoint {
            year: year_idx as u32 + 1,
            asset_balance: balance,
            asset_price: end_price,
            portfolio_value_usd: value,
            total_invested_usd: total_invested,
            gain_usd: value - total_invested,
        });
        prev_price = end_price;
    }

    let final_value = balance * prev_price;
    AccumulationResult {
        final_balance: balance,
        final_price: prev_price,
        final_value_usd: final_value,
        total_invested_usd: total_invested,
        total_gain_usd: final_value - total_invested,
        yearly_points: points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{CagrDecay, ContributionFrequency, GrowthModel, VolatilityDecay};
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_input() -> AccumulationInput {
        AccumulationInput {
            starting_balance: 0.0,
            starting_price: 100.0,
            years: 10,
            contribution_amount: 100.0,
            frequency: ContributionFrequency::Monthly,
            growth_model: GrowthModel::Cagr {
                rate: 0.25,
                decay: CagrDecay::None,
            },
            yield_enabled: false,
            yield_rate: 0.0,
        }
    }

    fn sample_mc_params() -> MonteCarloParams {
        MonteCarloParams {
            volatility: 0.6,
            decay: VolatilityDecay::None,
            simulations: 50,
            seed: 42,
        }
    }

    #[test]
    fn flat_price_dca_buys_contributions_over_price() {
        let mut input = sample_input();
        input.years = 1;
        input.growth_model = GrowthModel::Cagr {
            rate: 0.0,
            decay: CagrDecay::None,
        };

        let result = project(&input).unwrap();
        assert_approx(result.final_balance, 12.0);
        assert_approx(result.total_invested_usd, 1_200.0);
        assert_approx(result.final_value_usd, 1_200.0);
        assert_approx(result.total_gain_usd, 0.0);
    }

    #[test]
    fn contributions_fill_at_the_average_of_start_and_end_price() {
        let mut input = sample_input();
        input.years = 1;
        input.contribution_amount = 1_500.0;
        input.frequency = ContributionFrequency::Yearly;
        input.growth_model = GrowthModel::Cagr {
            rate: 1.0,
            decay: CagrDecay::None,
        };

        // Start $100, end $200, so fills execute at $150.
        let result = project(&input).unwrap();
        assert_approx(result.final_balance, 10.0);
        assert_approx(result.final_price, 200.0);
        assert_approx(result.final_value_usd, 2_000.0);
        assert_approx(result.total_gain_usd, 500.0);
    }

    #[test]
    fn yield_compounds_the_balance_once_per_year() {
        let mut input = sample_input();
        input.years = 1;
        input.starting_balance = 10.0;
        input.contribution_amount = 0.0;
        input.growth_model = GrowthModel::Cagr {
            rate: 0.0,
            decay: CagrDecay::None,
        };
        input.yield_enabled = true;
        input.yield_rate = 0.10;

        let result = project(&input).unwrap();
        assert_approx(result.final_balance, 11.0);
    }

    #[test]
    fn zero_year_horizon_yields_a_single_current_state_point() {
        let mut input = sample_input();
        input.years = 0;
        input.starting_balance = 3.0;

        let result = project(&input).unwrap();
        assert_eq!(result.yearly_points.len(), 1);
        let point = &result.yearly_points[0];
        assert_eq!(point.year, 0);
        assert_approx(point.asset_balance, 3.0);
        assert_approx(point.asset_price, 100.0);
        assert_approx(point.portfolio_value_usd, 300.0);
        assert_approx(point.total_invested_usd, 0.0);
        assert_approx(result.final_value_usd, 300.0);
    }

    #[test]
    fn yearly_points_are_strictly_ordered_and_value_consistent() {
        let result = project(&sample_input()).unwrap();
        assert_eq!(result.yearly_points.len(), 10);
        for (idx, point) in result.yearly_points.iter().enumerate() {
            assert_eq!(point.year, idx as u32 + 1);
            assert_approx(
                point.portfolio_value_usd,
                point.asset_balance * point.asset_price,
            );
            assert_approx(point.gain_usd, point.portfolio_value_usd - point.total_invested_usd);
        }
    }

    #[test]
    fn project_rejects_invalid_inputs() {
        let mut zero_price = sample_input();
        zero_price.starting_price = 0.0;
        assert!(matches!(
            project(&zero_price),
            Err(EngineError::InvalidInput(_))
        ));

        let mut negative_balance = sample_input();
        negative_balance.starting_balance = -1.0;
        assert!(matches!(
            project(&negative_balance),
            Err(EngineError::InvalidInput(_))
        ));

        let mut negative_contribution = sample_input();
        negative_contribution.contribution_amount = -5.0;
        assert!(matches!(
            project(&negative_contribution),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn monte_carlo_rejects_zero_simulations() {
        let mut params = sample_mc_params();
        params.simulations = 0;
        assert!(matches!(
            run_accumulation_monte_carlo(&sample_input(), &params),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn monte_carlo_is_deterministic_for_a_fixed_seed() {
        let input = sample_input();
        let params = sample_mc_params();
        let a = run_accumulation_monte_carlo(&input, &params).unwrap();
        let b = run_accumulation_monte_carlo(&input, &params).unwrap();
        for (x, y) in a.yearly_bands.iter().zip(&b.yearly_bands) {
            assert_eq!(x.p50.to_bits(), y.p50.to_bits());
            assert_eq!(x.mean.to_bits(), y.mean.to_bits());
        }
    }

    #[test]
    fn monte_carlo_with_zero_volatility_matches_deterministic_projection() {
        let input = sample_input();
        let mut params = sample_mc_params();
        params.volatility = 0.0;
        params.simulations = 5;

        let deterministic = project(&input).unwrap();
        let mc = run_accumulation_monte_carlo(&input, &params).unwrap();
        for (band, point) in mc.yearly_bands.iter().zip(&deterministic.yearly_points) {
            assert_approx(band.p10, point.portfolio_value_usd);
            assert_approx(band.p50, point.portfolio_value_usd);
            assert_approx(band.p90, point.portfolio_value_usd);
        }
    }

    #[test]
    fn monte_carlo_zero_horizon_bands_collapse_to_current_value() {
        let mut input = sample_input();
        input.years = 0;
        input.starting_balance = 2.0;
        let mc = run_accumulation_monte_carlo(&input, &sample_mc_params()).unwrap();
        assert_eq!(mc.yearly_bands.len(), 1);
        assert_eq!(mc.yearly_bands[0].period, 0);
        assert_approx(mc.yearly_bands[0].p10, 200.0);
        assert_approx(mc.yearly_bands[0].p90, 200.0);
        assert_approx(mc.final_balance.p50, 2.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_band_percentiles_are_ordered(
            seed in 0u64..1_000_000,
            simulations in 2u32..40,
            years in 1u32..20,
            volatility_bp in 0u32..15_000
        ) {
            let mut input = sample_input();
            input.years = years;
            let params = MonteCarloParams {
                volatility: volatility_bp as f64 / 10_000.0,
                decay: VolatilityDecay::Auto,
                simulations,
                seed,
            };

            let mc = run_accumulation_monte_carlo(&input, &params).unwrap();
            prop_assert!(mc.yearly_bands.len() == years as usize);
            for band in &mc.yearly_bands {
                prop_assert!(band.p10 <= band.p50 + 1e-9);
                prop_assert!(band.p50 <= band.p90 + 1e-9);
            }
            prop_assert!(mc.final_value.p10 <= mc.final_value.p90 + 1e-9);
            prop_assert!(mc.final_balance.p10 <= mc.final_balance.p90 + 1e-9);
        }
    }

    #[test]
    fn log_normal_noise_preserves_the_mean() {
        // E[exp(vol·Z - vol²/2)] = 1, so the noisy path is centred on the
        // deterministic one.
        let vol = 0.5f64;
        let mut rng = Rng::new(99);
        let n = 10_000;
        let mut sum = 0.0;
        for _ in 0..n {
            sum += (vol * rng.standard_normal() - 0.5 * vol * vol).exp();
        }
        let sample_mean = sum / n as f64;
        assert!(
            (sample_mean - 1.0).abs() < 0.03,
            "sample mean {sample_mean}"
        );
    }

    #[test]
    fn volatility_decay_respects_the_floor() {
        let mut high = 0.9;
        for year in 1..=50 {
            high = next_volatility(high, year, MIN_VOLATILITY);
            assert!(high >= MIN_VOLATILITY - 1e-12);
        }

        // Just above the floor, one decay step lands exactly on it.
        let mut near_floor = 0.26;
        for year in 1..=10 {
            near_floor = next_volatility(near_floor, year, MIN_VOLATILITY);
        }
        assert_approx(near_floor, MIN_VOLATILITY);
    }

    #[test]
    fn volatility_below_the_floor_is_not_inflated() {
        let start = 0.10;
        let floor = MIN_VOLATILITY.min(start);
        let next = next_volatility(start, 1, floor);
        assert!(next <= start);
        assert!(next >= floor - 1e-12);
    }

    #[test]
    fn randomized_prices_never_drop_below_the_floor() {
        let expected = vec![0.02; 40];
        let params = MonteCarloParams {
            volatility: 3.0,
            decay: VolatilityDecay::None,
            simulations: 1,
            seed: 7,
        };
        let mut rng = Rng::new(derive_seed(params.seed, 0));
        let mut out = Vec::new();
        randomize_price_path(&expected, &params, &mut rng, &mut out);
        assert!(out.iter().all(|&p| p >= PRICE_FLOOR_USD));
    }
}
