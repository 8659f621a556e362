use super::rng::{Rng, derive_seed};
use super::stats::{mean, percentile};
use super::types::{DrawdownInput, DrawdownResult, EngineError, PercentileBand, SimulationPath};

/// Full trajectories kept for charting, per outcome class. Statistics always
/// reflect every simulated path; this only bounds what is stored.
const MAX_SAMPLE_PATHS: usize = 10;

/// Monthly decumulation simulation: inflation-escalating withdrawals against
/// a geometric-Brownian-motion price path, with permanent failure once the
/// balance is exhausted.
pub fn run_drawdown_monte_carlo(input: &DrawdownInput) -> Result<DrawdownResult, EngineError> {
    validate_drawdown_input(input)?;

    let months = (input.years * 12) as usize;
    let monthly_inflation = (1.0 + input.inflation_rate).powf(1.0 / 12.0) - 1.0;
    let monthly_growth = (1.0 + input.real_growth_rate).powf(1.0 / 12.0) - 1.0;
    let drift = monthly_inflation + monthly_growth;
    let monthly_vol = input.annual_volatility / 12f64.sqrt();

    let mut values_by_month: Vec<Vec<f64>> = (0..months)
        .map(|_| Vec::with_capacity(input.simulations as usize))
        .collect();
    let mut ending_values = Vec::new();
    let mut failure_months = Vec::new();
    let mut sample_failed = Vec::new();
    let mut sample_successful = Vec::new();

    // One set of reusable buffers: paths outside the retained samples only
    // feed the aggregates and are never stored whole.
    let mut values = Vec::with_capacity(months);
    let mut balances = Vec::with_capacity(months);
    let mut prices = Vec::with_capacity(months);

    for scenario_id in 0..input.simulations {
        let mut rng = Rng::new(derive_seed(input.seed, scenario_id));
        values.clear();
        balances.clear();
        prices.clear();
        let failure_month = simulate_path(
            input,
            months,
            drift,
            monthly_vol,
            monthly_inflation,
            &mut rng,
            &mut values,
            &mut balances,
            &mut prices,
        );

        for (month, &value) in values.iter().enumerate() {
            values_by_month[month].push(value);
        }

        match failure_month {
            Some(month) => {
                failure_months.push(month as f64);
                if sample_failed.len() < MAX_SAMPLE_PATHS {
                    sample_failed.push(snapshot_path(&values, &balances, &prices, Some(month)));
                }
            }
            None => {
                ending_values.push(values.last().copied().unwrap_or(0.0));
                if sample_successful.len() < MAX_SAMPLE_PATHS {
                    sample_successful.push(snapshot_path(&values, &balances, &prices, None));
                }
            }
        }
    }

    let monthly_bands = values_by_month
        .iter_mut()
        .enumerate()
        .map(|(month, samples)| PercentileBand {
            period: month as u32,
            p10: percentile(samples, 10.0),
            p50: percentile(samples, 50.0),
            p90: percentile(samples, 90.0),
            mean: mean(samples),
        })
        .collect::<Vec<_>>();

    let failed_count = failure_months.len() as u32;
    let success_rate = (input.simulations - failed_count) as f64 / input.simulations as f64;
    // Failed paths are excluded here: mixing their zeros in would understate
    // what the surviving outcomes look like.
    let median_ending_value = if ending_values.is_empty() {
        None
    } else {
        Some(percentile(&mut ending_values, 50.0))
    };
    let median_failure_month = if failure_months.is_empty() {
        None
    } else {
        Some(percentile(&mut failure_months, 50.0).round() as u32)
    };

    Ok(DrawdownResult {
        success_rate,
        median_ending_value,
        median_failure_month,
        monthly_bands,
        sample_failed_paths: sample_failed,
        sample_successful_paths: sample_successful,
    })
}

fn validate_drawdown_input(input: &DrawdownInput) -> Result<(), EngineError> {
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
    if !input.monthly_withdrawal.is_finite() || input.monthly_withdrawal < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "monthly withdrawal must be >= 0, got {}",
            input.monthly_withdrawal
        )));
    }
    if input.years == 0 || input.years > super::engine::MAX_HORIZON_YEARS {
        return Err(EngineError::InvalidInput(format!(
            "drawdown horizon must be between 1 and {} years, got {}",
            super::engine::MAX_HORIZON_YEARS,
            input.years
        )));
    }
    if !input.annual_volatility.is_finite() || input.annual_volatility < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "annual volatility must be >= 0, got {}",
            input.annual_volatility
        )));
    }
    if !input.inflation_rate.is_finite() || input.inflation_rate <= -1.0 {
        return Err(EngineError::InvalidInput(format!(
            "inflation rate must be > -100%, got {}",
            input.inflation_rate
        )));
    }
    if !input.real_growth_rate.is_finite() || input.real_growth_rate <= -1.0 {
        return Err(EngineError::InvalidInput(format!(
            "real growth rate must be > -100%, got {}",
            input.real_growth_rate
        )));
    }
    if input.simulations == 0 {
        return Err(EngineError::InvalidInput(
            "simulation count must be > 0".to_string(),
        ));
    }
    Ok(())
}

/// One monthly trajectory. Returns the failure month, if any.
///
/// Each month records its pre-withdrawal state first, so the month in which
/// the prior withdrawal exactly zeroed the balance is recorded with value 0
/// and becomes the failure month; the depleting month itself is the last
/// live one. Failure is permanent: the remaining months are zero-filled and
/// the walk stops.
#[allow(clippy::too_many_arguments)]
fn simulate_path(
    input: &DrawdownInput,
    months: usize,
    drift: f64,
    monthly_vol: f64,
    monthly_inflation: f64,
    rng: &mut Rng,
    values: &mut Vec<f64>,
    balances: &mut Vec<f64>,
    prices: &mut Vec<f64>,
) -> Option<u32> {
    let mut balance = input.starting_balance;
    let mut price = input.starting_price;
    let mut income = input.monthly_withdrawal;

    for month in 0..months {
        values.push(balance * price);
        balances.push(balance);
        prices.push(price);

        if balance <= 0.0 {
            for _ in (month + 1)..months {
                values.push(0.0);
                balances.push(0.0);
                prices.push(price);
            }
            return Some(month as u32);
        }

        let withdrawal_units = income / price;
        if withdrawal_units >= balance {
            balance = 0.0;
        } else {
            balance -= withdrawal_units;
        }

        price *= ((drift - 0.5 * monthly_vol * monthly_vol)
            + monthly_vol * rng.standard_normal())
        .exp();
        income *= 1.0 + monthly_inflation;
    }

    None
}

fn snapshot_path(
    values: &[f64],
    balances: &[f64],
    prices: &[f64],
    failure_month: Option<u32>,
) -> SimulationPath {
    SimulationPath {
        months: (0..values.len() as u32).collect(),
        values: values.to_vec(),
        balances: balances.to_vec(),
        prices: prices.to_vec(),
        failed: failure_month.is_some(),
        failure_month,
    }
}
