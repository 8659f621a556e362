use std::time::{SystemTime, UNIX_EPOCH};

use super::types::{CagrDecay, EngineError, GrowthModel};

/// Floor for the effective CAGR once auto-decay has been running for years.
pub(crate) const MIN_CAGR_RATE: f64 = 0.03;

/// Power-law fair-value constants, calibrated against the asset's observed
/// price history. Genesis is the Solana mainnet-beta launch, 2020-03-16 UTC.
const GENESIS_UNIX_SECS: u64 = 1_584_316_800;
const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_YEAR: f64 = 365.25;
const POWER_LAW_INTERCEPT: f64 = -3.10;
pub const DEFAULT_POWER_LAW_SLOPE: f64 = 1.6;

/// Projected asset price `years_from_now` years ahead of `current_price`.
///
/// The projection is always anchored to the caller's real price: a holding
/// trading above or below any model's fair value still projects consistently
/// relative to itself.
pub fn future_price(
    current_price: f64,
    years_from_now: f64,
    model: &GrowthModel,
) -> Result<f64, EngineError> {
    if !current_price.is_finite() || current_price <= 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "current price must be > 0, got {current_price}"
        )));
    }
    if !years_from_now.is_finite() || years_from_now < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "years from now must be >= 0, got {years_from_now}"
        )));
    }

    match *model {
        GrowthModel::Cagr { rate, decay } => cagr_price(current_price, years_from_now, rate, decay),
        GrowthModel::PowerLaw { slope } => {
            power_law_price_from(days_since_genesis_now(), current_price, years_from_now, slope)
        }
        GrowthModel::SCurve {
            years_to_half_remaining,
            ceiling_price,
        } => scurve_price(
            current_price,
            years_from_now,
            years_to_half_remaining,
            ceiling_price,
        ),
    }
}

fn cagr_price(
    current_price: f64,
    years: f64,
    rate: f64,
    decay: CagrDecay,
) -> Result<f64, EngineError> {
    if !rate.is_finite() || rate <= -1.0 {
        return Err(EngineError::Configuration(format!(
            "CAGR rate must be > -100%, got {rate}"
        )));
    }

    match decay {
        CagrDecay::None => Ok(current_price * (1.0 + rate).powf(years)),
        // Decay only steps whole years; fractional remainders are dropped.
        CagrDecay::Auto => {
            let mut price = current_price;
            let mut current_rate = rate;
            for year in 1..=(years as u32) {
                price *= 1.0 + current_rate;
                current_rate =
                    (current_rate * (1.0 - cagr_decay_for_year(year))).max(MIN_CAGR_RATE);
            }
            Ok(price)
        }
    }
}

/// Annual decay applied to the growth rate itself, stepping down in 5-year
/// blocks: aggressive while the asset is young, near zero past year 25.
fn cagr_decay_for_year(year: u32) -> f64 {
    match year {
        0..=5 => 0.06,
        6..=10 => 0.05,
        11..=15 => 0.04,
        16..=20 => 0.03,
        21..=25 => 0.02,
        _ => 0.005,
    }
}

fn days_since_genesis_now() -> f64 {
    let now_secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(GENESIS_UNIX_SECS);
    let elapsed = now_secs.saturating_sub(GENESIS_UNIX_SECS) as f64 / SECONDS_PER_DAY;
    elapsed.max(1.0)
}

fn power_law_fair_value(days_since_genesis: f64, slope: f64) -> f64 {
    10f64.powf(POWER_LAW_INTERCEPT + slope * days_since_genesis.log10())
}

/// Power-law projection anchored at `days_today`: the user's price is scaled
/// by the ratio of fair value at `today + years` over fair value today.
fn power_law_price_from(
    days_today: f64,
    current_price: f64,
    years: f64,
    slope: f64,
) -> Result<f64, EngineError> {
    if !slope.is_finite() || slope <= 0.0 {
        return Err(EngineError::Configuration(format!(
            "power-law slope must be > 0, got {slope}"
        )));
    }

    let today = days_today.max(1.0);
    let future = today + years * DAYS_PER_YEAR;
    let ratio = power_law_fair_value(future, slope) / power_law_fair_value(today, slope);
    Ok(current_price * ratio)
}

fn scurve_price(
    current_price: f64,
    years: f64,
    years_to_half_remaining: f64,
    ceiling_price: f64,
) -> Result<f64, EngineError> {
    if !years_to_half_remaining.is_finite() || years_to_half_remaining <= 0.0 {
        return Err(EngineError::Configuration(format!(
            "S-curve half-life must be > 0 years, got {years_to_half_remaining}"
        )));
    }
    if !ceiling_price.is_finite() || ceiling_price <= 0.0 {
        return Err(EngineError::Configuration(format!(
            "S-curve ceiling price must be > 0, got {ceiling_price}"
        )));
    }

    // Nothing above the ceiling is modeled.
    if current_price >= ceiling_price {
        return Ok(ceiling_price);
    }

    let k = std::f64::consts::LN_2 / years_to_half_remaining;
    let remaining_growth = ceiling_price - current_price;
    Ok(ceiling_price - remaining_growth * (-k * years).exp())
}
