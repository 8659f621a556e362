use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    AccumulationInput, AccumulationResult, CagrDecay, ContributionFrequency, DrawdownInput,
    GrowthModel, InflationModel, InflationParams, MonteCarloParams, MonteCarloResult,
    VolatilityDecay, cumulative_inflation_factor, debasement_factor, project,
    run_accumulation_monte_carlo, run_drawdown_monte_carlo, to_present_value,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliGrowthModel {
    Cagr,
    PowerLaw,
    SCurve,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliCagrDecay {
    None,
    Auto,
}

impl From<CliCagrDecay> for CagrDecay {
    fn from(value: CliCagrDecay) -> Self {
        match value {
            CliCagrDecay::None => CagrDecay::None,
            CliCagrDecay::Auto => CagrDecay::Auto,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliVolatilityDecay {
    None,
    Auto,
}

impl From<CliVolatilityDecay> for VolatilityDecay {
    fn from(value: CliVolatilityDecay) -> Self {
        match value {
            CliVolatilityDecay::None => VolatilityDecay::None,
            CliVolatilityDecay::Auto => VolatilityDecay::Auto,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl From<CliFrequency> for ContributionFrequency {
    fn from(value: CliFrequency) -> Self {
        match value {
            CliFrequency::Daily => ContributionFrequency::Daily,
            CliFrequency::Weekly => ContributionFrequency::Weekly,
            CliFrequency::Monthly => ContributionFrequency::Monthly,
            CliFrequency::Yearly => ContributionFrequency::Yearly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliInflationModel {
    Linear,
    Cyclical,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiGrowthModel {
    Cagr,
    #[serde(alias = "powerLaw", alias = "power_law", alias = "powerlaw")]
    PowerLaw,
    #[serde(alias = "sCurve", alias = "s_curve", alias = "scurve")]
    SCurve,
}

impl From<ApiGrowthModel> for CliGrowthModel {
    fn from(value: ApiGrowthModel) -> Self {
        match value {
            ApiGrowthModel::Cagr => CliGrowthModel::Cagr,
            ApiGrowthModel::PowerLaw => CliGrowthModel::PowerLaw,
            ApiGrowthModel::SCurve => CliGrowthModel::SCurve,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiDecayMode {
    None,
    Auto,
}

impl From<ApiDecayMode> for CliCagrDecay {
    fn from(value: ApiDecayMode) -> Self {
        match value {
            ApiDecayMode::None => CliCagrDecay::None,
            ApiDecayMode::Auto => CliCagrDecay::Auto,
        }
    }
}

impl From<ApiDecayMode> for CliVolatilityDecay {
    fn from(value: ApiDecayMode) -> Self {
        match value {
            ApiDecayMode::None => CliVolatilityDecay::None,
            ApiDecayMode::Auto => CliVolatilityDecay::Auto,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl From<ApiFrequency> for CliFrequency {
    fn from(value: ApiFrequency) -> Self {
        match value {
            ApiFrequency::Daily => CliFrequency::Daily,
            ApiFrequency::Weekly => CliFrequency::Weekly,
            ApiFrequency::Monthly => CliFrequency::Monthly,
            ApiFrequency::Yearly => CliFrequency::Yearly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiInflationModel {
    Linear,
    Cyclical,
}

impl From<ApiInflationModel> for CliInflationModel {
    fn from(value: ApiInflationModel) -> Self {
        match value {
            ApiInflationModel::Linear => CliInflationModel::Linear,
            ApiInflationModel::Cyclical => CliInflationModel::Cyclical,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GrowPayload {
    starting_balance: Option<f64>,
    starting_price: Option<f64>,
    years: Option<u32>,
    contribution_amount: Option<f64>,
    frequency: Option<ApiFrequency>,

    growth_model: Option<ApiGrowthModel>,
    cagr_rate: Option<f64>,
    cagr_decay: Option<ApiDecayMode>,
    power_law_slope: Option<f64>,
    scurve_years_to_half: Option<f64>,
    scurve_ceiling_price: Option<f64>,

    staking_yield: Option<f64>,

    monte_carlo: Option<bool>,
    volatility: Option<f64>,
    volatility_decay: Option<ApiDecayMode>,
    simulations: Option<u32>,
    seed: Option<u64>,

    inflation_enabled: Option<bool>,
    inflation_model: Option<ApiInflationModel>,
    inflation_rate: Option<f64>,
    inflation_amplitude: Option<f64>,
    inflation_period_years: Option<f64>,
    debasement_rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SpendPayload {
    starting_balance: Option<f64>,
    starting_price: Option<f64>,
    monthly_withdrawal: Option<f64>,
    years: Option<u32>,
    volatility: Option<f64>,
    real_growth_rate: Option<f64>,
    inflation_rate: Option<f64>,
    simulations: Option<u32>,
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
#[command(
    name = "runway",
    about = "Single-asset retirement runway estimator (DCA accumulation + Monte Carlo drawdown)"
)]
struct Cli {
    #[arg(long, default_value_t = 0.0, help = "Asset units held today")]
    starting_balance: f64,
    #[arg(long, help = "Current asset price in USD")]
    starting_price: f64,
    #[arg(long, default_value_t = 20, help = "Accumulation horizon in years")]
    years: u32,
    #[arg(long, default_value_t = 100.0, help = "Contribution amount in USD per period")]
    contribution_amount: f64,
    #[arg(long, value_enum, default_value_t = CliFrequency::Monthly)]
    contribution_frequency: CliFrequency,
    #[arg(long, value_enum, default_value_t = CliGrowthModel::Cagr)]
    growth_model: CliGrowthModel,
    #[arg(
        long,
        default_value_t = 25.0,
        help = "Expected annual growth in percent, e.g. 25"
    )]
    cagr_rate: f64,
    #[arg(
        long,
        value_enum,
        default_value_t = CliCagrDecay::Auto,
        help = "Let the CAGR decay toward a 3% floor as the asset matures"
    )]
    cagr_decay: CliCagrDecay,
    #[arg(
        long,
        default_value_t = crate::core::DEFAULT_POWER_LAW_SLOPE,
        help = "Power-law slope against days since genesis"
    )]
    power_law_slope: f64,
    #[arg(
        long,
        default_value_t = 8.0,
        help = "S-curve: years until half the remaining upside is captured"
    )]
    scurve_years_to_half: f64,
    #[arg(long, default_value_t = 1_000.0, help = "S-curve ceiling price in USD")]
    scurve_ceiling_price: f64,
    #[arg(long, help = "Apply an annual staking yield to the balance")]
    staking_yield_enabled: bool,
    #[arg(long, default_value_t = 0.0, help = "Annual staking yield in percent")]
    staking_yield_rate: f64,
    #[arg(long, help = "Also run the accumulation Monte Carlo simulation")]
    monte_carlo: bool,
    #[arg(
        long,
        default_value_t = 60.0,
        help = "Annual price volatility in percent for the accumulation Monte Carlo"
    )]
    volatility: f64,
    #[arg(
        long,
        value_enum,
        default_value_t = CliVolatilityDecay::Auto,
        help = "Let volatility decay toward a 25% floor as the asset matures"
    )]
    volatility_decay: CliVolatilityDecay,
    #[arg(long, default_value_t = 1_000, help = "Accumulation Monte Carlo path count")]
    simulations: u32,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, help = "Report final values in today's dollars")]
    inflation_enabled: bool,
    #[arg(long, value_enum, default_value_t = CliInflationModel::Linear)]
    inflation_model: CliInflationModel,
    #[arg(
        long,
        default_value_t = 3.0,
        help = "Annual inflation in percent (cyclical model: the base rate)"
    )]
    inflation_rate: f64,
    #[arg(
        long,
        default_value_t = 1.5,
        help = "Cyclical model: inflation swing amplitude in percent"
    )]
    inflation_amplitude: f64,
    #[arg(long, default_value_t = 8.0, help = "Cyclical model: cycle length in years")]
    inflation_period_years: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Annual currency debasement vs hard assets in percent"
    )]
    debasement_rate: f64,
    #[arg(
        long,
        default_value_t = 3_000.0,
        help = "Monthly withdrawal in today's dollars during the spend phase"
    )]
    monthly_withdrawal: f64,
    #[arg(long, default_value_t = 30, help = "Spend phase horizon in years")]
    spend_years: u32,
    #[arg(
        long,
        default_value_t = 50.0,
        help = "Annual price volatility in percent during the spend phase"
    )]
    spend_volatility: f64,
    #[arg(
        long,
        default_value_t = 5.0,
        help = "Expected real (above-inflation) annual growth in percent during the spend phase"
    )]
    spend_real_growth: f64,
    #[arg(
        long,
        default_value_t = 3.0,
        help = "Annual inflation in percent applied to spend-phase withdrawals"
    )]
    spend_inflation: f64,
    #[arg(long, default_value_t = 1_000, help = "Spend phase Monte Carlo path count")]
    spend_simulations: u32,
}

#[derive(Debug)]
struct GrowRequest {
    input: AccumulationInput,
    monte_carlo: Option<MonteCarloParams>,
    inflation: InflationParams,
    debasement_rate: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PresentValueView {
    cumulative_inflation_factor: f64,
    final_value_today_usd: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GrowResponse {
    #[serde(flatten)]
    projection: AccumulationResult,
    present_value: Option<PresentValueView>,
    debasement_adjusted_value_usd: Option<f64>,
    monte_carlo: Option<MonteCarloResult>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_grow_request(cli: &Cli) -> Result<GrowRequest, String> {
    if !cli.starting_price.is_finite() || cli.starting_price <= 0.0 {
        return Err("--starting-price must be > 0".to_string());
    }

    if !cli.starting_balance.is_finite() || cli.starting_balance < 0.0 {
        return Err("--starting-balance must be >= 0".to_string());
    }

    if !cli.contribution_amount.is_finite() || cli.contribution_amount < 0.0 {
        return Err("--contribution-amount must be >= 0".to_string());
    }

    if cli.years > 120 {
        return Err("--years must be <= 120".to_string());
    }

    if cli.staking_yield_enabled && !(0.0..=1_000.0).contains(&cli.staking_yield_rate) {
        return Err("--staking-yield-rate must be between 0 and 1000".to_string());
    }

    // Decay walks the rate down toward its floor; a negative starting rate
    // only makes sense without decay.
    if cli.growth_model == CliGrowthModel::Cagr
        && cli.cagr_decay == CliCagrDecay::Auto
        && !(0.0..=1_000.0).contains(&cli.cagr_rate)
    {
        return Err("--cagr-rate must be between 0 and 1000 when decay is enabled".to_string());
    }

    let growth_model = match cli.growth_model {
        CliGrowthModel::Cagr => {
            if !cli.cagr_rate.is_finite() || cli.cagr_rate <= -100.0 {
                return Err("--cagr-rate must be > -100".to_string());
            }
            GrowthModel::Cagr {
                rate: cli.cagr_rate / 100.0,
                decay: cli.cagr_decay.into(),
            }
        }
        CliGrowthModel::PowerLaw => {
            if !cli.power_law_slope.is_finite() || cli.power_law_slope <= 0.0 {
                return Err("--power-law-slope must be > 0".to_string());
            }
            GrowthModel::PowerLaw {
                slope: cli.power_law_slope,
            }
        }
        CliGrowthModel::SCurve => {
            if !cli.scurve_years_to_half.is_finite() || cli.scurve_years_to_half <= 0.0 {
                return Err("--scurve-years-to-half must be > 0".to_string());
            }
            if !cli.scurve_ceiling_price.is_finite() || cli.scurve_ceiling_price <= 0.0 {
                return Err("--scurve-ceiling-price must be > 0".to_string());
            }
            GrowthModel::SCurve {
                years_to_half_remaining: cli.scurve_years_to_half,
                ceiling_price: cli.scurve_ceiling_price,
            }
        }
    };

    let monte_carlo = if cli.monte_carlo {
        if !(0.0..=1_000.0).contains(&cli.volatility) {
            return Err("--volatility must be between 0 and 1000".to_string());
        }
        if cli.simulations == 0 {
            return Err("--simulations must be > 0".to_string());
        }
        Some(MonteCarloParams {
            volatility: cli.volatility / 100.0,
            decay: cli.volatility_decay.into(),
            simulations: cli.simulations,
            seed: cli.seed,
        })
    } else {
        None
    };

    if cli.inflation_enabled {
        if !(0.0..=100.0).contains(&cli.inflation_rate) {
            return Err("--inflation-rate must be between 0 and 100".to_string());
        }
        if !(0.0..=100.0).contains(&cli.inflation_amplitude) {
            return Err("--inflation-amplitude must be between 0 and 100".to_string());
        }
        if !cli.inflation_period_years.is_finite() || cli.inflation_period_years < 1.0 {
            return Err("--inflation-period-years must be >= 1".to_string());
        }
    }

    if !(0.0..=100.0).contains(&cli.debasement_rate) {
        return Err("--debasement-rate must be between 0 and 100".to_string());
    }

    let inflation_model = match cli.inflation_model {
        CliInflationModel::Linear => InflationModel::Linear {
            rate: cli.inflation_rate / 100.0,
        },
        CliInflationModel::Cyclical => InflationModel::Cyclical {
            base_rate: cli.inflation_rate / 100.0,
            amplitude: cli.inflation_amplitude / 100.0,
            period_years: cli.inflation_period_years,
        },
    };

    Ok(GrowRequest {
        input: AccumulationInput {
            starting_balance: cli.starting_balance,
            starting_price: cli.starting_price,
            years: cli.years,
            contribution_amount: cli.contribution_amount,
            frequency: cli.contribution_frequency.into(),
            growth_model,
            yield_enabled: cli.staking_yield_enabled,
            yield_rate: cli.staking_yield_rate / 100.0,
        },
        monte_carlo,
        inflation: InflationParams {
            enabled: cli.inflation_enabled,
            model: inflation_model,
        },
        debasement_rate: cli.debasement_rate / 100.0,
    })
}

fn build_spend_input(cli: &Cli) -> Result<DrawdownInput, String> {
    if !cli.starting_price.is_finite() || cli.starting_price <= 0.0 {
        return Err("--starting-price must be > 0".to_string());
    }

    if !cli.starting_balance.is_finite() || cli.starting_balance < 0.0 {
        return Err("--starting-balance must be >= 0".to_string());
    }

    if !cli.monthly_withdrawal.is_finite() || cli.monthly_withdrawal < 0.0 {
        return Err("--monthly-withdrawal must be >= 0".to_string());
    }

    if cli.spend_years == 0 || cli.spend_years > 120 {
        return Err("--spend-years must be between 1 and 120".to_string());
    }

    if !(0.0..=1_000.0).contains(&cli.spend_volatility) {
        return Err("--spend-volatility must be between 0 and 1000".to_string());
    }

    if !cli.spend_real_growth.is_finite() || cli.spend_real_growth <= -100.0 {
        return Err("--spend-real-growth must be > -100".to_string());
    }

    if !(0.0..=100.0).contains(&cli.spend_inflation) {
        return Err("--spend-inflation must be between 0 and 100".to_string());
    }

    if cli.spend_simulations == 0 {
        return Err("--spend-simulations must be > 0".to_string());
    }

    Ok(DrawdownInput {
        starting_balance: cli.starting_balance,
        starting_price: cli.starting_price,
        monthly_withdrawal: cli.monthly_withdrawal,
        years: cli.spend_years,
        annual_volatility: cli.spend_volatility / 100.0,
        real_growth_rate: cli.spend_real_growth / 100.0,
        inflation_rate: cli.spend_inflation / 100.0,
        simulations: cli.spend_simulations,
        seed: cli.seed,
    })
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/api/grow", get(grow_get_handler).post(grow_post_handler))
        .route(
            "/api/spend",
            get(spend_get_handler).post(spend_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("runway HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/api/grow");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn grow_get_handler(Query(payload): Query<GrowPayload>) -> Response {
    grow_handler_impl(payload).await
}

async fn grow_post_handler(Json(payload): Json<GrowPayload>) -> Response {
    grow_handler_impl(payload).await
}

async fn spend_get_handler(Query(payload): Query<SpendPayload>) -> Response {
    spend_handler_impl(payload).await
}

async fn spend_post_handler(Json(payload): Json<SpendPayload>) -> Response {
    spend_handler_impl(payload).await
}

async fn grow_handler_impl(payload: GrowPayload) -> Response {
    let cli = grow_cli_from_payload(payload);
    let request = match build_grow_request(&cli) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let projection = match project(&request.input) {
        Ok(projection) => projection,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let monte_carlo = match &request.monte_carlo {
        Some(params) => match run_accumulation_monte_carlo(&request.input, params) {
            Ok(result) => Some(result),
            Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
        },
        None => None,
    };

    let present_value = request.inflation.enabled.then(|| PresentValueView {
        cumulative_inflation_factor: cumulative_inflation_factor(
            request.input.years,
            &request.inflation,
        ),
        final_value_today_usd: to_present_value(
            projection.final_value_usd,
            request.input.years,
            &request.inflation,
        ),
    });
    let debasement_adjusted_value_usd = (request.debasement_rate > 0.0).then(|| {
        projection.final_value_usd / debasement_factor(request.input.years, request.debasement_rate)
    });

    json_response(
        StatusCode::OK,
        GrowResponse {
            projection,
            present_value,
            debasement_adjusted_value_usd,
            monte_carlo,
        },
    )
}

async fn spend_handler_impl(payload: SpendPayload) -> Response {
    let cli = spend_cli_from_payload(payload);
    let input = match build_spend_input(&cli) {
        Ok(input) => input,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    match run_drawdown_monte_carlo(&input) {
        Ok(result) => json_response(StatusCode::OK, result),
        Err(e) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn grow_request_from_json(json: &str) -> Result<GrowRequest, String> {
    let payload = serde_json::from_str::<GrowPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    build_grow_request(&grow_cli_from_payload(payload))
}

#[cfg(test)]
fn spend_input_from_json(json: &str) -> Result<DrawdownInput, String> {
    let payload = serde_json::from_str::<SpendPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    build_spend_input(&spend_cli_from_payload(payload))
}

fn grow_cli_from_payload(payload: GrowPayload) -> Cli {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.starting_balance {
        cli.starting_balance = v;
    }
    if let Some(v) = payload.starting_price {
        cli.starting_price = v;
    }
    if let Some(v) = payload.years {
        cli.years = v;
    }
    if let Some(v) = payload.contribution_amount {
        cli.contribution_amount = v;
    }
    if let Some(v) = payload.frequency {
        cli.contribution_frequency = CliFrequency::from(v);
    }
    if let Some(v) = payload.growth_model {
        cli.growth_model = CliGrowthModel::from(v);
    }
    if let Some(v) = payload.cagr_rate {
        cli.cagr_rate = v;
    }
    if let Some(v) = payload.cagr_decay {
        cli.cagr_decay = CliCagrDecay::from(v);
    }
    if let Some(v) = payload.power_law_slope {
        cli.power_law_slope = v;
    }
    if let Some(v) = payload.scurve_years_to_half {
        cli.scurve_years_to_half = v;
    }
    if let Some(v) = payload.scurve_ceiling_price {
        cli.scurve_ceiling_price = v;
    }
    if let Some(v) = payload.staking_yield {
        cli.staking_yield_enabled = true;
        cli.staking_yield_rate = v;
    }
    if let Some(v) = payload.monte_carlo {
        cli.monte_carlo = v;
    }
    if let Some(v) = payload.volatility {
        cli.volatility = v;
    }
    if let Some(v) = payload.volatility_decay {
        cli.volatility_decay = CliVolatilityDecay::from(v);
    }
    if let Some(v) = payload.simulations {
        cli.simulations = v;
    }
    if let Some(v) = payload.seed {
        cli.seed = v;
    }
    if let Some(v) = payload.inflation_enabled {
        cli.inflation_enabled = v;
    }
    if let Some(v) = payload.inflation_model {
        cli.inflation_model = CliInflationModel::from(v);
    }
    if let Some(v) = payload.inflation_rate {
        cli.inflation_rate = v;
    }
    if let Some(v) = payload.inflation_amplitude {
        cli.inflation_amplitude = v;
    }
    if let Some(v) = payload.inflation_period_years {
        cli.inflation_period_years = v;
    }
    if let Some(v) = payload.debasement_rate {
        cli.debasement_rate = v;
    }

    cli
}

fn spend_cli_from_payload(payload: SpendPayload) -> Cli {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.starting_balance {
        cli.starting_balance = v;
    }
    if let Some(v) = payload.starting_price {
        cli.starting_price = v;
    }
    if let Some(v) = payload.monthly_withdrawal {
        cli.monthly_withdrawal = v;
    }
    if let Some(v) = payload.years {
        cli.spend_years = v;
    }
    if let Some(v) = payload.volatility {
        cli.spend_volatility = v;
    }
    if let Some(v) = payload.real_growth_rate {
        cli.spend_real_growth = v;
    }
    if let Some(v) = payload.inflation_rate {
        cli.spend_inflation = v;
    }
    if let Some(v) = payload.simulations {
        cli.spend_simulations = v;
    }
    if let Some(v) = payload.seed {
        cli.seed = v;
    }

    cli
}

fn default_cli_for_api() -> Cli {
    Cli {
        starting_balance: 0.0,
        starting_price: 150.0,
        years: 20,
        contribution_amount: 100.0,
        contribution_frequency: CliFrequency::Monthly,
        growth_model: CliGrowthModel::Cagr,
        cagr_rate: 25.0,
        cagr_decay: CliCagrDecay::Auto,
        power_law_slope: crate::core::DEFAULT_POWER_LAW_SLOPE,
        scurve_years_to_half: 8.0,
        scurve_ceiling_price: 1_000.0,
        staking_yield_enabled: false,
        staking_yield_rate: 0.0,
        monte_carlo: false,
        volatility: 60.0,
        volatility_decay: CliVolatilityDecay::Auto,
        simulations: 1_000,
        seed: 42,
        inflation_enabled: false,
        inflation_model: CliInflationModel::Linear,
        inflation_rate: 3.0,
        inflation_amplitude: 1.5,
        inflation_period_years: 8.0,
        debasement_rate: 0.0,
        monthly_withdrawal: 3_000.0,
        spend_years: 30,
        spend_volatility: 50.0,
        spend_real_growth: 5.0,
        spend_inflation: 3.0,
        spend_simulations: 1_000,
    }
}
