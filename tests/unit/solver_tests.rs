use volsmile_rs::prelude::*;

#[test]
fn test_reference_scenario_round_trip() {
    let params = IVParams::call(100.0, 100.0, 1.0, 0.05);
    let reference_price = BlackScholes.price(&params.with_volatility(0.20));

    let result = solve_iv(&params, reference_price, &SolverConfig::default()).unwrap();

    assert!((result.iv - 0.20).abs() < 1e-4);
    assert!(result.iterations < 100);
}

#[test]
fn test_round_trip_across_contracts() {
    let config = SolverConfig::default();
    for strike in [85.0, 90.0, 95.0, 100.0, 105.0, 110.0, 115.0] {
        for time in [0.25, 0.5, 1.0, 2.0] {
            for rate in [0.0, 0.05] {
                for vol in [0.1, 0.2, 0.35, 0.6] {
                    for option_type in [OptionType::Call, OptionType::Put] {
                        let params = IVParams::new(100.0, strike, time, rate, option_type);
                        let priced = params.with_volatility(vol);

                        // price is flat in σ here, any σ in a band matches
                        if BlackScholes.sensitivities(&priced).dprice_dsigma() < 1e-2 {
                            continue;
                        }

                        let price = BlackScholes.price(&priced);
                        let result = solve_iv(&params, price, &config).unwrap_or_else(|e| {
                            panic!("K={strike} T={time} r={rate} vol={vol} {option_type:?}: {e}")
                        });
                        assert!(
                            (result.iv - vol).abs() < 1e-4,
                            "K={strike} T={time} r={rate} vol={vol} {option_type:?}: got {}",
                            result.iv
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_round_trip_extreme_atm_volatility() {
    let config = SolverConfig::default();
    for vol in [0.05, 1.0, 2.0, 3.0] {
        let params = IVParams::call(100.0, 100.0, 0.5, 0.05);
        let price = BlackScholes.price(&params.with_volatility(vol));
        let result = solve_iv(&params, price, &config).unwrap();
        assert!((result.iv - vol).abs() < 1e-4, "vol={vol}");
    }
}

#[test]
fn test_price_strictly_increasing_in_volatility() {
    for strike in [80.0, 90.0, 100.0, 110.0, 120.0] {
        for option_type in [OptionType::Call, OptionType::Put] {
            let params = IVParams::new(100.0, strike, 0.5, 0.05, option_type);
            let mut previous = f64::NEG_INFINITY;
            for step in 1..=60 {
                let price = BlackScholes.price(&params.with_volatility(0.05 * step as f64));
                assert!(price > previous, "K={strike} {option_type:?} step={step}");
                previous = price;
            }
        }
    }
}

#[test]
fn test_result_never_leaves_bounds() {
    let config = SolverConfig::default();
    let params = IVParams::call(100.0, 100.0, 0.5, 0.05);
    for market_price in [1e-9, 0.01, 1.0, 5.0, 20.0, 60.0, 99.0, 500.0, 1e6] {
        match solve_iv(&params, market_price, &config) {
            Ok(result) => assert!((1e-6..=10.0).contains(&result.iv)),
            Err(IVError::NotConverged { last_sigma, .. }) => {
                assert!((1e-6..=10.0).contains(&last_sigma));
            }
            Err(IVError::Stalled { sigma, .. }) => {
                assert!((1e-6..=10.0).contains(&sigma));
            }
            Err(other) => panic!("unexpected failure {other}"),
        }
    }
}

#[test]
fn test_solver_is_deterministic() {
    let params = IVParams::put(100.0, 90.0, 0.3, 0.02);
    let price = BlackScholes.price(&params.with_volatility(0.33));
    let a = solve_iv(&params, price, &SolverConfig::default());
    let b = solve_iv(&params, price, &SolverConfig::default());
    assert_eq!(a, b);
}

/// Oracle with a flat price, so vega is zero everywhere.
struct FlatOracle;

impl PricingOracle for FlatOracle {
    fn price(&self, _params: &PricingParameters) -> f64 {
        1.0
    }

    fn sensitivities(&self, _params: &PricingParameters) -> Sensitivities {
        Sensitivities::default()
    }
}

#[test]
fn test_custom_oracle_stalls_on_zero_vega() {
    let params = IVParams::call(100.0, 100.0, 1.0, 0.05);
    let result = solve_iv_with(&FlatOracle, &params, 2.0, &SolverConfig::default());
    assert_eq!(
        result,
        Err(IVError::Stalled {
            iteration: 0,
            sigma: 0.2
        })
    );

    // already matching: converges before vega is ever looked at
    let result = solve_iv_with(&FlatOracle, &params, 1.0, &SolverConfig::default()).unwrap();
    assert_eq!(result.iterations, 0);
}

#[test]
fn test_price_batch_matches_single_pricing() {
    let contracts: Vec<PricingParameters> = [90.0, 100.0, 110.0]
        .iter()
        .map(|&k| IVParams::put(100.0, k, 0.75, 0.03).with_volatility(0.22))
        .collect();
    let prices = price_batch(&BlackScholes, &contracts);
    let expected: Vec<f64> = contracts.iter().map(|c| BlackScholes.price(c)).collect();
    assert_eq!(prices, expected);
}
