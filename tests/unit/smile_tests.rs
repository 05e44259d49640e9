use crate::common::{RATE, SPOT, model_quote, model_vol, standard_strikes};
use volsmile_rs::prelude::*;

#[test]
fn test_smile_recovers_model_skew() {
    let days = 30;
    let strikes = standard_strikes();
    let calls: Vec<Quote> = strikes
        .iter()
        .map(|&k| model_quote(OptionType::Call, k, days))
        .collect();
    let puts: Vec<Quote> = strikes
        .iter()
        .map(|&k| model_quote(OptionType::Put, k, days))
        .collect();

    let smile = build_smile(&calls, &puts, SPOT, year_fraction(days), RATE).unwrap();

    for point in smile.points() {
        assert!(
            (point.iv - model_vol(point.strike, days)).abs() < 1e-4,
            "K={} {:?}",
            point.strike,
            point.option_type
        );
    }
    assert!(smile.points().windows(2).all(|w| w[0].strike <= w[1].strike));
    assert_eq!(smile.len(), smile.calls().len() + smile.puts().len());
    assert!((smile.atm_iv() - model_vol(SPOT, days)).abs() < 1e-4);

    // skew: low strikes carry more volatility
    let low = smile.iv_at(85.0).unwrap();
    let high = smile.iv_at(115.0).unwrap();
    assert!(low > high);
}

#[test]
fn test_smile_from_puts_only() {
    let days = 60;
    let puts: Vec<Quote> = [85.0, 90.0, 95.0]
        .iter()
        .map(|&k| model_quote(OptionType::Put, k, days))
        .collect();

    let smile = build_smile(&[], &puts, SPOT, year_fraction(days), RATE).unwrap();

    assert!(smile.calls().is_empty());
    // spot above the last strike: clamped to the 95 point
    assert!((smile.atm_iv() - model_vol(95.0, days)).abs() < 1e-4);
}

#[test]
fn test_smile_with_custom_config() {
    let days = 45;
    let calls: Vec<Quote> = standard_strikes()
        .iter()
        .map(|&k| model_quote(OptionType::Call, k, days))
        .collect();
    let config = SmileConfig {
        filter: FilterConfig::new().with_strike_band(0.05),
        solver: SolverConfig::default(),
    };

    let smile = build_smile_with(
        &BlackScholes,
        &calls,
        &[],
        SPOT,
        year_fraction(days),
        RATE,
        &config,
    )
    .unwrap();

    let strikes: Vec<f64> = smile.points().iter().map(|p| p.strike).collect();
    assert_eq!(strikes, vec![95.0, 100.0, 105.0]);
}

#[test]
fn test_smile_absorbs_solver_failures() {
    let days = 30;
    let mut calls: Vec<Quote> = [95.0, 100.0, 105.0]
        .iter()
        .map(|&k| model_quote(OptionType::Call, k, days))
        .collect();
    // worth more than the underlying: no volatility reproduces it
    calls.push(Quote::call(110.0, 120.0, 121.0));

    let smile = build_smile(&calls, &[], SPOT, year_fraction(days), RATE).unwrap();
    assert_eq!(smile.len(), 3);
}

#[test]
fn test_smile_with_nothing_usable() {
    let calls = vec![Quote::call(100.0, 0.0, 0.0), Quote::call(150.0, 1.0, 1.1)];
    assert_eq!(
        build_smile(&calls, &[], SPOT, 0.1, RATE).unwrap_err(),
        VolError::NoUsableQuotes
    );
}
