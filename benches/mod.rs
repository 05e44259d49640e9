//! Criterion benchmarks for the solver, smile and surface pipelines.

use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use volsmile_rs::prelude::*;

const SPOT: f64 = 100.0;
const RATE: f64 = 0.05;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

fn vol(strike: f64) -> f64 {
    let m = (strike / SPOT).ln();
    0.20 - 0.25 * m + 0.8 * m * m
}

fn quote(option_type: OptionType, strike: f64, days: i64) -> Quote {
    let params = IVParams::new(SPOT, strike, year_fraction(days), RATE, option_type);
    let mid = BlackScholes.price(&params.with_volatility(vol(strike)));
    let half = (0.01 * mid).max(0.005);
    Quote::new(strike, mid - half, mid + half, option_type)
}

fn strikes(count: usize) -> Vec<f64> {
    let step = 40.0 / (count.max(2) - 1) as f64;
    (0..count).map(|i| 80.0 + step * i as f64).collect()
}

fn chain(days: i64, strikes: &[f64]) -> ExpiryChain {
    let row = |q: Quote| ChainRow {
        strike: q.strike,
        bid: q.bid,
        ask: q.ask,
    };
    ExpiryChain {
        expiry: today()
            .checked_add_days(Days::new(days as u64))
            .unwrap_or_default(),
        chain: OptionChain {
            calls: strikes
                .iter()
                .map(|&k| row(quote(OptionType::Call, k, days)))
                .collect(),
            puts: strikes
                .iter()
                .map(|&k| row(quote(OptionType::Put, k, days)))
                .collect(),
        },
    }
}

fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_iv");
    let config = SolverConfig::default();

    for strike in [80.0, 100.0, 120.0] {
        let params = IVParams::call(SPOT, strike, 0.5, RATE);
        let price = BlackScholes.price(&params.with_volatility(vol(strike)));
        group.bench_with_input(BenchmarkId::new("call", strike as u32), &price, |b, &price| {
            b.iter(|| solve_iv(black_box(&params), black_box(price), &config));
        });
    }

    group.finish();
}

fn bench_smile(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_smile");

    for count in [9, 41, 161] {
        let ks = strikes(count);
        let calls: Vec<Quote> = ks.iter().map(|&k| quote(OptionType::Call, k, 30)).collect();
        let puts: Vec<Quote> = ks.iter().map(|&k| quote(OptionType::Put, k, 30)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| build_smile(black_box(&calls), black_box(&puts), SPOT, 30.0 / 365.0, RATE));
        });
    }

    group.finish();
}

fn bench_surface(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_surface");
    let config = SurfaceConfig::default();

    for count in [9, 41] {
        let ks = strikes(count);
        let chains: Vec<ExpiryChain> = [7, 29, 63, 91, 182, 365]
            .iter()
            .map(|&days| chain(days, &ks))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &chains, |b, chains| {
            b.iter(|| build_surface(black_box(chains), SPOT, today(), &config));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_solver, bench_smile, bench_surface);
criterion_main!(benches);
