use crate::common::{SPOT, model_chain, standard_strikes, today};
use volsmile_rs::prelude::*;

#[test]
fn test_json_snapshot_to_surface() {
    let strikes = standard_strikes();
    let snapshot = StaticMarketData::new(
        SPOT,
        vec![
            model_chain(91, &strikes),
            model_chain(29, &strikes),
            model_chain(63, &strikes),
        ],
    );
    let json = serde_json::to_string(&snapshot).unwrap();

    let source = StaticMarketData::from_json(&json).unwrap();
    let spot = source.spot().unwrap();
    let expiries = listed_expiries(&source).unwrap();
    let chains = fetch_chains(&source, &expiries).unwrap();

    let grid = build_surface(&chains, spot, today(), &SurfaceConfig::default()).unwrap();

    assert_eq!(grid.days(), &[29, 63, 91]);
    assert_eq!(grid.strikes().len(), strikes.len());
}

#[test]
fn test_grid_serializes_for_downstream_consumers() {
    let strikes = standard_strikes();
    let chains = vec![model_chain(29, &strikes), model_chain(63, &strikes)];
    let grid = build_surface(&chains, SPOT, today(), &SurfaceConfig::default()).unwrap();

    let value = serde_json::to_value(&grid).unwrap();
    assert_eq!(value["days"], serde_json::json!([29, 63]));
    assert_eq!(value["values"].as_array().unwrap().len(), 2);

    let back: VolSurfaceGrid = serde_json::from_value(value).unwrap();
    assert_eq!(back.shape(), grid.shape());
}

#[test]
fn test_smile_from_nearest_listed_expiry() {
    let strikes = standard_strikes();
    let source = StaticMarketData::new(
        SPOT,
        vec![model_chain(63, &strikes), model_chain(29, &strikes)],
    );

    let expiries = listed_expiries(&source).unwrap();
    let pick = select_nearest_expiry(&expiries, today(), 30).unwrap();
    let chain = source.option_chain(pick.expiry).unwrap();

    let smile = build_smile(
        &chain.call_quotes(),
        &chain.put_quotes(),
        SPOT,
        pick.time_to_expiry(),
        0.05,
    )
    .unwrap();

    assert_eq!(pick.days_to_expiry, 29);
    assert!(!smile.is_empty());
}
