use pyth_price_chart::domain::{
    chart::{ChartModel, TrendDirection, compute_axis_domain},
    market_data::{RangeReducer, RawSeries, normalize},
};

fn scenario() -> RawSeries {
    RawSeries {
        t: vec![1000, 2000, 3000],
        o: vec![10.0, 12.0, 9.0],
        h: vec![11.0, 12.0, 15.0],
        l: vec![10.0, 9.0, 9.0],
        c: vec![11.0, 9.0, 15.0],
        ..Default::default()
    }
}

#[test]
fn normalize_reduce_and_round() {
    let points = normalize(&scenario()).unwrap();
    let millis: Vec<u64> = points.iter().map(|p| p.timestamp.value()).collect();
    assert_eq!(millis, vec![1_000_000, 2_000_000, 3_000_000]);

    let (min, max) = RangeReducer::open_close_range(&points).unwrap();
    assert_eq!((min, max), (9.0, 15.0));

    let domain = compute_axis_domain(min, max).unwrap();
    assert!(domain.lower <= 9.0 && domain.upper >= 15.0);
}

#[test]
fn chart_model_bundles_the_pipeline() {
    let model = ChartModel::from_series(&scenario()).unwrap();
    assert_eq!(model.len(), 3);
    assert_eq!((model.min_value, model.max_value), (9.0, 15.0));
    assert_eq!((model.reference_value, model.last_value), (11.0, 15.0));
    assert!(model.domain.contains(9.0) && model.domain.contains(15.0));

    let trend = model.resting_trend().unwrap();
    assert_eq!(trend.direction, TrendDirection::Up);
    assert!((trend.percent_change - 36.363_636).abs() < 1e-4);

    // (15 - 11) / (15 - 9) of the way down from the top
    assert!((model.split_offset() - 66.666_666).abs() < 1e-4);
    assert!(model.is_up_value(11.0));
    assert!(!model.is_up_value(10.99));
}

#[test]
fn empty_payload_never_reaches_the_model() {
    assert!(ChartModel::from_series(&RawSeries::default()).is_err());
}
