use pyth_price_chart::domain::{
    errors::ChartError,
    market_data::{RangeReducer, RawSeries, SeriesNormalizer},
};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

fn series(t: Vec<i64>, o: Vec<f64>, c: Vec<f64>) -> RawSeries {
    RawSeries {
        h: o.iter().zip(&c).map(|(a, b)| a.max(*b)).collect(),
        l: o.iter().zip(&c).map(|(a, b)| a.min(*b)).collect(),
        t,
        o,
        c,
        ..Default::default()
    }
}

#[quickcheck]
fn timestamps_are_scaled_to_millis(seconds: Vec<u32>) -> TestResult {
    if seconds.is_empty() {
        return TestResult::discard();
    }
    let t: Vec<i64> = seconds.iter().map(|&s| i64::from(s)).collect();
    let prices: Vec<f64> = (0..t.len()).map(|i| i as f64 + 1.0).collect();
    let points = SeriesNormalizer::normalize(&series(t.clone(), prices.clone(), prices)).unwrap();

    TestResult::from_bool(
        points.len() == t.len()
            && points.iter().zip(&t).all(|(p, &s)| p.timestamp.value() == s as u64 * 1000),
    )
}

#[test]
fn seconds_that_overflow_milliseconds_are_rejected() {
    let raw = series(vec![1_729_209_600, i64::MAX], vec![1.0, 2.0], vec![1.0, 2.0]);
    assert_eq!(SeriesNormalizer::normalize(&raw), Err(ChartError::InvalidTimestamp { index: 1, value: i64::MAX }));
}

#[test]
fn order_is_preserved() {
    let points =
        SeriesNormalizer::normalize(&series(vec![30, 10, 20], vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0])).unwrap();
    let closes: Vec<f64> = points.iter().map(|p| p.close()).collect();
    assert_eq!(closes, vec![4.0, 5.0, 6.0]);
    assert_eq!(points[0].timestamp.value(), 30_000);
}

#[test]
fn empty_series_is_rejected() {
    assert_eq!(SeriesNormalizer::normalize(&RawSeries::default()), Err(ChartError::EmptySeries));
    assert_eq!(RangeReducer::open_close_range(&[]), Err(ChartError::EmptySeries));
}

#[test]
fn short_channel_is_reported() {
    let mut raw = series(vec![1, 2], vec![1.0, 2.0], vec![1.0, 2.0]);
    raw.c.pop();
    assert_eq!(
        SeriesNormalizer::normalize(&raw),
        Err(ChartError::LengthMismatch { channel: "c", expected: 2, actual: 1 })
    );
}

#[test]
fn negative_timestamp_is_rejected() {
    let raw = series(vec![5, -1], vec![1.0, 2.0], vec![1.0, 2.0]);
    assert_eq!(SeriesNormalizer::normalize(&raw), Err(ChartError::InvalidTimestamp { index: 1, value: -1 }));
}

#[test]
fn volume_defaults_to_zero_when_absent() {
    let points = SeriesNormalizer::normalize(&series(vec![1], vec![1.0], vec![2.0])).unwrap();
    assert_eq!(points[0].ohlcv.volume.value(), 0.0);
}

#[test]
fn range_uses_open_and_close_not_wicks() {
    let mut raw = series(vec![1, 2], vec![10.0, 12.0], vec![11.0, 9.0]);
    raw.h = vec![100.0, 100.0];
    raw.l = vec![1.0, 1.0];
    let points = SeriesNormalizer::normalize(&raw).unwrap();
    assert_eq!(RangeReducer::open_close_range(&points), Ok((9.0, 12.0)));
}
