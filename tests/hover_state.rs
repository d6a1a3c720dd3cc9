use pyth_price_chart::domain::{
    chart::{HoverPhase, TrendDirection, TrendTracker},
    errors::ChartError,
    market_data::{OHLCV, Price, PricePoint, Timestamp, Volume},
};

fn points(closes: &[f64]) -> Vec<PricePoint> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            PricePoint::new(
                Timestamp::from_millis(i as u64 * 1000),
                OHLCV::new(Price::from(close), Price::from(close), Price::from(close), Price::from(close), Volume::from(0.0)),
            )
        })
        .collect()
}

#[test]
fn idle_tracker_has_no_trend() {
    let mut tracker = TrendTracker::new();
    assert_eq!(tracker.phase(), HoverPhase::Idle);
    assert_eq!(tracker.trend(), Err(ChartError::EmptySeries));

    tracker.pointer_enter();
    assert_eq!(tracker.phase(), HoverPhase::Idle);
}

#[test]
fn loading_an_empty_series_fails() {
    let mut tracker = TrendTracker::new();
    assert_eq!(tracker.load(&[]), Err(ChartError::EmptySeries));
    assert_eq!(tracker.phase(), HoverPhase::Idle);
}

#[test]
fn hover_cycle_keeps_the_reference() {
    let mut tracker = TrendTracker::new();
    tracker.load(&points(&[100.0, 95.0, 120.0])).unwrap();
    assert_eq!(tracker.phase(), HoverPhase::Loaded);
    assert_eq!(tracker.current_value(), 120.0);
    assert_eq!(tracker.trend().unwrap().direction, TrendDirection::Up);

    tracker.pointer_enter();
    assert!(tracker.is_hovering());
    tracker.pointer_move(95.0);
    assert_eq!(tracker.current_value(), 95.0);
    assert_eq!(tracker.reference_value(), 100.0);
    assert_eq!(tracker.trend().unwrap().direction, TrendDirection::Down);

    tracker.pointer_move(100.0);
    assert_eq!(tracker.trend().unwrap().direction, TrendDirection::Down);

    tracker.pointer_leave();
    assert_eq!(tracker.phase(), HoverPhase::Loaded);
    assert_eq!(tracker.current_value(), 120.0);
    assert_eq!(tracker.reference_value(), 100.0);
}

#[test]
fn moves_outside_a_hover_are_ignored() {
    let mut tracker = TrendTracker::new();
    tracker.load(&points(&[10.0, 20.0])).unwrap();
    tracker.pointer_move(5.0);
    assert_eq!(tracker.current_value(), 20.0);
}

#[test]
fn reloading_resets_the_hover() {
    let mut tracker = TrendTracker::new();
    tracker.load(&points(&[10.0, 20.0])).unwrap();
    tracker.pointer_enter();
    tracker.pointer_move(15.0);

    tracker.load(&points(&[50.0, 40.0])).unwrap();
    assert_eq!(tracker.phase(), HoverPhase::Loaded);
    assert_eq!(tracker.reference_value(), 50.0);
    assert_eq!(tracker.current_value(), 40.0);
}
