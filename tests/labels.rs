use pyth_price_chart::time_utils::{format_date_label, format_date_time, format_percent, format_price, format_usd};

#[test]
fn date_labels_are_utc() {
    insta::assert_snapshot!(format_date_label(1_729_209_600_000), @"Oct 18");
    insta::assert_snapshot!(format_date_label(1_704_067_200_000), @"Jan 1");
    insta::assert_snapshot!(format_date_label(1_735_689_599_000), @"Dec 31");
    insta::assert_snapshot!(format_date_time(1_729_213_200_000), @"Oct 18, 01:00 UTC");
}

#[test]
fn large_prices_drop_cents() {
    insta::assert_snapshot!(format_usd(68_123.456), @"$68,123");
    insta::assert_snapshot!(format_usd(1_234_567.0), @"$1,234,567");
}

#[test]
fn small_prices_keep_cents() {
    insta::assert_snapshot!(format_usd(9_999.994), @"$9,999.99");
    insta::assert_snapshot!(format_usd(142.5), @"$142.50");
    insta::assert_snapshot!(format_usd(0.0), @"$0.00");
}

#[test]
fn price_readout_shows_cents() {
    insta::assert_snapshot!(format_price(68_123.456), @"$68,123.46");
    insta::assert_snapshot!(format_price(1_234_567.0), @"$1,234,567.00");
    insta::assert_snapshot!(format_price(0.1234), @"$0.12");
}

#[test]
fn percent_has_two_decimals() {
    insta::assert_snapshot!(format_percent(10.0), @"10.00%");
    insta::assert_snapshot!(format_percent(-3.14159), @"-3.14%");
}
