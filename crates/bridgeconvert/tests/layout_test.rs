// crates/bridgeconvert/tests/layout_test.rs

use bridgeconvert::layout::{self, LayoutConfig};
use bridgecore::Position;
use std::collections::HashSet;

#[test]
fn test_default_grid() {
    assert_eq!(layout::assign(0), Position::new(100.0, 100.0));
    assert_eq!(layout::assign(1), Position::new(450.0, 300.0));
    assert_eq!(layout::assign(2), Position::new(800.0, 500.0));
    assert_eq!(layout::assign(3), Position::new(1150.0, 100.0));
}

#[test]
fn test_positions_never_repeat() {
    let config = LayoutConfig::default();
    let mut seen = HashSet::new();

    for index in 0..500 {
        let p = config.assign(index);
        assert!(seen.insert((p.x.to_bits(), p.y.to_bits())), "index {} repeated", index);
    }
}

#[test]
fn test_zero_rows_behaves_as_single_row() {
    let config = LayoutConfig::default().with_rows(0);

    assert_eq!(config.assign(4), Position::new(1500.0, 100.0));
}

#[test]
fn test_config_round_trips_through_json() {
    let config = LayoutConfig::default().with_spacing(50.0, 25.0);

    let json = serde_json::to_string(&config).unwrap();
    let back: LayoutConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(back, config);
    assert_eq!(back.assign(1), Position::new(150.0, 125.0));
}
