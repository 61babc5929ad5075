use crate::config::SyntheticConfig;
use crate::scheduler::ValueSource;
use crate::test_utils::test_catalog;
use crate::SyntheticSource;

#[test]
fn generated_values_should_stay_within_configured_band() {
    let catalog = test_catalog(1);
    let (_, channel) = &catalog.channels()[0];
    let source = SyntheticSource::new(&SyntheticConfig {
        base_value: 20.0,
        spread: 10.0,
    });

    for _ in 0..1000 {
        let value = source.next_value("sensor_1", "temperature", channel).unwrap();
        assert!((20.0..30.0).contains(&value), "out of band: {}", value);
    }
}

#[test]
fn zero_spread_should_produce_constant_baseline() {
    let catalog = test_catalog(1);
    let (_, channel) = &catalog.channels()[0];
    let source = SyntheticSource::new(&SyntheticConfig {
        base_value: 17.5,
        spread: 0.0,
    });

    for _ in 0..10 {
        let value = source.next_value("sensor_1", "temperature", channel).unwrap();
        assert_eq!(value, 17.5);
    }
}
