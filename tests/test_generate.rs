use smartval::application::generate_data::{GeneratorConfig, MarketDataGenerator};
use smartval::domain::entities::market_record::MarketRecord;
use smartval::domain::values::brand_tier::BrandTier;
use smartval::domain::values::condition::Condition;
use smartval::infrastructure::dataset::csv_store::read_dataset;

fn batch(samples: usize, seed: u64) -> Vec<MarketRecord> {
    MarketDataGenerator::new(GeneratorConfig {
        samples,
        seed: Some(seed),
        ..GeneratorConfig::default()
    })
    .unwrap()
    .generate()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    sum / n as f64
}

fn retained(r: &MarketRecord) -> f64 {
    r.resale_price / r.original_price
}

#[test]
fn test_resale_never_exceeds_original() {
    for seed in 0..5 {
        for r in batch(2000, seed) {
            assert!(r.resale_price <= r.original_price, "{r:?}");
            assert!(r.resale_price >= 0.0);
        }
    }
}

#[test]
fn test_depreciation_capped_at_ninety_percent() {
    // 90% max depreciation, then at most 5% noise below that
    for r in batch(5000, 9) {
        assert!(retained(&r) >= 0.10 * 0.95 - 1e-4, "{r:?}");
    }
}

#[test]
fn test_tier_is_a_price_signal() {
    let records = batch(6000, 1);
    let by_tier: Vec<f64> = BrandTier::ALL
        .iter()
        .map(|t| mean(records.iter().filter(|r| r.brand_tier == *t).map(|r| r.original_price)))
        .collect();
    assert!(by_tier.windows(2).all(|w| w[0] < w[1]), "{by_tier:?}");
}

#[test]
fn test_value_falls_with_age() {
    let records = batch(20_000, 5);
    for tier in BrandTier::ALL {
        let by_age: Vec<f64> = (0..=10)
            .map(|age| {
                mean(
                    records
                        .iter()
                        .filter(|r| r.brand_tier == tier && r.age == age)
                        .map(retained),
                )
            })
            .collect();
        for pair in by_age.windows(2) {
            assert!(pair[1] <= pair[0] + 0.02, "{tier}: {by_age:?}");
        }
        assert!(by_age[0] > by_age[10] + 0.3, "{tier}: {by_age:?}");
    }
}

#[test]
fn test_value_rises_with_condition() {
    let records = batch(20_000, 6);
    // Young items only, so the 90% cap does not flatten the condition effect
    let by_condition: Vec<f64> = Condition::ALL
        .iter()
        .map(|c| {
            mean(
                records
                    .iter()
                    .filter(|r| r.condition == *c && r.age <= 1)
                    .map(retained),
            )
        })
        .collect();
    assert!(by_condition.windows(2).all(|w| w[1] > w[0]), "{by_condition:?}");
}

#[test]
fn test_dataset_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("market_data.csv");
    let written = smartval::generate_dataset(
        GeneratorConfig {
            samples: 300,
            seed: Some(77),
            ..GeneratorConfig::default()
        },
        &path,
    )
    .unwrap();

    let header = std::fs::read_to_string(&path).unwrap();
    assert!(header.starts_with("original_price,age,condition,brand_tier,resale_price"));

    let read = read_dataset(&path).unwrap();
    assert_eq!(read.len(), 300);
    assert_eq!(read, written);
}
