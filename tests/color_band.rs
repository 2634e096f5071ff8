use temp_heatmap::{ColorBand, DEFAULT_PALETTE, Dataset, Sample};

fn sample_band() -> ColorBand {
    // Domain 1.684 .. 13.888, as in the full monthly record.
    let values = [1.684, 2.3, 5.0, 7.77, 8.66, 9.1, 11.0, 13.888];
    ColorBand::build(&values, &DEFAULT_PALETTE).unwrap()
}

fn grid(band: &ColorBand, steps: usize) -> Vec<f64> {
    let (min, max) = band.domain();
    (0..=steps)
        .map(|i| min + (max - min) * i as f64 / steps as f64)
        .collect()
}

#[test]
fn boundaries_strictly_increase_and_split_domain_evenly() {
    let band = sample_band();
    let (min, max) = band.domain();
    assert_eq!(band.boundaries().len(), DEFAULT_PALETTE.len() - 1);
    assert!(band.boundaries().windows(2).all(|w| w[0] < w[1]));
    let step = (max - min) / 11.0;
    for (k, b) in band.boundaries().iter().enumerate() {
        let expected = min + (k as f64 + 1.0) * step;
        assert!((b - expected).abs() < 1e-9, "boundary {k}: {b} vs {expected}");
    }
}

#[test]
fn every_value_gets_exactly_one_palette_color() {
    let band = sample_band();
    for v in grid(&band, 1000) {
        let c = band.color_for(v);
        assert_eq!(DEFAULT_PALETTE.iter().filter(|p| **p == c).count(), 1);
        let containing = band.bands().iter().filter(|b| b.contains(v)).count();
        assert_eq!(containing, 1, "value {v} covered by {containing} bands");
    }
}

#[test]
fn domain_ends_map_to_first_and_last_colors() {
    let band = sample_band();
    let (min, max) = band.domain();
    assert_eq!(band.color_for(min), DEFAULT_PALETTE[0]);
    assert_eq!(band.color_for(min + 1e-9), DEFAULT_PALETTE[0]);
    assert_eq!(band.color_for(max), DEFAULT_PALETTE[10]);
    // Outside the domain: clamp to the end colors.
    assert_eq!(band.color_for(min - 50.0), DEFAULT_PALETTE[0]);
    assert_eq!(band.color_for(max + 50.0), DEFAULT_PALETTE[10]);
}

#[test]
fn intervals_are_right_open() {
    let band = sample_band();
    let b = band.boundaries()[3];
    assert_eq!(band.bucket_index(b), 4);
    assert_eq!(band.bucket_index(b - 1e-9), 3);
}

#[test]
fn range_for_contains_its_values() {
    let band = sample_band();
    for v in grid(&band, 777) {
        let range = band.range_for(band.color_for(v)).unwrap();
        assert!(range.contains(v), "{v} not in [{}, {})", range.low, range.high);
    }
}

#[test]
fn bands_tile_the_domain() {
    let band = sample_band();
    let bands = band.bands();
    let (min, max) = band.domain();
    assert_eq!(bands.first().unwrap().low, min);
    assert_eq!(bands.last().unwrap().high, max);
    for w in bands.windows(2) {
        assert_eq!(w[0].high, w[1].low);
    }
}

#[test]
fn from_dataset_uses_absolute_temperatures() {
    let ds = Dataset::new(
        8.66,
        vec![
            Sample {
                year: 1753,
                month: 1,
                variance: -6.76,
            },
            Sample {
                year: 1753,
                month: 2,
                variance: 2.0,
            },
        ],
    )
    .unwrap();
    let band = ColorBand::from_dataset(&ds).unwrap();
    let (min, max) = band.domain();
    assert!((min - 1.90).abs() < 1e-9);
    assert!((max - 10.66).abs() < 1e-9);
    assert_eq!(band.color_for(1.90), DEFAULT_PALETTE[0]);
}
