use temp_heatmap::{ColorBand, Dataset, Layout, Sample, Scales};

fn dataset(years: std::ops::RangeInclusive<i32>) -> Dataset {
    let mut samples = Vec::new();
    for year in years {
        for month in 1..=12 {
            samples.push(Sample {
                year,
                month,
                variance: ((year * 12 + month as i32) % 17) as f64 / 4.0 - 2.0,
            });
        }
    }
    Dataset::new(8.66, samples).unwrap()
}

fn scales_for(ds: &Dataset) -> (ColorBand, Scales) {
    let band = ColorBand::from_dataset(ds).unwrap();
    let scales = Scales::build(ds, &band, &Layout::default());
    (band, scales)
}

#[test]
fn time_scale_spans_padded_width_and_is_monotonic() {
    let ds = dataset(1753..=2015);
    let (_, scales) = scales_for(&ds);
    assert_eq!(scales.time.map(1753.0), 100.0);
    assert_eq!(scales.time.map(2015.0), 1500.0);
    let xs: Vec<f64> = (1753..=2015).map(|y| scales.time.map(y as f64)).collect();
    assert!(xs.windows(2).all(|w| w[0] <= w[1]));
    assert!((scales.cell_width() - 1400.0 / 262.0).abs() < 1e-9);
}

#[test]
fn month_scale_has_twelve_equal_bands_in_calendar_order() {
    let ds = dataset(1900..=1910);
    let (_, scales) = scales_for(&ds);
    let m = scales.month;
    let bw = m.bandwidth();
    assert!((bw - 340.0 / 12.0).abs() < 1e-9);
    let starts: Vec<f64> = (1..=12).map(|k| m.position(k).unwrap()).collect();
    assert_eq!(starts[0], 30.0);
    for w in starts.windows(2) {
        // Next band starts exactly where the previous one ends: no gaps, no overlap.
        assert!((w[1] - (w[0] + bw)).abs() < 1e-9);
    }
    assert!((starts[11] + bw - 370.0).abs() < 1e-9);
}

#[test]
fn legend_scale_covers_color_domain() {
    let ds = dataset(1900..=1910);
    let (band, scales) = scales_for(&ds);
    let (min, max) = band.domain();
    assert_eq!(scales.legend.map(min), 20.0);
    assert!((scales.legend.map(max) - 380.0).abs() < 1e-9);
    for w in band.boundaries().windows(2) {
        assert!(scales.legend.map(w[0]) < scales.legend.map(w[1]));
    }
}

#[test]
fn single_year_dataset_still_has_width() {
    let ds = dataset(1999..=1999);
    let (_, scales) = scales_for(&ds);
    assert_eq!(scales.time.domain, (1998.0, 2000.0));
    assert!(scales.cell_width() > 0.0);
}

#[test]
fn custom_layout_moves_ranges() {
    let ds = dataset(1900..=1901);
    let band = ColorBand::from_dataset(&ds).unwrap();
    let layout = Layout {
        width: 800,
        height: 300,
        ..Layout::default()
    };
    let scales = Scales::build(&ds, &band, &layout);
    assert_eq!(scales.time.range, (100.0, 700.0));
    assert_eq!((scales.month.start, scales.month.end), (30.0, 270.0));
    assert_eq!(layout.canvas_size(), (800, 48 + 60 + 300));
}
