//! Live dataset test. Run with: `cargo test --features online --test api_live -- --nocapture`
#![cfg(feature = "online")]

use temp_heatmap::{Client, ColorBand};

#[test]
fn fetch_full_record() {
    let ds = Client::default().fetch().expect("dataset fetch");
    assert!(ds.samples().len() > 3000);
    assert_eq!(ds.base_temperature(), 8.66);
    let (min_year, _) = ds.year_extent();
    assert_eq!(min_year, 1753);
    let band = ColorBand::from_dataset(&ds).unwrap();
    assert_eq!(band.boundaries().len(), 10);
}

#[test]
fn bad_url_is_an_error() {
    let client = Client::with_url(
        "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/no-such-file.json",
    );
    assert!(client.fetch().is_err());
}
