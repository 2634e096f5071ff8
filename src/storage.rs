use crate::models::{Dataset, RawDataset, month_name};
use crate::viz::{Cell, HoverMap};
use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Load a dataset saved in the same JSON shape the dataset URL serves.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let raw: RawDataset = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {}", path.display()))?;
    let dataset = Dataset::try_from(raw)
        .with_context(|| format!("invalid dataset in {}", path.display()))?;
    log::info!(
        "loaded {} samples from {}",
        dataset.samples().len(),
        path.display()
    );
    Ok(dataset)
}

/// Save cells as CSV with header: `year,month,month_name,temperature,variance,color`.
pub fn save_cells_csv<P: AsRef<Path>>(cells: &[Cell], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("year", "month", "month_name", "temperature", "variance", "color"))?;
    for c in cells {
        wtr.serialize((
            c.sample.year,
            c.sample.month,
            month_name(c.sample.month).unwrap_or(""),
            c.temperature,
            c.sample.variance,
            c.color.hex(),
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct HoverRegion<'a> {
    #[serde(flatten)]
    cell: &'a Cell,
    tooltip: Vec<String>,
}

#[derive(Serialize)]
struct HoverDocument<'a> {
    canvas: (u32, u32),
    regions: Vec<HoverRegion<'a>>,
}

/// Save hover regions and their tooltip text as pretty JSON.
pub fn save_hover_json<P: AsRef<Path>>(hover: &HoverMap, path: P) -> Result<()> {
    let doc = HoverDocument {
        canvas: hover.canvas,
        regions: hover
            .regions
            .iter()
            .map(|cell| HoverRegion {
                cell,
                tooltip: cell.tooltip(),
            })
            .collect(),
    };
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(&doc)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
