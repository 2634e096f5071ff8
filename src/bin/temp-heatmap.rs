use anyhow::{Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use temp_heatmap::viz::{self, HoverHandler, RenderOptions, Tooltip};
use temp_heatmap::{Client, ColorBand, Dataset, Layout, Scales, stats, storage};

#[derive(Parser, Debug)]
#[command(
    name = "temp-heatmap",
    version,
    about = "Render monthly global temperature variance as a banded heat map"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the dataset and write the heat map (and optionally hover regions and cells).
    Render(RenderArgs),
    /// Print each color band's range, color and cell count, plus summary statistics.
    Bands(SourceArgs),
    /// Hover one cell and print its tooltip.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Dataset URL.
    #[arg(long, default_value = temp_heatmap::api::DEFAULT_URL)]
    url: String,
    /// Read the dataset from a local JSON file instead of the URL.
    #[arg(short, long, conflicts_with = "url")]
    input: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Output path (.svg or .png).
    #[arg(short, long)]
    out: PathBuf,
    /// Width of the heat-map area (default 1600).
    #[arg(long, default_value_t = 1600)]
    width: u32,
    /// Height of the heat-map area (default 400).
    #[arg(long, default_value_t = 400)]
    height: u32,
    /// Write hover regions and tooltip text as JSON.
    #[arg(long)]
    hover_json: Option<PathBuf>,
    /// Write every cell (year, month, temperature, color) as CSV.
    #[arg(long)]
    cells_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    source: SourceArgs,
    #[arg(long)]
    year: i32,
    /// Calendar month, 1 = January.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: u32,
}

fn load(source: &SourceArgs) -> Result<Dataset> {
    match &source.input {
        Some(path) => storage::load_json(path),
        None => Client::with_url(source.url.clone()).fetch(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Bands(args) => cmd_bands(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let options = RenderOptions {
        layout: Layout {
            width: args.width,
            height: args.height,
            ..Layout::default()
        },
    };
    options.layout.validate()?;
    let dataset = load(&args.source)?;

    let hover = viz::plot_heatmap(&dataset, &args.out, &options)?;
    eprintln!("Wrote heat map to {}", args.out.display());

    if let Some(path) = args.hover_json.as_ref() {
        storage::save_hover_json(&hover, path)?;
        eprintln!("Saved {} hover regions to {}", hover.len(), path.display());
    }
    if let Some(path) = args.cells_csv.as_ref() {
        storage::save_cells_csv(&hover.regions, path)?;
        eprintln!("Saved {} cells to {}", hover.len(), path.display());
    }
    Ok(())
}

fn cmd_bands(args: SourceArgs) -> Result<()> {
    let dataset = load(&args)?;
    let band = ColorBand::from_dataset(&dataset)?;
    for bc in stats::band_counts(&dataset, &band) {
        let close = if bc.band.last { ']' } else { ')' };
        println!(
            "{:>2}  {}  [{:.3}, {:.3}{}  cells={}",
            bc.band.index, bc.band.color, bc.band.low, bc.band.high, close, bc.count
        );
    }
    let s = stats::summary(&dataset);
    println!(
        "count={} min={:.3} max={:.3} mean={:.3} median={:.3}",
        s.count, s.min, s.max, s.mean, s.median
    );
    Ok(())
}

/// Prints the tooltip on enter, like the overlay would show it.
struct PrintTooltip(Tooltip);

impl HoverHandler for PrintTooltip {
    fn on_enter(&mut self, cell: &viz::Cell, pointer: (i32, i32)) {
        self.0.on_enter(cell, pointer);
        for line in &self.0.lines {
            println!("{line}");
        }
        println!("fill {}", cell.color);
    }

    fn on_leave(&mut self) {
        self.0.on_leave();
    }
}

fn cmd_inspect(args: InspectArgs) -> Result<()> {
    let dataset = load(&args.source)?;
    let layout = Layout::default();
    let band = ColorBand::from_dataset(&dataset)?;
    let scales = Scales::build(&dataset, &band, &layout);

    // Cells in canvas coordinates, as the rendered figure places them.
    let (dx, dy) = layout.chart_origin();
    let mut hover = viz::HoverMap::new(layout.canvas_size());
    for cell in viz::cells(&dataset, &band, &scales) {
        let rect = cell.rect.translate(dx, dy);
        hover.push(viz::Cell { rect, ..cell });
    }

    let cell = hover
        .find(args.year, args.month)
        .cloned()
        .ok_or_else(|| anyhow!("no sample for {}-{:02}", args.year, args.month))?;
    let (cx, cy) = (
        (cell.rect.x + cell.rect.w / 2.0) as i32,
        (cell.rect.y + cell.rect.h / 2.0) as i32,
    );

    let mut handler = PrintTooltip(Tooltip::new(hover.canvas));
    hover.pointer_moved(cx, cy, &mut handler);
    if !handler.0.visible {
        bail!("cell {}-{:02} is too small to hover", args.year, args.month);
    }
    if hover.active() != Some(&cell) {
        bail!("cell {}-{:02} is covered by another cell", args.year, args.month);
    }
    hover.pointer_left(&mut handler);
    Ok(())
}
