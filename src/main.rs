use anyhow::{Context, Result};
use clap::Parser;
use scatterplot::palette::MARKER_ALPHA;
use scatterplot::{
    parse_color_list, ColorAssigner, FieldRole, FieldSelection, JsonTarget, OutputFormat,
    PaletteColorAssigner, PlotAdapter, Presentation, RandomColorAssigner, Table,
};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scatterplot")]
#[command(about = "Group tabular data into a colored scatter chart spec", long_about = None)]
struct Args {
    /// Column for the x axis (name or zero-based index)
    #[arg(short, long)]
    x: String,

    /// Column for the y axis (name or zero-based index)
    #[arg(short, long)]
    y: String,

    /// Column whose values split points into series
    #[arg(short, long)]
    category: String,

    /// Read the table from a file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Field delimiter for delimited input ("\t" for TSV)
    #[arg(short, long, default_value = ",")]
    delimiter: String,

    /// Input is host table JSON ({columns, rows}) instead of delimited text
    #[arg(long)]
    json_table: bool,

    /// Presentation options JSON file
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Comma separated colors for the series (#rrggbb, rgb(), rgba())
    #[arg(long, conflicts_with = "random_colors")]
    palette: Option<String>,

    /// Random dark blue colors instead of a fixed palette
    #[arg(long)]
    random_colors: bool,

    /// Seed for --random-colors
    #[arg(long, requires = "random_colors")]
    seed: Option<u64>,

    /// Marker translucency applied to series colors
    #[arg(long, default_value_t = MARKER_ALPHA, value_parser = parse_alpha)]
    alpha: f64,

    /// Output shape
    #[arg(long, value_enum, default_value_t = OutputFormat::Highcharts)]
    format: OutputFormat,

    /// Surface id written alongside the chart
    #[arg(long, default_value = "scatter-plot")]
    target: String,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let table = read_table(&args).context("Failed to read table")?;

    let presentation = match &args.theme {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open theme file {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse theme file {}", path.display()))?
        }
        None => Presentation::default(),
    };

    let colors = build_colors(&args)?;
    let output = JsonTarget::new(io::stdout(), args.format).pretty(args.pretty);

    let mut adapter = PlotAdapter::new(args.target.clone(), output)
        .with_colors(colors)
        .with_presentation(presentation);

    for (role, spec) in [
        (FieldRole::XAxis, &args.x),
        (FieldRole::YAxis, &args.y),
        (FieldRole::Category, &args.category),
    ] {
        let selection = FieldSelection::resolve(&table, spec)
            .with_context(|| format!("Failed to resolve {:?} column '{}'", role, spec))?;
        adapter.field_selector_mut().set(role, Some(selection));
    }

    if adapter.render(&table).is_none() {
        anyhow::bail!("Field selection is incomplete");
    }

    Ok(())
}

fn read_table(args: &Args) -> Result<Table> {
    let mut text = String::new();
    match &args.input {
        Some(path) => {
            File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?
                .read_to_string(&mut text)?;
        }
        None => {
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
        }
    }

    if args.json_table {
        let value: serde_json::Value =
            serde_json::from_str(&text).context("Input is not valid JSON")?;
        return Ok(Table::from_json(&value)?);
    }

    let delimiter = parse_delimiter(&args.delimiter)?;
    Ok(Table::from_delimited(text.as_bytes(), delimiter)?)
}

fn parse_delimiter(raw: &str) -> Result<u8> {
    match raw {
        "\\t" | "tab" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        s => anyhow::bail!("Delimiter must be a single ASCII character, got '{}'", s),
    }
}

fn build_colors(args: &Args) -> Result<Box<dyn ColorAssigner>> {
    if args.random_colors {
        let random = match args.seed {
            Some(seed) => RandomColorAssigner::seeded(seed),
            None => RandomColorAssigner::new(),
        };
        return Ok(Box::new(random.with_alpha(args.alpha)));
    }

    match &args.palette {
        Some(list) => {
            let colors = parse_color_list(list).context("Invalid --palette")?;
            Ok(Box::new(PaletteColorAssigner::new(colors, args.alpha)))
        }
        None => Ok(Box::new(PaletteColorAssigner::default().with_alpha(args.alpha))),
    }
}

/// Alpha must be a number between 0 and 1
fn parse_alpha(raw: &str) -> Result<f64, String> {
    let alpha: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if (0.0..=1.0).contains(&alpha) {
        Ok(alpha)
    } else {
        Err(format!("alpha must be between 0 and 1, got {}", raw))
    }
}
