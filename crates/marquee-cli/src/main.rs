use futures::executor::block_on;
use marquee::render::raster::{RasterError, RasterOptions};
use marquee::render::{ChartError, LayoutOptions, SvgRenderOptions};
use marquee::{ChartConfig, Dataset};
use serde::Serialize;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Data(marquee::Error),
    Chart(ChartError),
    Raster(RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Data(err) => write!(f, "{err}"),
            CliError::Chart(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<marquee::Error> for CliError {
    fn from(value: marquee::Error) -> Self {
        Self::Data(value)
    }
}

impl From<ChartError> for CliError {
    fn from(value: ChartError) -> Self {
        Self::Chart(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Summary,
    Layout,
    Render,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
    Pdf,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    url: Option<String>,
    pretty: bool,
    width: Option<f64>,
    height: Option<f64>,
    legend_band: Option<f64>,
    padding: Option<f64>,
    static_output: bool,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    chart_id: Option<String>,
    out: Option<String>,
}

#[derive(Serialize)]
struct SummaryOut<'a> {
    title: &'a str,
    description: &'a str,
    item_count: usize,
    category_count: usize,
    categories: &'a [String],
}

fn usage() -> &'static str {
    "marquee-cli\n\
\n\
USAGE:\n\
  marquee-cli [summary] [--pretty] [<path>|-|--url <url>]\n\
  marquee-cli layout [--pretty] [--width <px>] [--height <px>] [--legend-band <px>] [--padding <px>] [<path>|-|--url <url>]\n\
  marquee-cli render [--format svg|png|jpg|pdf] [--scale <n>] [--background <css-color>] [--static] [--width <px>] [--height <px>] [--legend-band <px>] [--padding <px>] [--id <chart-id>] [--out <path>] [<path>|-|--url <url>]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the dataset JSON is read from stdin.\n\
  - --url fetches the dataset JSON over HTTP instead of reading a file.\n\
  - summary prints the title, description, and category list as JSON.\n\
  - layout prints the computed tile/legend geometry as JSON.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - --static drops the tooltip and hover script from SVG output.\n\
  - PNG output defaults to writing next to the input file (or ./out.png for stdin).\n\
  - JPG output defaults to writing next to the input file (or ./out.jpg for stdin).\n\
  - PDF output defaults to writing next to the input file (or ./out.pdf for stdin).\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Summary,
        render_format: RenderFormat::Svg,
        render_scale: 1.0,
        ..Default::default()
    };

    fn next_f64(
        it: &mut std::iter::Peekable<std::iter::Skip<std::slice::Iter<'_, String>>>,
    ) -> Result<f64, CliError> {
        let Some(raw) = it.next() else {
            return Err(CliError::Usage(usage()));
        };
        raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))
    }

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "summary" => args.command = Command::Summary,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--static" => args.static_output = true,
            "--url" => {
                let Some(url) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.url = Some(url.clone());
            }
            "--width" => args.width = Some(next_f64(&mut it)?),
            "--height" => args.height = Some(next_f64(&mut it)?),
            "--legend-band" => args.legend_band = Some(next_f64(&mut it)?),
            "--padding" => args.padding = Some(next_f64(&mut it)?),
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.chart_id = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                while it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.url.is_some() && args.input.is_some() {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn load_dataset(args: &Args) -> Result<Dataset, CliError> {
    if let Some(url) = args.url.as_deref() {
        return Ok(block_on(marquee::fetch_dataset(url))?);
    }
    match args.input.as_deref() {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(Dataset::from_json_str(&buf)?)
        }
        Some(path) => Ok(block_on(marquee::load_dataset(std::path::Path::new(path)))?),
    }
}

fn build_config(args: &Args) -> ChartConfig {
    let mut config = ChartConfig::default();
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(band) = args.legend_band {
        config.legend_band = band;
    }
    if let Some(padding) = args.padding {
        config.padding = padding;
    }
    config
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn write_bytes(bytes: &[u8], out: &str) -> Result<(), CliError> {
    if out == "-" {
        use std::io::Write;
        std::io::stdout().lock().write_all(bytes)?;
    } else {
        std::fs::write(out, bytes)?;
    }
    Ok(())
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension(ext),
        _ => std::path::PathBuf::from(format!("out.{ext}")),
    }
}

fn raster_out(args: &Args, ext: &str) -> String {
    args.out.clone().unwrap_or_else(|| {
        default_raster_out_path(args.input.as_deref(), ext)
            .to_string_lossy()
            .to_string()
    })
}

fn run(args: Args) -> Result<(), CliError> {
    let dataset = load_dataset(&args)?;
    let config = build_config(&args);

    match args.command {
        Command::Summary => {
            let summary = marquee::summarize(&dataset);
            let description = marquee::describe(&dataset, &summary);
            let out = SummaryOut {
                title: &dataset.name,
                description: &description,
                item_count: summary.item_count,
                category_count: summary.category_count,
                categories: &summary.categories,
            };
            write_json(&out, args.pretty)?;
            Ok(())
        }
        Command::Layout => {
            let layout =
                marquee::render::layout_chart(&dataset, &config, &LayoutOptions::default())
                    .map_err(ChartError::from)?;
            write_json(&layout, args.pretty)?;
            Ok(())
        }
        Command::Render => {
            let layout_options = LayoutOptions::default();
            let svg_options = SvgRenderOptions {
                chart_id: args.chart_id.clone(),
                interactive: !args.static_output,
                ..Default::default()
            };
            let raster_options = RasterOptions {
                scale: args.render_scale,
                background: args.background.clone(),
                ..Default::default()
            };

            match args.render_format {
                RenderFormat::Svg => {
                    let svg = marquee::render::render_svg_sync(
                        &dataset,
                        &config,
                        &layout_options,
                        &svg_options,
                    )?;
                    write_text(&svg, args.out.as_deref())?;
                }
                RenderFormat::Png => {
                    let bytes = marquee::render::raster::render_png_sync(
                        &dataset,
                        &config,
                        &layout_options,
                        &svg_options,
                        &raster_options,
                    )?;
                    write_bytes(&bytes, &raster_out(&args, "png"))?;
                }
                RenderFormat::Jpeg => {
                    let bytes = marquee::render::raster::render_jpeg_sync(
                        &dataset,
                        &config,
                        &layout_options,
                        &svg_options,
                        &raster_options,
                    )?;
                    write_bytes(&bytes, &raster_out(&args, "jpg"))?;
                }
                RenderFormat::Pdf => {
                    let bytes = marquee::render::raster::render_pdf_sync(
                        &dataset,
                        &config,
                        &layout_options,
                        &svg_options,
                    )?;
                    write_bytes(&bytes, &raster_out(&args, "pdf"))?;
                }
            }
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
