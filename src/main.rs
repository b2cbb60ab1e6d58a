use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use chartstrip::pager::paginate_png_file;
use chartstrip::renderer::PAGE_BACKGROUND;
use chartstrip::{
    parse_chart_file, render_chart_to_svg, render_layout_to_svg, summarize, ChartError,
    RenderConfig,
};

#[derive(Parser, Debug)]
#[command(
    name = "chartstrip",
    about = "Render a rhythm-game chart into a paged scrolling layout"
)]
struct Args {
    /// Chart file (JSON), or a rasterized layout PNG with --paginate-png
    chart: PathBuf,

    /// Output path. Defaults to the chart path with an .svg extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render config JSON file; flags below override its fields.
    #[arg(long, env = "CHARTSTRIP_CONFIG")]
    config: Option<PathBuf>,

    /// Height of one output page in pixels
    #[arg(long)]
    page_height: Option<u32>,

    /// Pixels per second of chart time
    #[arg(long)]
    height_factor: Option<f64>,

    /// Width of the note track in pixels
    #[arg(long)]
    track_width: Option<f64>,

    /// Write the full layout as one tall SVG instead of paging it
    #[arg(long)]
    unpaged: bool,

    /// Print the analysis summary as JSON instead of rendering
    #[arg(long)]
    summary: bool,

    /// Treat the input as an already rasterized layout PNG and page it
    #[arg(long, conflicts_with_all = ["summary", "unpaged"])]
    paginate_png: bool,
}

fn load_config(args: &Args) -> Result<RenderConfig, ChartError> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    if let Some(h) = args.page_height {
        config.page_height = h;
    }
    if let Some(f) = args.height_factor {
        config.height_factor = f;
    }
    if let Some(w) = args.track_width {
        config.track_width = w;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<(), ChartError> {
    let config = load_config(args)?;

    if args.paginate_png {
        let output = args
            .output
            .clone()
            .unwrap_or_else(|| args.chart.with_extension("pages.png"));
        let plan = paginate_png_file(
            &args.chart,
            &output,
            config.page_height,
            PAGE_BACKGROUND.to_rgba(),
        )?;
        log::info!("wrote {} ({} pages)", output.display(), plan.page_count);
        return Ok(());
    }

    let chart = parse_chart_file(&args.chart)?;

    if args.summary {
        let summary = summarize(&chart, &config)?;
        println!("{}", chartstrip::summary::summary_to_json(&summary)?);
        return Ok(());
    }

    let svg = if args.unpaged {
        render_layout_to_svg(&chart, &config)?
    } else {
        render_chart_to_svg(&chart, &config)?
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.chart.with_extension("svg"));
    std::fs::write(&output, svg).map_err(|source| ChartError::Io {
        path: output.clone(),
        source,
    })?;
    log::info!("wrote {}", output.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
