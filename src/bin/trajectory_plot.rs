use clap::Parser;
use csv::ReaderBuilder;
use plotters::prelude::*;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render the x/y track of a propagated trajectory CSV"
)]
struct Cli {
    #[arg(long)]
    input: String,
    #[arg(long, default_value = "artifacts/trajectory.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 900)]
    width: u32,
    #[arg(long, default_value_t = 900)]
    height: u32,
    /// Draw the primary's surface circle with this radius (simulation units)
    #[arg(long)]
    primary_radius: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let points = read_track(&cli.input)?;
    if points.is_empty() {
        return Err(anyhow::anyhow!("No finite trajectory points in the provided CSV"));
    }
    log::info!("plotting {} trajectory points from {}", points.len(), cli.input);

    let mut extent = points
        .iter()
        .fold(0.0_f64, |acc, &(x, y)| acc.max(x.abs()).max(y.abs()));
    if let Some(radius) = cli.primary_radius {
        extent = extent.max(radius);
    }
    if extent <= 0.0 {
        extent = 1.0;
    }
    let extent = extent * 1.1;

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 16.0, FontStyle::Normal);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Trajectory (x/y)".to_string(), caption_font)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;

    chart
        .configure_mesh()
        .x_desc("x (sim units)")
        .y_desc("y (sim units)")
        .label_style(label_font)
        .x_labels(6)
        .y_labels(6)
        .draw()?;

    if let Some(radius) = cli.primary_radius {
        let outline: Vec<(f64, f64)> = (0..=360)
            .map(|deg| {
                let theta = (deg as f64).to_radians();
                (radius * theta.cos(), radius * theta.sin())
            })
            .collect();
        chart.draw_series(std::iter::once(PathElement::new(
            outline,
            ShapeStyle::from(&RGBColor(40, 90, 200)).stroke_width(2),
        )))?;
    }

    chart.draw_series(std::iter::once(PathElement::new(
        points.clone(),
        ShapeStyle::from(&RGBColor(210, 100, 20)).stroke_width(2),
    )))?;

    let (x0, y0) = points[0];
    let (x1, y1) = points[points.len() - 1];
    chart.draw_series(std::iter::once(Circle::new((x0, y0), 5, GREEN.filled())))?;
    chart.draw_series(std::iter::once(Circle::new((x1, y1), 5, RED.filled())))?;

    root.present()?;
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn read_track(path: &str) -> anyhow::Result<Vec<(f64, f64)>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("CSV missing '{}' column", name))
    };
    let x_idx = column("x")?;
    let y_idx = column("y")?;

    let mut points = Vec::new();
    for rec in rdr.records() {
        let r = rec?;
        let x: f64 = r.get(x_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        let y: f64 = r.get(y_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        if x.is_finite() && y.is_finite() {
            points.push((x, y));
        }
    }
    Ok(points)
}
