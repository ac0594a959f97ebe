// File: crates/demo/src/main.rs
// Summary: Demo loads a token's history (JSON or CSV), renders both mini-charts to PNGs and prints the trends.

use anyhow::{Context, Result};
use minichart_core::{
    load_config, HistoryPoint, LogFormat, LoggingConfig, ManualSizeObserver, MetricSelector, MiniChart,
    MiniChartConfig, PixelSize, Primitives, RasterContainer, RasterProvider, TokenTrends,
};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(raw) = args.next() else {
        anyhow::bail!("usage: minichart-demo <history.json|history.csv> [config.json5]");
    };
    let config: MiniChartConfig = match args.next() {
        Some(p) => load_config(&p).with_context(|| format!("loading config '{p}'"))?,
        None => MiniChartConfig::default(),
    };
    init_logging(&config.logging);

    let path = PathBuf::from(raw);
    let history = load_history(&path).with_context(|| format!("failed to load history '{}'", path.display()))?;
    tracing::info!(points = history.len(), file = %path.display(), "history loaded");
    if history.is_empty() {
        tracing::warn!("history is empty; charts will be blank");
    }

    let styles = config.style_set()?;
    let estimator = config.estimator();
    // One registration for the whole process.
    let primitives = Primitives::standard();

    for selector in MetricSelector::ALL {
        let provider = RasterProvider::new();
        let stats = provider.stats();
        let observer = ManualSizeObserver::new();
        let container = RasterContainer::new(selector.label(), config.container);

        let mut chart = MiniChart::new(primitives, provider, observer.clone())
            .with_styles(styles.clone())
            .with_estimator(estimator)
            .with_padding(config.axis_padding);
        chart.mount(container.clone());

        let trend = chart.update(Some(&history), selector);
        if let (Some(first), Some(last)) = (chart.samples().first(), chart.samples().last()) {
            tracing::info!(
                metric = selector.label(),
                from = ?first.time(),
                to = ?last.time(),
                "series time extent"
            );
        }
        println!("{:<10} {:<8} ({} points)", selector.label(), trend.label(), chart.samples().len());
        write_png(&chart, &out_name(&path, selector.label(), "card"))?;

        // Card stretched to twice its width: same surface, new pixels.
        container.set_size(widened(config.container));
        observer.notify(&container);
        write_png(&chart, &out_name(&path, selector.label(), "wide"))?;

        chart.unmount();
        tracing::debug!(
            built = stats.surfaces_built(),
            live = stats.live_surfaces(),
            held = stats.held_contexts(),
            "chart torn down"
        );
    }

    let trends = TokenTrends::from_history(&history, &estimator);
    println!("{}", serde_json::to_string(&trends)?);
    Ok(())
}

fn widened(base: PixelSize) -> PixelSize {
    PixelSize::new(base.width.saturating_mul(2), base.height)
}

fn init_logging(cfg: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));
    let registry = tracing_subscriber::registry().with(filter);
    match cfg.format {
        LogFormat::Json => registry.with(fmt::layer().json().with_writer(std::io::stderr)).init(),
        LogFormat::Text => registry.with(fmt::layer().with_writer(std::io::stderr)).init(),
    }
}

fn write_png<O>(chart: &MiniChart<RasterProvider, O>, out: &Path) -> Result<()>
where
    O: minichart_core::SizeObserver<Container = RasterContainer>,
{
    let manager = chart.manager().borrow();
    let Some(surface) = manager.surface() else {
        tracing::info!(file = %out.display(), "no live surface; skipping");
        return Ok(());
    };
    let bytes = surface.to_png_with_overlay(&chart.overlay())?;
    std::fs::write(out, bytes).with_context(|| format!("writing {}", out.display()))?;
    println!("Wrote {}", out.display());
    Ok(())
}

/// Produce output file name like target/out/minichart_<stem>_<metric>_<suffix>.png
fn out_name(input: &Path, metric: &str, suffix: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("history");
    let mut out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).ok();
    out.push(format!("minichart_{stem}_{metric}_{suffix}.png"));
    out
}

/// JSON array of `{timestamp, totalLiquidity, holderCount}`, or CSV with the same headers.
fn load_history(path: &Path) -> Result<Rc<[HistoryPoint]>> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if !is_csv {
        let text = std::fs::read_to_string(path).with_context(|| format!("opening {}", path.display()))?;
        let points: Vec<HistoryPoint> = serde_json::from_str(&text).context("parsing history JSON")?;
        return Ok(points.into());
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut points = Vec::new();
    for (i, rec) in rdr.deserialize::<HistoryPoint>().enumerate() {
        match rec {
            Ok(p) => points.push(p),
            Err(e) => tracing::warn!(row = i + 1, error = %e, "skipping malformed row"),
        }
    }
    Ok(points.into())
}
