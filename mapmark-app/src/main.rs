use anyhow::{Context, Result};
use clap::Parser;
use mapmark::{MapConfig, MapLocator, OutputHandle, Reply, Request, RequestHandler};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Answer location messages with the map, marked where the location is
#[derive(Parser)]
#[command(name = "mapmark-app")]
#[command(about = "Show GPS coordinates on a calibrated map image")]
struct Cli {
    /// JSON configuration file (defaults are used for anything it omits)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the map and marker images
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Marker bounding box in pixels
    #[arg(long)]
    marker_size: Option<u32>,

    /// Latitude of a shared location (requires --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of a shared location (requires --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Delete each rendered map after printing its path. Without this flag
    /// every on-map answer leaves its own PNG in the output directory.
    #[arg(long)]
    discard: bool,

    /// Message to answer, e.g. "60.21662, 29.75197" or "/map".
    /// Without one, messages are read from stdin line by line.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    message: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => MapConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => MapConfig::default(),
    };
    if let Some(root) = cli.assets.clone() {
        config = config.with_asset_root(root);
    }
    if let Some(size) = cli.marker_size {
        config = config.with_marker_size(size);
    }

    let locator = MapLocator::from_config(&config).context("starting map locator")?;
    let handler = RequestHandler::new(Arc::new(locator));
    let map_path = config.assets.root.join(&config.assets.base_map);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut answer = |request: Request| -> Result<()> {
        let reply = handler.handle(&request);
        let photos = print_reply(&mut out, reply, &map_path)?;
        if cli.discard {
            for handle in &photos {
                handler
                    .locator()
                    .store()
                    .release(handle)
                    .with_context(|| format!("removing {}", handle))?;
            }
        }
        Ok(())
    };

    if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        return answer(Request::location(lat, lon));
    }

    if !cli.message.is_empty() {
        return answer(Request::from_message(&cli.message.join(" ")));
    }

    log::info!("reading messages from stdin");
    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        answer(Request::from_message(&line))?;
    }

    Ok(())
}

/// Print each reply on its own line; returns the photos that were printed
fn print_reply(
    out: &mut impl Write,
    reply: Reply,
    map_path: &Path,
) -> Result<Vec<OutputHandle>> {
    let mut photos = Vec::new();
    for reply in reply.into_vec() {
        match reply {
            Reply::Text(text) => writeln!(out, "{}", text)?,
            Reply::Photo(handle) => {
                writeln!(out, "photo: {}", handle)?;
                photos.push(handle);
            }
            Reply::MapImage(bytes) => {
                writeln!(out, "photo: {} ({} bytes)", map_path.display(), bytes.len())?
            }
            // into_vec never yields nested replies
            Reply::Many(_) => {}
        }
    }
    out.flush()?;
    Ok(photos)
}
