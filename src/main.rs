use std::path::{Path, PathBuf};

use card::scene::{CANVAS_HEIGHT, CANVAS_WIDTH};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use ui::app::{App, AppConfig};

/// Compose a haunted room greeting card.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Content descriptor listing places, layers and options.
    #[arg(long, default_value = "contents.json")]
    contents: PathBuf,

    /// Directory with one `<key>.png` per asset.
    #[arg(long, default_value = "images")]
    images: PathBuf,

    /// Where snapshots are saved.
    #[arg(long, default_value = ".")]
    output: PathBuf,

    /// Also write logs to a daily rolling file in this directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        Self {
            contents: args.contents,
            images: args.images,
            output: args.output,
        }
    }
}

fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer());

    if let Some(dir) = log_dir {
        let appender = tracing_appender::rolling::daily(dir, "haunted-card.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        registry
            .with(fmt::layer().with_ansi(false).with_writer(writer))
            .init();
        Some(guard)
    } else {
        registry.init();
        None
    }
}

fn main() -> eframe::Result {
    let args = Args::parse();
    let _guard = init_tracing(args.log_dir.as_deref());
    tracing::info!("haunted-card v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::from(args);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([CANVAS_WIDTH, CANVAS_HEIGHT])
            .with_title("Haunted Card"),
        ..Default::default()
    };

    eframe::run_native(
        "Haunted Card",
        options,
        Box::new(move |cc| Ok(Box::new(App::new(&cc.egui_ctx, &config)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = AppConfig::from(Args::parse_from(["haunted-card"]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn overrides() {
        let args = Args::parse_from([
            "haunted-card",
            "--contents",
            "rooms/contents.json",
            "--images",
            "rooms/images",
            "--output",
            "/tmp",
            "--log-dir",
            "logs",
        ]);

        assert_eq!(args.log_dir, Some(PathBuf::from("logs")));
        assert_eq!(
            AppConfig::from(args),
            AppConfig {
                contents: PathBuf::from("rooms/contents.json"),
                images: PathBuf::from("rooms/images"),
                output: PathBuf::from("/tmp"),
            }
        );
    }
}
