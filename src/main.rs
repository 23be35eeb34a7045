use std::path::PathBuf;

use clap::Parser;
use gnav::config::GnavConfig;
use gnav::dom::Document;
use gnav::{Gnav, Services};

/// Fetch and build the global navigation, then print the mounted markup.
#[derive(Debug, Parser)]
#[command(name = "gnav", version, about)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the origin the fragment is fetched from
    #[arg(long)]
    origin: Option<String>,

    /// Override the navigation fragment path
    #[arg(long)]
    path: Option<String>,

    /// Viewport width used for the initial breakpoint
    #[arg(long, default_value_t = Document::DEFAULT_VIEWPORT_WIDTH)]
    width: u32,
}

#[tokio::main]
async fn main() {
    gnav::logging::init_tracing();
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let services = match Services::from_config(&config) {
        Ok(services) => services,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut document = Document::new();
    document.set_viewport_width(cli.width);
    let container = document.create_element("header");
    document.append(document.body(), container);

    match Gnav::init(document, container, &config, services).await {
        Ok(gnav) => println!("{}", gnav.document().outer_html(container)),
        Err(_) => {
            eprintln!("Error: navigation could not be built (set GNAV_LOG for details)");
            std::process::exit(1);
        }
    }
}

fn load_config(cli: &Cli) -> Result<GnavConfig, gnav::GnavError> {
    let mut config = match &cli.config {
        Some(path) => GnavConfig::load_from(path)?,
        None => GnavConfig::load()?,
    };
    if let Some(origin) = &cli.origin {
        config.origin = origin.clone();
    }
    if let Some(path) = &cli.path {
        config.path = path.clone();
    }
    config.validate()?;
    Ok(config)
}
