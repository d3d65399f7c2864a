use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use campus_capture::capture::synthetic::SyntheticSource;
use campus_capture::config::SessionConfig;
use campus_capture::net::BackendClient;
use campus_capture::permission::HostPermissions;
use campus_capture::session::FoundReport;

/// Campus Lost & Found capture pipeline, runnable from the terminal:
/// - report: multi-shot found-item acquisition (6 photos) and submission
/// - search: single-shot lost-item query against the image-search backend
/// - items: browse the public found-item listing
#[derive(Parser, Debug)]
#[command(name = "campus-cap")]
#[command(about = "Capture item photos and talk to the Lost & Found backend")]
struct Args {
    /// Backend base URL
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    backend: String,

    /// Source frame width for the synthetic camera
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Source frame height for the synthetic camera
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Use the first hardware camera instead of the synthetic source
    /// (requires the `hardware` feature)
    #[arg(long)]
    hardware: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Capture six photos and submit a found-item report
    Report {
        /// What the item is, e.g. "Black wallet"
        #[arg(long)]
        name: String,
        /// Details that could help the owner
        #[arg(long)]
        description: String,
        /// Where the item was found
        #[arg(long)]
        location: String,
        /// Drop-off location choice
        #[arg(long, default_value = "College Security Office")]
        drop_off: String,
        /// Capture only, print image stats without submitting
        #[arg(long)]
        dry_run: bool,
    },
    /// Capture one photo and search the found-item database with it
    Search {
        /// Capture only, skip the backend request
        #[arg(long)]
        dry_run: bool,
    },
    /// List reported items with their thumbnails
    Items,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::try_init();
    let Args {
        backend,
        width,
        height,
        hardware,
        command,
    } = Args::parse();

    match command {
        Command::Report {
            name,
            description,
            location,
            drop_off,
            dry_run,
        } => {
            let config = SessionConfig::found_report();
            let images = run_acquisition(width, height, hardware, config.clone()).await?;
            for image in &images {
                println!(
                    "slot {}: {}x{}, {} bytes",
                    image.slot(),
                    image.width(),
                    image.height(),
                    image.bytes().len()
                );
            }

            let report = FoundReport {
                item_name: name,
                description,
                found_location: location,
                drop_location: drop_off,
                images,
            };
            report.validate(&config)?;

            if dry_run {
                println!("dry run: report is ready to submit");
                return Ok(());
            }

            let ack = BackendClient::new(backend).report_found(&report).await?;
            println!("{}: {}", ack.status, ack.message);
        }

        Command::Search { dry_run } => {
            let images =
                run_acquisition(width, height, hardware, SessionConfig::lost_query()).await?;
            let image = images
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("acquisition returned no image"))?;
            println!(
                "captured {}x{}, {} bytes",
                image.width(),
                image.height(),
                image.bytes().len()
            );

            if dry_run {
                return Ok(());
            }

            let client = BackendClient::new(backend);
            let outcome = client.search_lost(&image).await?;
            if outcome.is_match {
                let item = outcome.item.unwrap_or_default();
                println!(
                    "Match found: \"{}\" (confidence {:.3})",
                    item, outcome.confidence
                );
                if let Ok(folder) = client.folder_images(&item).await {
                    if let Some(url) = folder.images.first() {
                        println!("thumbnail: {}", url);
                    }
                }
            } else {
                println!("No match yet (confidence {:.3})", outcome.confidence);
            }
        }

        Command::Items => {
            let listing = BackendClient::new(backend).list_items().await?;
            for item in listing.items {
                println!("{}  {}", item.name, item.thumbnail);
            }
        }
    }

    Ok(())
}

async fn run_acquisition(
    width: u32,
    height: u32,
    hardware: bool,
    config: SessionConfig,
) -> Result<Vec<campus_capture::EncodedImage>> {
    #[cfg(feature = "hardware")]
    if hardware {
        use campus_capture::capture::hardware::NokhwaSource;
        let images =
            campus_capture::acquire(config, HostPermissions, NokhwaSource::new(0)).await?;
        return Ok(images);
    }

    #[cfg(not(feature = "hardware"))]
    if hardware {
        return Err(anyhow!(
            "hardware capture not available - rebuild with: cargo build --features hardware"
        ));
    }

    let source = SyntheticSource::new(width, height);
    let images = campus_capture::acquire(config, HostPermissions, source).await?;
    Ok(images)
}
