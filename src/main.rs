use clap::Parser;
use log::LevelFilter;
use pixzip::{BatchResizer, Cli, Commands, RetentionSweeper, ServiceConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    match cli.command {
        Commands::Serve {
            host,
            port,
            temp_root,
        } => {
            let mut config = ServiceConfig::default();
            if let Some(root) = temp_root {
                config.temp_root = root;
            }
            let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
            pixzip::server::serve(config, addr).await?;
        }
        Commands::Batch {
            input,
            output,
            ratio,
        } => {
            process_batch(input, output, ratio)?;
        }
        Commands::Sweep {
            temp_root,
            older_than_hours,
        } => {
            process_sweep(temp_root, older_than_hours)?;
        }
    }

    Ok(())
}

fn process_batch(input: PathBuf, output: PathBuf, ratio: f64) -> anyhow::Result<()> {
    let resizer = BatchResizer::new(ratio);
    let outcome = resizer.process_directory(&input, &output)?;

    println!(
        "Batch resize complete. {} images resized to: {}",
        outcome.succeeded.len(),
        output.display()
    );
    if !outcome.failed.is_empty() {
        println!("{} file(s) could not be resized:", outcome.failed.len());
        for (name, reason) in &outcome.failed {
            println!("  {}: {}", name, reason);
        }
    }

    Ok(())
}

fn process_sweep(temp_root: Option<PathBuf>, older_than_hours: u64) -> anyhow::Result<()> {
    let mut config = ServiceConfig::default();
    if let Some(root) = temp_root {
        config.temp_root = root;
    }
    config.retention_threshold = Duration::from_secs(older_than_hours * 60 * 60);

    let sweeper = RetentionSweeper::new(&config);
    let stats = sweeper.sweep()?;

    println!(
        "Sweep complete. Removed {} file(s) and {} director{} from: {}",
        stats.files_removed,
        stats.dirs_removed,
        if stats.dirs_removed == 1 { "y" } else { "ies" },
        config.temp_root.display()
    );

    Ok(())
}
