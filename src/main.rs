use anyhow::Result;
use clap::Parser;
use std::io::{self, IsTerminal};
use tracing::{debug, info};

use spotcheck::cli::CliArgs;
use spotcheck::config::Config;
use spotcheck::report::{self, RenderStyle};
use spotcheck::{git, scan};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    let no_color = args.no_color;

    let config = Config::from_cli_and_file(args)?;
    let scan_config = config.resolve()?;

    info!(
        "scanning {} target(s), max depth {}",
        scan_config.targets.len(),
        scan_config.max_depth
    );

    let mut repo_paths = Vec::new();
    for target in &scan_config.targets {
        let depth = scan_config.depth_for(target);
        debug!("walking {} to depth {depth}", target.path.display());
        repo_paths.extend(scan::find_repos(&target.path, depth));
    }
    info!("found {} repositories", repo_paths.len());

    let records = git::classify_all(&repo_paths);

    let style = RenderStyle {
        color: !no_color
            && std::env::var_os("NO_COLOR").is_none()
            && io::stdout().is_terminal(),
    };
    let home = dirs::home_dir();
    report::render(&records, style, home.as_deref(), &mut io::stdout().lock())?;

    Ok(())
}
