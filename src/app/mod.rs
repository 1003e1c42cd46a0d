mod config;
mod fields;
mod logging;

use std::io;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::system;
use crate::ui;

pub use config::{Cli, ReportConfig, Style};
pub use logging::init_logging;

pub fn run(cli: &Cli) -> Result<()> {
    let config = ReportConfig::from_cli(cli).context("invalid report options")?;

    let started = Instant::now();
    let facts = system::collect_facts();
    tracing::info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "collected machine facts"
    );

    let subtitle = (!cli.no_subtitle).then_some(cli.subtitle.as_str());
    let report = fields::build_report(&facts, &cli.title, subtitle);
    let lines = report.render(&config);

    let mut stdout = io::stdout().lock();
    ui::write_report(&mut stdout, &lines).context("failed to write report")?;
    Ok(())
}
