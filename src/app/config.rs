use std::io;

use clap::{ArgAction, Parser, ValueEnum};
use crossterm::tty::IsTty;
use thiserror::Error;

pub const MIN_LABEL_LEN: usize = 5;
pub const MAX_LABEL_LEN: usize = 13;
pub const MIN_DATA_LEN: usize = 20;
pub const MAX_DATA_LEN: usize = 32;
/// Smallest data column that still leaves room for one glyph and an ellipsis.
const MIN_MAX_DATA_LEN: usize = 5;

pub const REPORT_TITLE: &str = "SYSTEM STATUS REPORT";
pub const REPORT_SUBTITLE: &str = "TR-1000 MACHINE REPORT";

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Style {
    /// Box-drawing table with section dividers.
    Boxed,
    /// `label: value` lines without borders.
    Plain,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Parser)]
#[command(name = "machine-report", version, about = "Print a machine status report")]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = Style::Boxed)]
    pub style: Style,

    /// Color utilization bars by load tier
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    #[arg(long, default_value_t = MIN_DATA_LEN)]
    pub min_width: usize,

    #[arg(long, default_value_t = MAX_DATA_LEN)]
    pub max_width: usize,

    #[arg(long, default_value_t = MAX_LABEL_LEN)]
    pub label_width: usize,

    #[arg(long, default_value = REPORT_TITLE)]
    pub title: String,

    #[arg(long, default_value = REPORT_SUBTITLE)]
    pub subtitle: String,

    #[arg(long)]
    pub no_subtitle: bool,

    /// Log collector diagnostics to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("minimum data width {min} is larger than maximum data width {max}")]
    DataRange { min: usize, max: usize },
    #[error("maximum data width must be at least {minimum} (got {got})")]
    DataTooNarrow { got: usize, minimum: usize },
    #[error("label width must be at least {minimum} (got {got})")]
    LabelTooNarrow { got: usize, minimum: usize },
}

/// Layout bounds shared by every line of a report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportConfig {
    pub max_label_len: usize,
    pub min_data_len: usize,
    pub max_data_len: usize,
    pub style: Style,
    pub color: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_label_len: MAX_LABEL_LEN,
            min_data_len: MIN_DATA_LEN,
            max_data_len: MAX_DATA_LEN,
            style: Style::Boxed,
            color: true,
        }
    }
}

impl ReportConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let color = match cli.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_tty() && std::env::var_os("NO_COLOR").is_none(),
        };
        let config = Self {
            max_label_len: cli.label_width,
            min_data_len: cli.min_width,
            max_data_len: cli.max_width,
            style: cli.style,
            color,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_label_len < MIN_LABEL_LEN {
            return Err(ConfigError::LabelTooNarrow {
                got: self.max_label_len,
                minimum: MIN_LABEL_LEN,
            });
        }
        if self.max_data_len < MIN_MAX_DATA_LEN {
            return Err(ConfigError::DataTooNarrow {
                got: self.max_data_len,
                minimum: MIN_MAX_DATA_LEN,
            });
        }
        if self.min_data_len > self.max_data_len {
            return Err(ConfigError::DataRange {
                min: self.min_data_len,
                max: self.max_data_len,
            });
        }
        Ok(())
    }
}
