//! Command-line and environment configuration for the terminal runner.

use std::fs::File;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use blockfall::core::SessionConfig;
use blockfall::types::{BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARD_DIM, MIN_BOARD_DIM};

/// Falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "blockfall",
    version,
    about = "Falling-block puzzle in the terminal",
    long_about = "Falling-block puzzle in the terminal.\n\n\
        CONTROLS:\n  Left/Right h/l a/d  Move      Up k w     Rotate\n  Down j s            Soft drop Space      Hard drop\n  P                   Pause     R          Restart\n  Q / Esc / Ctrl-C    Quit\n\n\
        Filling the well to the top clears it and play continues."
)]
pub struct Args {
    /// Seed for the piece generator. Derived from the clock if not set.
    #[arg(long, env = "BLOCKFALL_SEED", value_name = "N")]
    pub seed: Option<u32>,

    /// Board width in cells.
    #[arg(long, default_value_t = BOARD_WIDTH, value_parser = board_dim)]
    pub cols: u8,

    /// Board height in cells.
    #[arg(long, default_value_t = BOARD_HEIGHT, value_parser = board_dim)]
    pub rows: u8,

    /// Terminal columns per board cell.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u16).range(1..=4))]
    pub cell_width: u16,

    /// Ring the terminal bell on line clears and top-outs.
    #[arg(long, env = "BLOCKFALL_BELL")]
    pub bell: bool,

    /// Write logs to this file (the terminal is busy drawing). Filter with RUST_LOG.
    #[arg(long, env = "BLOCKFALL_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

fn board_dim(s: &str) -> Result<u8, String> {
    let n: u8 = s.parse().map_err(|e| format!("{e}"))?;
    if (MIN_BOARD_DIM..=MAX_BOARD_DIM).contains(&n) {
        Ok(n)
    } else {
        Err(format!("must be within {MIN_BOARD_DIM}..={MAX_BOARD_DIM}"))
    }
}

impl Args {
    pub fn session_config(&self) -> Result<SessionConfig> {
        Ok(SessionConfig::new(self.cols, self.rows)?)
    }

    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// Route `log` output to `path`; without a path logging stays off.
pub fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to install logger")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["blockfall"]).unwrap();
        assert_eq!((args.cols, args.rows), (10, 20));
        assert_eq!(args.cell_width, 2);
        assert_eq!(args.session_config().unwrap(), SessionConfig::default());
    }

    #[test]
    fn explicit_seed_and_size() {
        let args =
            Args::try_parse_from(["blockfall", "--seed", "42", "--cols", "12", "--rows", "30"])
                .unwrap();
        assert_eq!(args.seed(), 42);
        assert_eq!(args.session_config().unwrap().cols, 12);
    }

    #[test]
    fn board_size_is_bounded() {
        assert!(Args::try_parse_from(["blockfall", "--cols", "3"]).is_err());
        assert!(Args::try_parse_from(["blockfall", "--rows", "65"]).is_err());
        assert!(Args::try_parse_from(["blockfall", "--cell-width", "0"]).is_err());
    }
}
