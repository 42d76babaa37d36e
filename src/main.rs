use calcs::config::AppConfig;
use calcs::runner::{JsonLinesSink, run_event_loop};
use calcs::state::Session;
use calcs::state::events::UiEvent;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{Level, debug};

use std::io::{self, BufWriter};
use std::path::PathBuf;

/// Interactive limits and derivatives visualizer.
///
/// By default, reads UI events as JSON lines on stdin and writes one
/// rendered page per event to stdout. With `--once`, renders a single
/// page from the command line flags and exits.
#[derive(Parser, Debug)]
#[command(name = "calcs", version, about)]
struct Cli {
  /// Function of x to analyze
  #[arg(long)]
  function: Option<String>,

  /// x-value for the tangent line
  #[arg(long, allow_hyphen_values = true)]
  tangent_x: Option<f64>,

  /// x-value for the limit calculator
  #[arg(long, allow_hyphen_values = true)]
  limit_x: Option<f64>,

  /// Run the secant animation
  #[arg(long, requires = "once")]
  animate: bool,

  /// Reveal the solution to problem N (1-based, repeatable)
  #[arg(long, value_name = "N")]
  reveal: Vec<usize>,

  /// Path to a TOML configuration file
  #[arg(long, value_name = "PATH")]
  config: Option<PathBuf>,

  /// Render a single page and exit instead of reading events
  #[arg(long)]
  once: bool,

  /// Log debug output to stderr
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
  tracing_subscriber::fmt()
    .with_max_level(level)
    .with_writer(io::stderr)
    .init();

  let mut config = match &cli.config {
    Some(path) => AppConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
    None => AppConfig::default(),
  };
  if let Some(function) = &cli.function {
    config.function = function.clone();
  }
  if let Some(x) = cli.tangent_x {
    config.tangent_x = x;
  }
  if let Some(x) = cli.limit_x {
    config.limit_x = x;
  }
  debug!(config = ?config, "effective configuration");

  let mut session = Session::new(config.session_config());
  for &n in &cli.reveal {
    if n == 0 {
      bail!("--reveal is 1-based, got 0");
    }
    session.apply(UiEvent::RevealSolution { index: n - 1 }).with_context(|| format!("--reveal {n}"))?;
  }

  let stdout = BufWriter::new(io::stdout().lock());
  if cli.once {
    let page = session.render(cli.animate);
    JsonLinesSink::new(stdout).write_page(&page, config.frame_delay())?;
  } else {
    let stdin = io::stdin().lock();
    run_event_loop(&mut session, stdin, stdout, config.frame_delay())?;
  }
  Ok(())
}
