mod changes;
mod commands;
mod core;
mod graph;
mod pack;
mod sources;

use clap::{ArgAction, Parser, Subcommand};
use crate::core::context::ResolveContext;
use crate::core::error::{PackError, print_error};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Resolve changed yarn workspaces into CI packs
#[derive(Parser)]
#[command(name = "affected-packs")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Config file (default: packs.toml, .packs.toml or .config/packs.toml)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
  #[arg(short, long, action = ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Resolve affected workspaces into named packs
  Packs {
    /// Watched category directory (repeatable, default: watch.directories)
    #[arg(long = "dir", value_name = "DIR")]
    dirs: Vec<String>,
    /// Category directory listed when nothing watched changed (repeatable)
    #[arg(long = "default", value_name = "DIR")]
    defaults: Vec<String>,
    /// Glob over workspace locations (default: **)
    #[arg(long)]
    filter: Option<String>,
    /// Git ref to compare against (default: origin/main)
    #[arg(long)]
    since: Option<String>,
    /// Read the workspace mapping from a file instead of running yarn
    #[arg(long)]
    graph_file: Option<PathBuf>,
    /// Output format: json (default), text, names
    #[arg(long, default_value = "json")]
    format: String,
  },

  /// Show which workspaces are affected by changes
  Affected {
    /// Watched category directory (repeatable, default: watch.directories)
    #[arg(long = "dir", value_name = "DIR")]
    dirs: Vec<String>,
    /// Git ref to compare against (default: origin/main)
    #[arg(long)]
    since: Option<String>,
    /// Read the workspace mapping from a file instead of running yarn
    #[arg(long)]
    graph_file: Option<PathBuf>,
    /// Output format: text (default), json, names
    #[arg(long, default_value = "text")]
    format: String,
  },
}

fn get_styles() -> clap::builder::Styles {
  use anstyle::{AnsiColor, Color, Style};

  let yellow = Some(Color::Ansi(AnsiColor::Yellow));
  let green = Some(Color::Ansi(AnsiColor::Green));
  let red = Some(Color::Ansi(AnsiColor::Red));

  clap::builder::Styles::styled()
    .usage(Style::new().bold().underline().fg_color(yellow))
    .header(Style::new().bold().underline().fg_color(yellow))
    .literal(Style::new().fg_color(green))
    .invalid(Style::new().bold().fg_color(red))
    .error(Style::new().bold().fg_color(red))
    .valid(Style::new().bold().underline().fg_color(green))
    .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::White))))
}

/// Diagnostics go to stderr; stdout carries command output only.
fn init_tracing(verbose: u8) {
  let level = match verbose {
    0 => "warn",
    1 => "info",
    _ => "debug",
  };

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => handle_error(PackError::from(e).context("Failed to get current directory")),
  };

  let ctx = match ResolveContext::build(&root, cli.config.as_deref()) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Packs {
      dirs,
      defaults,
      filter,
      since,
      graph_file,
      format,
    } => commands::run_packs(&ctx, dirs, defaults, filter, since, graph_file, format),
    Commands::Affected {
      dirs,
      since,
      graph_file,
      format,
    } => commands::run_affected(&ctx, dirs, since, graph_file, format),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: PackError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
