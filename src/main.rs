use anyhow::Result;
use clap::{CommandFactory, Parser};

mod cli;
mod error;
mod ext;
mod github;
mod model;
mod pipeline;
mod projects;
mod report;
mod scoring;
mod util;

use crate::cli::{Cli, Command};

fn init_tracing(verbose: u8, quiet: bool) {
  use tracing_subscriber::{fmt, prelude::*, EnvFilter};

  let level = match (quiet, verbose) {
    (true, _) => "warn",
    (false, 0) => "info",
    (false, 1) => "debug",
    (false, _) => "trace",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

  tracing_subscriber::registry()
    .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
    .with(filter)
    .init();
}

fn print_projects(json: bool) -> Result<()> {
  let all = projects::all_projects();

  if json {
    println!("{}", serde_json::to_string_pretty(&all)?);
    return Ok(());
  }

  for p in &all {
    println!("{:<14} {:<45} min_score={}", p.key, p.full_name(), p.min_score_threshold);
  }

  Ok(())
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  init_tracing(cli.verbose, cli.quiet);

  let Some(command) = cli.command else {
    Cli::command().print_help()?;
    anyhow::bail!("missing subcommand");
  };

  match command {
    Command::Scan(args) => {
      // Phase 1: normalize CLI (configuration errors stop here, before any network call)
      let now = cli::parse_now(args.now_override.as_deref())?;
      let cfg = cli::normalize_scan(args, now)?;

      // Phase 2: fetch, score, export
      let pointer = pipeline::run_scan(&cfg, now)?;
      println!("{}", serde_json::to_string(&pointer)?);
    }
    Command::Projects(args) => print_projects(args.json)?,
    Command::Discover(args) => {
      let now = chrono::Utc::now();
      let opts = cli::discovery_options(&args, now);
      let api = pipeline::build_api(&args.auth.token_file, !args.auth.no_gh_cli, &args.auth.api_base);

      if let Some(json) = pipeline::run_discover(api.as_ref(), &opts, args.out.as_deref())? {
        println!("{}", json);
      }
    }
  }

  Ok(())
}
