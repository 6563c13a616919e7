//! jid-check - inspect XMPP addresses
//!
//! Parses JIDs the way the sms2xmpp bridge does and shows their normalized
//! parts, or checks whether a message sender belongs to an account.

use std::io::BufRead;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use sms2xmpp_jid::JidCache;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod report;

use config::Config;
use report::{CompareReport, ParseReport};

#[derive(Debug, Parser)]
#[command(name = "jid-check", version, about = "Parse and compare XMPP addresses")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse JIDs given as arguments, or one per line on stdin.
    Parse(ParseArgs),

    /// Check whether a sender's bare JID is the account's bare JID.
    Compare(CompareArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// JIDs to parse. Reads stdin when omitted.
    jids: Vec<String>,

    /// Print one JSON object per input.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct CompareArgs {
    /// JID the message came from.
    sender: String,

    /// Configured account JID.
    account: String,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::from_env()?;

    // Prefer RUST_LOG, fall back to SMS2XMPP_LOG_LEVEL
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!(cache_capacity = config.cache_capacity, "Configuration loaded");
    let cache = JidCache::with_config(config.cache_config());

    let succeeded = match cli.command {
        Command::Parse(args) => parse(&cache, args)?,
        Command::Compare(args) => compare(&cache, args)?,
    };

    debug!(stats = ?cache.stats(), "Done");
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Returns false if any input failed to parse.
fn parse(cache: &JidCache, args: ParseArgs) -> Result<bool> {
    let inputs = if args.jids.is_empty() {
        read_stdin_lines()?
    } else {
        args.jids
    };

    let mut failures = 0usize;
    for input in &inputs {
        let report = ParseReport::new(input, &cache.get_or_parse(input));
        if !report.is_ok() {
            failures += 1;
        }

        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        } else if report.is_ok() {
            println!("{}", report.render_text());
        } else {
            println!("{}", report.render_text().red());
        }
    }

    debug!(total = inputs.len(), failures, "Parsed inputs");
    Ok(failures == 0)
}

/// Returns whether the sender matches the account.
fn compare(cache: &JidCache, args: CompareArgs) -> Result<bool> {
    let sender = cache
        .get_or_parse(&args.sender)
        .with_context(|| format!("invalid sender JID '{}'", args.sender))?;
    let account = cache
        .get_or_parse(&args.account)
        .with_context(|| format!("invalid account JID '{}'", args.account))?;

    let report = CompareReport::new(&sender, &account);
    if args.json {
        println!("{}", serde_json::to_string(&report)?);
    } else if report.matches {
        println!("{}", report.render_text().green());
    } else {
        println!("{}", report.render_text().yellow());
    }

    Ok(report.matches)
}

fn read_stdin_lines() -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in std::io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let line = line.trim_end_matches('\r');
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
    Ok(lines)
}
