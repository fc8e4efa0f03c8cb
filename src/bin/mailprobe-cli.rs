use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use mailprobe_lib::{Config, MxCache, VerificationResult, find_email, verify_bulk, verify_email};

#[derive(Parser)]
#[command(name = "mailprobe-cli")]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,

    /// write report to file (JSON/NDJSON selon --format)
    #[arg(long)]
    out: Option<String>,

    /// format: human|json|ndjson
    #[arg(long, default_value = "human")]
    format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a single address.
    Verify { email: String },
    /// Verify many addresses, one per line from stdin or a file.
    Bulk {
        /// path to a file of addresses; reads stdin when omitted
        #[arg(long)]
        file: Option<String>,
        #[arg(long, default_value_t = 20)]
        max_workers: usize,
    },
    /// Find the most plausible address for a name at a domain.
    Find { full_name: String, domain: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let rows = match &cli.cmd {
        Commands::Verify { email } => {
            let cache = MxCache::new(config.mx_cache_ttl, config.dns_timeout, config.dns_lifetime);
            vec![verify_email(email, &config, &cache)]
        }
        Commands::Bulk { file, max_workers } => {
            let emails = collect_addresses(file.as_deref())?;
            let cache = MxCache::new(config.mx_cache_ttl, config.dns_timeout, config.dns_lifetime);
            verify_bulk(&emails, *max_workers, &config, &cache)
        }
        Commands::Find { full_name, domain } => {
            let cleaned = mailprobe_lib::clean_domain(domain)
                .with_context(|| format!("domain '{domain}' has no usable '.'"))?;
            let cache = MxCache::new(config.mx_cache_ttl, config.dns_timeout, config.dns_lifetime);
            let found = find_email(full_name, &cleaned, &config, &cache);
            println!("{}", found.as_deref().unwrap_or("not found"));
            return Ok(());
        }
    };

    write_reports(&rows, &cli)?;

    if rows.iter().any(|row| row.status == "error") {
        std::process::exit(2);
    }

    Ok(())
}

fn collect_addresses(file: Option<&str>) -> Result<Vec<String>> {
    let lines: Vec<String> = match file {
        Some(path) => {
            let contents = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
            contents.lines().map(str::to_string).collect()
        }
        None => io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<String>>>()
            .context("read stdin")?,
    };
    Ok(lines)
}

fn write_reports(rows: &[VerificationResult], cli: &Cli) -> Result<()> {
    let rendered = match cli.format.as_str() {
        "human" => render_human(rows),
        "json" => serde_json::to_string_pretty(rows).context("serialize json")?,
        "ndjson" => rows
            .iter()
            .map(|row| serde_json::to_string(row))
            .collect::<Result<Vec<_>, _>>()
            .context("serialize ndjson")?
            .join("\n"),
        other => bail!("unknown --format '{other}', use: human|json|ndjson"),
    };

    match &cli.out {
        Some(path) => write_atomically(path, rendered.as_bytes()),
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}

fn render_human(rows: &[VerificationResult]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{} :: status={} score={} deliverable={} reason={}",
                row.email, row.status, row.score, row.deliverable, row.reason
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp).with_context(|| format!("create {tmp}"))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}
