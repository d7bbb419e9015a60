//! ifreport command - report network interfaces, link state and addresses.

use std::ffi::OsString;
use std::time::Duration;

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use ifreport::NetlinkSource;
use ifreport::output::{self, OutputFormat, OutputOptions};
use ifreport::report::{
    AdminFlag, DEFAULT_EXCLUDE, GatherPolicy, InterfaceRecord, InterfaceReporter, ReportConfig,
};
use regex::Regex;

#[derive(Parser)]
#[command(
    name = "ifreport",
    version,
    about = "Report network interfaces, their link state and addresses"
)]
struct Cli {
    /// Print a human-readable table instead of JSON.
    #[arg(long = "pp")]
    pp: bool,

    /// Wait for an IPv4 address on every up interface (bounded by --timeout).
    #[arg(
        long = "ipv4-wait",
        value_name = "BOOL",
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    ipv4_wait: bool,

    /// Skip interfaces whose name matches this pattern (empty: skip none).
    #[arg(long, value_name = "REGEX", default_value = DEFAULT_EXCLUDE, value_parser = Regex::new)]
    exclude: Regex,

    /// How to decide whether a link is up.
    #[arg(long, value_enum, default_value_t = LinkSource::Running)]
    link_source: LinkSource,

    /// When to gather addresses.
    #[arg(long, value_enum, default_value_t = Gather::LinkGated)]
    gather: Gather,

    /// IPv4 wait ceiling in seconds.
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    timeout: u64,

    /// IPv4 poll interval in milliseconds.
    #[arg(long, value_name = "MILLIS", default_value_t = 500)]
    interval: u64,

    /// Pretty print JSON.
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LinkSource {
    /// Link-layer RUNNING flag (carrier present).
    Running,
    /// Administrative UP flag.
    Admin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Gather {
    /// Only for interfaces whose link is up.
    LinkGated,
    /// For every interface.
    Always,
}

impl From<Gather> for GatherPolicy {
    fn from(gather: Gather) -> Self {
        match gather {
            Gather::LinkGated => GatherPolicy::LinkGated,
            Gather::Always => GatherPolicy::Always,
        }
    }
}

/// Long flags also accepted with a single dash (`-pp`, `-ipv4-wait=false`).
const LONG_FLAGS: &[&str] = &[
    "pp",
    "ipv4-wait",
    "exclude",
    "link-source",
    "gather",
    "timeout",
    "interval",
    "pretty",
    "help",
    "version",
];

/// Rewrite `-name[=value]` to `--name[=value]` for the known long flags.
/// Arguments after a bare `--` are left alone.
fn double_dash_long_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut rest_verbatim = false;
    args.into_iter()
        .map(|arg| {
            if rest_verbatim {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                rest_verbatim = true;
                return arg;
            }
            let rewritten = match text.strip_prefix('-') {
                Some(flag)
                    if !flag.starts_with('-')
                        && LONG_FLAGS.contains(&flag.split('=').next().unwrap_or(flag)) =>
                {
                    Some(OsString::from(format!("-{text}")))
                }
                _ => None,
            };
            rewritten.unwrap_or(arg)
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse_from(double_dash_long_flags(std::env::args_os()));

    if let Err(e) = run(&cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = ReportConfig::new()
        .timeout(Duration::from_secs(cli.timeout))
        .interval(Duration::from_millis(cli.interval))
        .gather(cli.gather.into());

    let exclude = (!cli.exclude.as_str().is_empty()).then_some(&cli.exclude);
    let wait = Some(cli.ipv4_wait);

    let source = NetlinkSource::new().context("opening netlink socket")?;

    let records: Vec<InterfaceRecord> = match cli.link_source {
        LinkSource::Running => {
            InterfaceReporter::new(&source, &source, config)
                .list(exclude, wait)
                .await
        }
        LinkSource::Admin => {
            InterfaceReporter::new(&source, &AdminFlag, config)
                .list(exclude, wait)
                .await
        }
    }
    .context("reading interfaces")?;

    let format = if cli.pp {
        OutputFormat::Table
    } else {
        OutputFormat::Json
    };
    let opts = OutputOptions { pretty: cli.pretty };

    let mut stdout = std::io::stdout().lock();
    output::print(&mut stdout, &records, format, &opts).context("writing output")?;

    Ok(())
}
