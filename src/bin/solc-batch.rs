use clap::Parser;
use eyre::WrapErr;
use solc_batch::{report::BasicStdoutReporter, BatchConfig, BatchDriver};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Extract scraped contract records and compile them with svm installed solc releases
#[derive(Debug, Parser)]
#[clap(author, about, version)]
struct Opts {
    /// Root holding one directory per contract
    #[clap(long, default_value = solc_batch::config::DEFAULT_CONTRACTS_ROOT)]
    root: PathBuf,

    /// Where compiler output is written
    #[clap(long, default_value = solc_batch::config::DEFAULT_OUT_DIR)]
    out: PathBuf,

    /// Where error logs are written
    #[clap(long, default_value = solc_batch::config::DEFAULT_ERRORS_DIR)]
    errors: PathBuf,

    /// svm home with the installed solc releases, defaults to `~/.svm`
    #[clap(long)]
    svm_home: Option<PathBuf>,

    /// Only compile, assume sources are already extracted
    #[clap(long)]
    skip_extract: bool,

    /// Only extract sources
    #[clap(long)]
    skip_compile: bool,

    /// Enable verbose logging
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> eyre::Result<()> {
    let opts = Opts::parse();

    let default_level = if opts.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut builder = BatchConfig::builder()
        .contracts_root(&opts.root)
        .out_dir(&opts.out)
        .errors_dir(&opts.errors)
        .skip_extract(opts.skip_extract)
        .skip_compile(opts.skip_compile);
    if let Some(svm_home) = opts.svm_home {
        builder = builder.svm_home(svm_home);
    }
    let config = builder.build().wrap_err("failed to set up batch paths")?;

    let compiler = config.svm_solc();
    let report = BatchDriver::new(config).reporter(BasicStdoutReporter::default()).run(&compiler)?;
    if report.has_failures() {
        eprintln!(
            "{} of {} directories failed, {} records could not be extracted",
            report.failed(),
            report.outcomes.len(),
            report.extraction_failures.len()
        );
    }
    Ok(())
}
