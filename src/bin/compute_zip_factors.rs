use anyhow::Result;
use censusprep::{adjustments, config::Config};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cfg = Config::load_or_default()?;
    let decimal = cfg.decimal_format();

    let summary = adjustments::run(&cfg.zip_factors, &decimal)?;
    info!(
        regions = summary.regions,
        zips = summary.zips,
        output = %cfg.zip_factors.output.display(),
        "zip adjustment factors written"
    );
    Ok(())
}
