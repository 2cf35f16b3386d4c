use anyhow::Result;
use censusprep::{config::Config, demographics};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cfg = Config::load_or_default()?;
    let decimal = cfg.decimal_format();

    let summary = demographics::run(&cfg.demographics, &decimal)?;
    info!(
        read = summary.read,
        emitted = summary.emitted,
        skipped = summary.skipped_zero_population,
        output = %cfg.demographics.output.display(),
        "normalized demographics written"
    );
    Ok(())
}
