use env_logger::{Builder, Target};
use log::LevelFilter;

/// Stderr logger at `level`. A `RUST_LOG`-style `overrides` string, when given,
/// is applied on top so individual modules can be turned up or down.
pub(crate) fn builder(level: LevelFilter, overrides: Option<&str>) -> Builder {
    let mut builder = Builder::new();
    builder.target(Target::Stderr).filter_level(level);
    if let Some(spec) = overrides {
        builder.parse_filters(spec);
    }
    builder
}

pub(crate) fn init(level: LevelFilter) -> anyhow::Result<()> {
    let overrides = std::env::var("RUST_LOG").ok();
    builder(level, overrides.as_deref()).try_init()?;
    Ok(())
}
