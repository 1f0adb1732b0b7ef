// shop/src/telemetry.rs

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing(json: bool) {
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_span_events(FmtSpan::CLOSE)
    .with_target(true);

  let installed = if json {
    builder.json().try_init()
  } else {
    builder.try_init()
  };
  if let Err(e) = installed {
    eprintln!("tracing subscriber already installed: {e}");
  }
}
