use camino::Utf8Path;
use tracing_subscriber::EnvFilter;

/// Installs a stderr tracing subscriber, honoring `RUST_LOG` with an `info`
/// default. Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Like [`init`], but writes daily-rolled log files into `dir` instead of
/// stderr. Intended for the GUI shell, where stderr goes nowhere.
pub fn init_with_file(dir: &Utf8Path) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let appender = tracing_appender::rolling::daily(dir.as_std_path(), "mod_vault.log");
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .try_init();
}
