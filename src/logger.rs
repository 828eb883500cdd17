use tracing_subscriber::EnvFilter;

/// 初始化日志：默认 info 级别，可用 RUST_LOG 覆盖（如 `RUST_LOG=thesis_bib=debug`）
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
