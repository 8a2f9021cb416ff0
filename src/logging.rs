//! 日誌系統初始化

use tracing_subscriber::{fmt, EnvFilter};

/// 本專案的日誌 target（各 crate 的模組路徑前綴）
pub const CRATE_TARGETS: [&str; 5] = [
    "packplan",
    "pack_core",
    "pack_optimizer",
    "pack_calc",
    "pack_report",
];

/// 預設過濾指令：外部 crate 只輸出警告，本專案各 crate 使用指定級別
///
/// 例如 `default_directives("debug")` →
/// `warn,packplan=debug,pack_core=debug,...`
pub fn default_directives(level: &str) -> String {
    std::iter::once("warn".to_string())
        .chain(CRATE_TARGETS.iter().map(|target| format!("{target}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

/// 初始化日誌系統
///
/// 設置 RUST_LOG 時以其為準，否則本專案各 crate 以 info 級別輸出。
/// 最佳化器逐目標的搜尋紀錄在 trace 級別：`RUST_LOG=pack_optimizer=trace`。
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives("info")));

    fmt().with_env_filter(filter).with_target(true).init();
}

/// 測試用（debug 級別，可重複呼叫）
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new(default_directives("debug")))
        .with_test_writer()
        .try_init();
}
