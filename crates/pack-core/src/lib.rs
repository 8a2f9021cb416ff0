//! # Pack Core
//!
//! 訂單行資料模型、配置與類型定義

pub mod columns;
pub mod config;
pub mod derived;
pub mod order_line;
pub mod raw;

// Re-export 主要類型
pub use columns::ColumnMap;
pub use config::PackingConfig;
pub use derived::{round_half_up, DerivedFields, OptimizationStatus};
pub use order_line::OrderLine;
pub use raw::{parse_numeric, text_value, RawRow};

/// 包裝規劃錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("未知的分組欄位: {0}")]
    InvalidSelector(String),
}

pub type Result<T> = std::result::Result<T, PackError>;
