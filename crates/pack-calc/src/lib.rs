//! # Pack Calculation Engine
//!
//! 訂單行衍生欄位計算（計劃份數、包裝分解、狀態）與列篩選

pub mod calculator;
pub mod filtering;

// Re-export 主要類型
pub use calculator::DerivedFieldCalculator;
pub use filtering::{search, FilterOptions, RowFilter};

use pack_core::OptimizationStatus;
use std::collections::BTreeMap;

/// 全量重算結果
#[derive(Debug, Clone, Default)]
pub struct RecalcSummary {
    /// 重算的訂單行數
    pub rows: usize,

    /// 各狀態的行數
    pub status_counts: BTreeMap<&'static str, usize>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl RecalcSummary {
    /// 創建空的重算結果
    pub fn empty() -> Self {
        Self::default()
    }

    /// 記錄一行的狀態
    pub fn record(&mut self, status: OptimizationStatus) {
        self.rows += 1;
        *self.status_counts.entry(status.code()).or_insert(0) += 1;
    }

    /// 取得某狀態的行數
    pub fn count(&self, status: OptimizationStatus) -> usize {
        self.status_counts.get(status.code()).copied().unwrap_or(0)
    }
}
