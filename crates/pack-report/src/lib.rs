//! # Pack Report
//!
//! 匯總引擎：依分組欄位產生生產匯總與包裝匯總

pub mod grouping;
pub mod packing;
pub mod production;
mod totals;

// Re-export 主要類型
pub use grouping::{group_rows, GroupBy, RowGroup, NO_VALUE_LABEL};
pub use packing::{PackingRow, PackingSummary};
pub use production::{ProductionRow, ProductionSummary};

use pack_core::{OrderLine, PackingConfig};
use serde::{Deserialize, Serialize};

/// 匯總類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// 生產匯總
    Production,
    /// 包裝匯總
    Packing,
}

/// 分組匯總
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GroupSummary {
    Production(ProductionSummary),
    Packing(PackingSummary),
}

impl GroupSummary {
    /// 分組標籤
    pub fn label(&self) -> &str {
        match self {
            GroupSummary::Production(summary) => &summary.label,
            GroupSummary::Packing(summary) => &summary.label,
        }
    }
}

/// 匯總引擎
///
/// 必須在所有訂單行完成衍生欄位計算之後執行。
pub struct AggregationEngine {
    config: PackingConfig,
}

impl AggregationEngine {
    /// 創建新的匯總引擎
    pub fn new(config: PackingConfig) -> Self {
        Self { config }
    }

    /// 依分組欄位與匯總類型產生匯總（分組順序為首次出現順序）
    pub fn aggregate<'a, I>(&self, rows: I, group_by: GroupBy, kind: ReportKind) -> Vec<GroupSummary>
    where
        I: IntoIterator<Item = &'a OrderLine>,
    {
        match kind {
            ReportKind::Production => self
                .production_summary(rows, group_by)
                .into_iter()
                .map(GroupSummary::Production)
                .collect(),
            ReportKind::Packing => self
                .packing_summary(rows, group_by)
                .into_iter()
                .map(GroupSummary::Packing)
                .collect(),
        }
    }

    /// 生產匯總
    pub fn production_summary<'a, I>(&self, rows: I, group_by: GroupBy) -> Vec<ProductionSummary>
    where
        I: IntoIterator<Item = &'a OrderLine>,
    {
        let groups = group_rows(rows, group_by);
        tracing::debug!("生產匯總：依 {} 分組，共 {} 組", group_by, groups.len());

        groups.iter().map(ProductionSummary::from_group).collect()
    }

    /// 包裝匯總
    pub fn packing_summary<'a, I>(&self, rows: I, group_by: GroupBy) -> Vec<PackingSummary>
    where
        I: IntoIterator<Item = &'a OrderLine>,
    {
        let groups = group_rows(rows, group_by);
        tracing::debug!("包裝匯總：依 {} 分組，共 {} 組", group_by, groups.len());

        groups
            .iter()
            .map(|group| PackingSummary::from_group(group, &self.config))
            .collect()
    }
}

impl Default for AggregationEngine {
    fn default() -> Self {
        Self::new(PackingConfig::default())
    }
}
