//! 包裝匯總

use pack_core::{round_half_up, OptimizationStatus, PackingConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::grouping::RowGroup;
use crate::totals::accumulate;

/// 包裝匯總（每組一筆）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingSummary {
    /// 分組標籤
    pub label: String,

    /// A 包裝合計
    pub total_packs_a: u64,

    /// B 包裝合計
    pub total_packs_b: u64,

    /// 包裝總數
    pub total_packs: u64,

    /// 容器合計（非托盤包裝）
    pub total_containers: Decimal,

    /// 托盤合計（托盤包裝）
    pub total_trays: Decimal,

    /// 無解行數
    pub no_solution_count: usize,

    /// 超量合計（逐行加總，不依訂單去重）
    pub total_overage: u64,
}

impl PackingSummary {
    /// 計算一個分組的包裝匯總
    pub fn from_group(group: &RowGroup<'_>, config: &PackingConfig) -> Self {
        let mut summary = Self {
            label: group.label.clone(),
            total_packs_a: 0,
            total_packs_b: 0,
            total_packs: 0,
            total_containers: Decimal::ZERO,
            total_trays: Decimal::ZERO,
            no_solution_count: 0,
            total_overage: 0,
        };

        let label = group.label.as_str();
        for line in &group.rows {
            let derived = &line.derived;
            summary.total_packs_a = summary.total_packs_a.saturating_add(derived.packs_a);
            summary.total_packs_b = summary.total_packs_b.saturating_add(derived.packs_b);
            summary.total_overage = summary.total_overage.saturating_add(derived.overage);

            if config.is_tray_packing(&line.packing_method) {
                accumulate(&mut summary.total_trays, line.container_count, label, "trays");
            } else {
                accumulate(
                    &mut summary.total_containers,
                    line.container_count,
                    label,
                    "containers",
                );
            }

            if derived.status == OptimizationStatus::NoSolution {
                summary.no_solution_count += 1;
            }
        }
        summary.total_packs = summary.total_packs_a.saturating_add(summary.total_packs_b);

        summary
    }

    /// 顯示用（四捨五入為整數）
    pub fn rounded(&self) -> PackingRow {
        PackingRow {
            label: self.label.clone(),
            total_packs_a: self.total_packs_a,
            total_packs_b: self.total_packs_b,
            total_packs: self.total_packs,
            total_containers: round_half_up(self.total_containers),
            total_trays: round_half_up(self.total_trays),
            no_solution_count: self.no_solution_count,
            total_overage: self.total_overage,
        }
    }
}

/// 包裝匯總顯示列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingRow {
    pub label: String,
    pub total_packs_a: u64,
    pub total_packs_b: u64,
    pub total_packs: u64,
    pub total_containers: i64,
    pub total_trays: i64,
    pub no_solution_count: usize,
    pub total_overage: u64,
}
