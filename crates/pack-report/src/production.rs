//! 生產匯總

use pack_core::{round_half_up, OrderLine};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::grouping::RowGroup;
use crate::totals::accumulate;

/// 生產匯總（每組一筆）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionSummary {
    /// 分組標籤
    pub label: String,

    /// 產品數量合計
    pub total_quantity: Decimal,

    /// 各行份數合計
    pub total_meals_per_line: Decimal,

    /// 訂單總份數合計（每張訂單只計一次）
    pub total_meals_today: Decimal,

    /// 過敏原份數合計（每張訂單只計一次）
    pub total_allergenic: Decimal,

    /// 素食份數合計（每張訂單只計一次）
    pub total_vegetarian: Decimal,
}

impl ProductionSummary {
    /// 計算一個分組的生產匯總
    ///
    /// 訂單層級欄位在同一訂單的每一行上重複出現，
    /// 因此只取每張訂單在組內的第一行。
    pub fn from_group(group: &RowGroup<'_>) -> Self {
        let mut summary = Self {
            label: group.label.clone(),
            total_quantity: Decimal::ZERO,
            total_meals_per_line: Decimal::ZERO,
            total_meals_today: Decimal::ZERO,
            total_allergenic: Decimal::ZERO,
            total_vegetarian: Decimal::ZERO,
        };

        let label = group.label.as_str();
        for line in &group.rows {
            accumulate(&mut summary.total_quantity, line.quantity, label, "quantity");
            accumulate(
                &mut summary.total_meals_per_line,
                line.meals_per_line,
                label,
                "meals_per_line",
            );
        }

        for line in first_line_per_order(&group.rows) {
            accumulate(
                &mut summary.total_meals_today,
                line.total_meals_today,
                label,
                "total_meals_today",
            );
            accumulate(
                &mut summary.total_allergenic,
                line.allergenic_meals,
                label,
                "allergenic_meals",
            );
            accumulate(
                &mut summary.total_vegetarian,
                line.vegetarian_meals,
                label,
                "vegetarian_meals",
            );
        }

        summary
    }

    /// 顯示用（四捨五入為整數）
    pub fn rounded(&self) -> ProductionRow {
        ProductionRow {
            label: self.label.clone(),
            total_quantity: round_half_up(self.total_quantity),
            total_meals_per_line: round_half_up(self.total_meals_per_line),
            total_meals_today: round_half_up(self.total_meals_today),
            total_allergenic: round_half_up(self.total_allergenic),
            total_vegetarian: round_half_up(self.total_vegetarian),
        }
    }
}

/// 生產匯總顯示列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionRow {
    pub label: String,
    pub total_quantity: i64,
    pub total_meals_per_line: i64,
    pub total_meals_today: i64,
    pub total_allergenic: i64,
    pub total_vegetarian: i64,
}

/// 每張訂單的第一行（依組內順序）
fn first_line_per_order<'a>(rows: &[&'a OrderLine]) -> Vec<&'a OrderLine> {
    let mut seen = HashSet::new();
    rows.iter()
        .copied()
        .filter(|line| seen.insert(line.order_number.as_str()))
        .collect()
}
