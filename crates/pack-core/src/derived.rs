//! 衍生欄位模型（最佳化計算結果）

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// 最佳化狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizationStatus {
    /// 精確分解
    Exact,
    /// 以超量取得分解
    Overage,
    /// 無解
    NoSolution,
    /// 托盤包裝，略過最佳化
    SkippedTrayPacking,
    /// 缺少每份單位數（除數）
    MissingDivisor,
}

impl OptimizationStatus {
    /// 全部狀態（固定集合）
    pub const ALL: [OptimizationStatus; 5] = [
        OptimizationStatus::Exact,
        OptimizationStatus::Overage,
        OptimizationStatus::NoSolution,
        OptimizationStatus::SkippedTrayPacking,
        OptimizationStatus::MissingDivisor,
    ];

    /// 狀態代碼
    pub fn code(&self) -> &'static str {
        match self {
            OptimizationStatus::Exact => "exact",
            OptimizationStatus::Overage => "overage",
            OptimizationStatus::NoSolution => "no-solution",
            OptimizationStatus::SkippedTrayPacking => "skipped-tray-packing",
            OptimizationStatus::MissingDivisor => "missing-divisor",
        }
    }

    /// 匯出報表使用的顯示文字
    pub fn label(&self) -> &'static str {
        match self {
            OptimizationStatus::Exact => "מדויק",
            OptimizationStatus::Overage => "עודף",
            OptimizationStatus::NoSolution => "אין פתרון",
            OptimizationStatus::SkippedTrayPacking => "דילג (חמגשיות)",
            OptimizationStatus::MissingDivisor => "ללא פרמטר 8",
        }
    }
}

impl std::fmt::Display for OptimizationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// 訂單行衍生欄位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedFields {
    /// 計劃份數（數量 / 每份單位數）
    pub target_meals: Decimal,

    /// 計劃份數（向下取整）
    pub target_meals_floor: i64,

    /// A 包裝數量
    pub packs_a: u64,

    /// B 包裝數量
    pub packs_b: u64,

    /// 包裝總數（恆等於 packs_a + packs_b）
    pub total_packs: u64,

    /// 超量
    pub overage: u64,

    /// 最佳化狀態
    pub status: OptimizationStatus,
}

impl DerivedFields {
    /// 創建沒有包裝的結果
    pub fn empty(target_meals: Decimal, status: OptimizationStatus) -> Self {
        Self {
            target_meals,
            target_meals_floor: floor_to_i64(target_meals),
            packs_a: 0,
            packs_b: 0,
            total_packs: 0,
            overage: 0,
            status,
        }
    }

    /// 創建帶包裝分解的結果
    pub fn with_packs(
        target_meals: Decimal,
        packs_a: u64,
        packs_b: u64,
        overage: u64,
        status: OptimizationStatus,
    ) -> Self {
        Self {
            target_meals,
            target_meals_floor: floor_to_i64(target_meals),
            packs_a,
            packs_b,
            total_packs: packs_a + packs_b,
            overage,
            status,
        }
    }
}

impl Default for DerivedFields {
    fn default() -> Self {
        Self::empty(Decimal::ZERO, OptimizationStatus::NoSolution)
    }
}

fn floor_to_i64(value: Decimal) -> i64 {
    value.floor().to_i64().unwrap_or(0)
}

/// 顯示用四捨五入（.5 遠離零）
///
/// 超出 i64 範圍時飽和為 `i64::MAX` / `i64::MIN`。
pub fn round_half_up(value: Decimal) -> i64 {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_codes_are_serialized_in_kebab_case() {
        let json = serde_json::to_string(&OptimizationStatus::SkippedTrayPacking).unwrap();
        assert_eq!(json, "\"skipped-tray-packing\"");

        for status in OptimizationStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.code()));
        }
    }

    #[test]
    fn test_with_packs_keeps_total() {
        let fields = DerivedFields::with_packs(
            Decimal::from_str("12.5").unwrap(),
            1,
            1,
            0,
            OptimizationStatus::Exact,
        );

        assert_eq!(fields.total_packs, 2);
        assert_eq!(fields.target_meals_floor, 12);
    }

    #[test]
    fn test_default_is_empty_no_solution() {
        let fields = DerivedFields::default();
        assert_eq!(fields.status, OptimizationStatus::NoSolution);
        assert_eq!(fields.total_packs, 0);
        assert_eq!(fields.target_meals, Decimal::ZERO);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(Decimal::from_str("2.5").unwrap()), 3);
        assert_eq!(round_half_up(Decimal::from_str("2.49").unwrap()), 2);
        assert_eq!(round_half_up(Decimal::from(7)), 7);
        assert_eq!(round_half_up(Decimal::from_str("-2.5").unwrap()), -3);
    }

    #[test]
    fn test_round_half_up_saturates_out_of_range() {
        assert_eq!(round_half_up(Decimal::MAX), i64::MAX);
        assert_eq!(round_half_up(Decimal::MIN), i64::MIN);
        assert_eq!(round_half_up(Decimal::from(i64::MAX)), i64::MAX);
    }
}
