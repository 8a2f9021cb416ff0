//! 衍生欄位主計算器

use pack_core::{DerivedFields, OptimizationStatus, OrderLine, PackingConfig};
use pack_optimizer::{OptimizationResult, PackOptimizer};
use rayon::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::RecalcSummary;

/// 衍生欄位計算器
///
/// 每行的結果只取決於該行與「允許超量」旗標，行與行之間沒有共享狀態。
pub struct DerivedFieldCalculator {
    /// 包裝配置
    config: PackingConfig,

    /// 包裝分解最佳化器
    optimizer: PackOptimizer,
}

impl DerivedFieldCalculator {
    /// 創建新的計算器（驗證配置）
    pub fn new(config: PackingConfig) -> pack_core::Result<Self> {
        let optimizer = PackOptimizer::new(&config)?;
        Ok(Self { config, optimizer })
    }

    /// 計算單行衍生欄位
    pub fn compute(&self, line: &OrderLine, allow_overage: bool) -> DerivedFields {
        let is_tray = self.config.is_tray_packing(&line.packing_method);

        if line.units_per_pack <= Decimal::ZERO || is_tray {
            let status = if is_tray {
                OptimizationStatus::SkippedTrayPacking
            } else {
                OptimizationStatus::MissingDivisor
            };
            return DerivedFields::empty(Decimal::ZERO, status);
        }

        let target_meals = line
            .quantity
            .checked_div(line.units_per_pack)
            .unwrap_or(Decimal::ZERO);
        let floor = target_meals.floor();

        // 第一次：以向下取整的份數最佳化
        let mut result = None;
        if floor > Decimal::ZERO {
            result = floor
                .to_u64()
                .and_then(|target| self.optimizer.optimize(target, allow_overage));
        }

        // 第二次：獨立地以向上取整的份數重試（非第一次搜尋的延續）
        if result.is_none() && allow_overage && target_meals > Decimal::ZERO {
            result = target_meals
                .ceil()
                .to_u64()
                .and_then(|target| self.optimizer.optimize(target, true));
        }

        Self::to_derived(target_meals, result)
    }

    /// 計算並寫回訂單行
    pub fn apply(&self, line: &mut OrderLine, allow_overage: bool) {
        line.derived = self.compute(line, allow_overage);
    }

    /// 全量重算所有訂單行
    ///
    /// 沒有增量計算，也不快取前次結果。
    pub fn recompute_all(&self, lines: &mut [OrderLine], allow_overage: bool) -> RecalcSummary {
        tracing::info!(
            "開始重算衍生欄位：訂單行 {} 筆，允許超量 {}",
            lines.len(),
            allow_overage
        );

        let start_time = std::time::Instant::now();

        lines
            .par_iter_mut()
            .for_each(|line| self.apply(line, allow_overage));

        let mut summary = RecalcSummary::empty();
        for line in lines.iter() {
            tracing::debug!(
                "訂單 {} 產品 {}: 計劃份數 {}, A {} / B {}, 超量 {}, 狀態 {}",
                line.order_number,
                line.sku,
                line.derived.target_meals,
                line.derived.packs_a,
                line.derived.packs_b,
                line.derived.overage,
                line.derived.status
            );
            summary.record(line.derived.status);
        }
        summary.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!(
            "重算完成，耗時 {:?}，精確 {} / 超量 {} / 無解 {}",
            start_time.elapsed(),
            summary.count(OptimizationStatus::Exact),
            summary.count(OptimizationStatus::Overage),
            summary.count(OptimizationStatus::NoSolution)
        );

        summary
    }

    fn to_derived(target_meals: Decimal, result: Option<OptimizationResult>) -> DerivedFields {
        match result {
            Some(result) => {
                let status = if result.exact {
                    OptimizationStatus::Exact
                } else if result.overage > 0 {
                    OptimizationStatus::Overage
                } else {
                    OptimizationStatus::NoSolution
                };
                DerivedFields::with_packs(
                    target_meals,
                    result.packs_a,
                    result.packs_b,
                    result.overage,
                    status,
                )
            }
            None => DerivedFields::empty(target_meals, OptimizationStatus::NoSolution),
        }
    }

    /// 獲取配置引用
    pub fn config(&self) -> &PackingConfig {
        &self.config
    }
}
