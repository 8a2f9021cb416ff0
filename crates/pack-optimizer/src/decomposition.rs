//! 包裝分解

use pack_core::PackingConfig;

use crate::OptimizationResult;

/// 包裝分解最佳化器
///
/// 將目標份數分解為 `a * size_a + b * size_b`。
/// 多組解時取 A 包裝最少（B 包裝最多）的一組。
#[derive(Debug, Clone, Copy)]
pub struct PackOptimizer {
    size_a: u64,
    size_b: u64,
    search_limit: u64,
}

impl PackOptimizer {
    /// 依配置創建最佳化器
    pub fn new(config: &PackingConfig) -> pack_core::Result<Self> {
        config.validate()?;
        Ok(Self {
            size_a: config.pack_size_a,
            size_b: config.pack_size_b,
            search_limit: config.overage_search_limit,
        })
    }

    pub fn size_a(&self) -> u64 {
        self.size_a
    }

    pub fn size_b(&self) -> u64 {
        self.size_b
    }

    /// 嘗試精確分解 n
    ///
    /// 依 a = 0, 1, ..., n / size_a 遞增，回傳第一個使餘數可被 size_b 整除的組合。
    pub fn try_exact(&self, n: u64) -> Option<(u64, u64)> {
        (0..=n / self.size_a).find_map(|a| {
            let remainder = n - self.size_a * a;
            (remainder % self.size_b == 0).then(|| (a, remainder / self.size_b))
        })
    }

    /// 最佳化目標份數
    ///
    /// 先嘗試精確分解；不允許超量時無解即回傳 `None`。
    /// 允許超量時，從 target + 1 起逐一嘗試至 target + 搜尋上限（含），
    /// 取第一個可精確分解的值。
    pub fn optimize(&self, target: u64, allow_overage: bool) -> Option<OptimizationResult> {
        if let Some((packs_a, packs_b)) = self.try_exact(target) {
            return Some(OptimizationResult::exact(packs_a, packs_b));
        }

        if !allow_overage {
            tracing::trace!("目標 {} 無精確分解，且不允許超量", target);
            return None;
        }

        let first = target.checked_add(1)?;
        let last = target.saturating_add(self.search_limit);
        let found = (first..=last).find_map(|n| self.try_exact(n).map(|packs| (n, packs)));

        match found {
            Some((n, (packs_a, packs_b))) => {
                tracing::trace!("目標 {} 以 {} 分解（超量 {}）", target, n, n - target);
                Some(OptimizationResult::with_overage(packs_a, packs_b, n - target))
            }
            None => {
                tracing::trace!("目標 {} 搜尋至 {} 仍無解", target, last);
                None
            }
        }
    }
}

impl Default for PackOptimizer {
    fn default() -> Self {
        Self {
            size_a: PackingConfig::DEFAULT_PACK_SIZE_A,
            size_b: PackingConfig::DEFAULT_PACK_SIZE_B,
            search_limit: PackingConfig::DEFAULT_OVERAGE_SEARCH_LIMIT,
        }
    }
}
