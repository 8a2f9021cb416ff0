//! # Pack Optimizer
//!
//! 包裝分解最佳化模組（兩種固定容量的包裝組合）

pub mod decomposition;

// Re-export 主要類型
pub use decomposition::PackOptimizer;

use serde::{Deserialize, Serialize};

/// 最佳化結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// A 包裝數量
    pub packs_a: u64,

    /// B 包裝數量
    pub packs_b: u64,

    /// 是否精確分解目標值
    pub exact: bool,

    /// 超量（精確時為 0）
    pub overage: u64,
}

impl OptimizationResult {
    /// 創建精確的最佳化結果
    pub fn exact(packs_a: u64, packs_b: u64) -> Self {
        Self {
            packs_a,
            packs_b,
            exact: true,
            overage: 0,
        }
    }

    /// 創建帶超量的最佳化結果
    pub fn with_overage(packs_a: u64, packs_b: u64, overage: u64) -> Self {
        Self {
            packs_a,
            packs_b,
            exact: false,
            overage,
        }
    }

    /// 包裝總數
    pub fn total_packs(&self) -> u64 {
        self.packs_a + self.packs_b
    }
}
