//! 包裝規劃配置

use serde::{Deserialize, Serialize};

use crate::{PackError, Result};

/// 包裝最佳化參數配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackingConfig {
    /// 小包裝容量（A）
    pub pack_size_a: u64,

    /// 大包裝容量（B）
    pub pack_size_b: u64,

    /// 允許超量時，向上搜尋的最大步數
    pub overage_search_limit: u64,

    /// 托盤包裝的包裝方式值（此方式不參與最佳化）
    pub tray_packing_method: String,
}

impl PackingConfig {
    pub const DEFAULT_PACK_SIZE_A: u64 = 5;
    pub const DEFAULT_PACK_SIZE_B: u64 = 7;
    pub const DEFAULT_OVERAGE_SEARCH_LIMIT: u64 = 200;
    pub const DEFAULT_TRAY_PACKING_METHOD: &'static str = "חמגשיות";

    /// 創建預設配置（5/7 包裝，搜尋上限 200）
    pub fn new() -> Self {
        Self {
            pack_size_a: Self::DEFAULT_PACK_SIZE_A,
            pack_size_b: Self::DEFAULT_PACK_SIZE_B,
            overage_search_limit: Self::DEFAULT_OVERAGE_SEARCH_LIMIT,
            tray_packing_method: Self::DEFAULT_TRAY_PACKING_METHOD.to_string(),
        }
    }

    /// 建構器模式：設置兩種包裝容量
    pub fn with_pack_sizes(mut self, size_a: u64, size_b: u64) -> Self {
        self.pack_size_a = size_a;
        self.pack_size_b = size_b;
        self
    }

    /// 建構器模式：設置超量搜尋上限
    pub fn with_overage_search_limit(mut self, limit: u64) -> Self {
        self.overage_search_limit = limit;
        self
    }

    /// 建構器模式：設置托盤包裝方式值
    pub fn with_tray_packing_method(mut self, method: impl Into<String>) -> Self {
        self.tray_packing_method = method.into();
        self
    }

    /// 檢查包裝方式是否為托盤包裝
    pub fn is_tray_packing(&self, packing_method: &str) -> bool {
        packing_method == self.tray_packing_method
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if self.pack_size_a == 0 || self.pack_size_b == 0 {
            return Err(PackError::InvalidConfig(format!(
                "包裝容量必須大於 0（A={}, B={}）",
                self.pack_size_a, self.pack_size_b
            )));
        }
        if self.pack_size_a == self.pack_size_b {
            return Err(PackError::InvalidConfig(format!(
                "兩種包裝容量不可相同（{}）",
                self.pack_size_a
            )));
        }
        if self.overage_search_limit == 0 {
            return Err(PackError::InvalidConfig(
                "超量搜尋上限必須大於 0".to_string(),
            ));
        }
        if self.tray_packing_method.is_empty() {
            return Err(PackError::InvalidConfig(
                "托盤包裝方式值不可為空".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self::new()
    }
}
