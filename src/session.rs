//! 規劃工作階段

use pack_calc::{search, DerivedFieldCalculator, FilterOptions, RecalcSummary, RowFilter};
use pack_core::{ColumnMap, OrderLine, PackingConfig, RawRow};
use pack_report::{AggregationEngine, GroupBy, PackingSummary, ProductionSummary};

/// 規劃工作階段
///
/// 持有目前載入的訂單行與「允許超量」旗標。載入新資料或旗標變更時，
/// 對全部訂單行重新計算衍生欄位。
pub struct PlanningSession {
    columns: ColumnMap,
    calculator: DerivedFieldCalculator,
    engine: AggregationEngine,
    allow_overage: bool,
    lines: Vec<OrderLine>,
}

impl PlanningSession {
    /// 創建新的工作階段（驗證配置）
    pub fn new(config: PackingConfig) -> pack_core::Result<Self> {
        let calculator = DerivedFieldCalculator::new(config.clone())?;
        Ok(Self {
            columns: ColumnMap::default(),
            calculator,
            engine: AggregationEngine::new(config),
            allow_overage: false,
            lines: Vec::new(),
        })
    }

    /// 建構器模式：設置欄位對應
    pub fn with_columns(mut self, columns: ColumnMap) -> Self {
        self.columns = columns;
        self
    }

    /// 建構器模式：設置初始的「允許超量」旗標
    pub fn with_allow_overage(mut self, allow: bool) -> Self {
        self.allow_overage = allow;
        self
    }

    /// 載入原始列（取代全部訂單行）並計算
    pub fn load_rows(&mut self, rows: Vec<RawRow>) -> RecalcSummary {
        tracing::info!("載入原始列 {} 筆", rows.len());
        let lines = rows
            .iter()
            .map(|row| OrderLine::from_raw(row, &self.columns))
            .collect();
        self.load_lines(lines)
    }

    /// 載入訂單行（取代全部訂單行）並計算
    pub fn load_lines(&mut self, lines: Vec<OrderLine>) -> RecalcSummary {
        self.lines = lines;
        self.recompute()
    }

    /// 設置「允許超量」旗標，變更時全量重算
    pub fn set_allow_overage(&mut self, allow: bool) -> Option<RecalcSummary> {
        if self.allow_overage == allow {
            return None;
        }
        self.allow_overage = allow;
        Some(self.recompute())
    }

    /// 全量重算
    pub fn recompute(&mut self) -> RecalcSummary {
        self.calculator
            .recompute_all(&mut self.lines, self.allow_overage)
    }

    pub fn allow_overage(&self) -> bool {
        self.allow_overage
    }

    /// 全部訂單行
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// 篩選與搜尋後的訂單行（保持原始順序）
    pub fn filtered(&self, filter: &RowFilter, query: &str) -> Vec<&OrderLine> {
        search(filter.apply(&self.lines), query)
    }

    /// 篩選下拉選單的可選值
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::collect(&self.lines)
    }

    /// 生產匯總（全部訂單行）
    pub fn production_report(&self, group_by: GroupBy) -> Vec<ProductionSummary> {
        self.engine.production_summary(&self.lines, group_by)
    }

    /// 包裝匯總（全部訂單行）
    pub fn packing_report(&self, group_by: GroupBy) -> Vec<PackingSummary> {
        self.engine.packing_summary(&self.lines, group_by)
    }

    /// 匯總引擎（用於篩選後的訂單行）
    pub fn engine(&self) -> &AggregationEngine {
        &self.engine
    }

    /// 匯出用的扁平列
    pub fn export_rows(&self) -> Vec<RawRow> {
        self.lines
            .iter()
            .map(|line| line.to_export_row(&self.columns))
            .collect()
    }
}
