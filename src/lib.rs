//! # Pack Planning
//!
//! 訂單行份數規劃、5/7 包裝分解與分組匯總

pub mod logging;
pub mod session;

pub use session::PlanningSession;

// Re-export 各子 crate
pub use pack_calc::{search, DerivedFieldCalculator, FilterOptions, RecalcSummary, RowFilter};
pub use pack_core::{
    ColumnMap, DerivedFields, OptimizationStatus, OrderLine, PackError, PackingConfig, RawRow,
    Result,
};
pub use pack_optimizer::{OptimizationResult, PackOptimizer};
pub use pack_report::{
    AggregationEngine, GroupBy, GroupSummary, PackingSummary, ProductionSummary, ReportKind,
    NO_VALUE_LABEL,
};
