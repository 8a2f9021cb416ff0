//! 訂單行模型

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::columns::{derived_columns, ColumnMap};
use crate::derived::DerivedFields;
use crate::raw::{parse_numeric, text_value, RawRow};

/// 訂單行（每列一個產品）
///
/// 訂單號不唯一：同一訂單的多個產品共用訂單號。
/// 訂單層級欄位（`total_meals_today`、`allergenic_meals`、`vegetarian_meals`）
/// 在同一訂單的每一行上都相同。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderLine {
    /// 訂單號
    pub order_number: String,

    /// 訂單日期
    pub order_date: Option<NaiveDate>,

    /// 客戶編號
    pub customer_number: String,

    /// 客戶名稱
    pub customer_name: String,

    /// 電話
    pub phone: String,

    /// 客戶類型
    pub customer_type: String,

    /// 城市
    pub city: String,

    /// 分店
    pub branch: String,

    /// 產品編號
    pub sku: String,

    /// 產品描述
    pub product_description: String,

    /// 類別
    pub category: String,

    /// 部門
    pub department: String,

    /// 產品數量
    pub quantity: Decimal,

    /// 每份單位數（計劃份數的除數）
    pub units_per_pack: Decimal,

    /// 包裝方式
    pub packing_method: String,

    /// 容器數量
    pub container_count: Decimal,

    /// 容器代碼
    pub container_code: String,

    /// 本行份數
    pub meals_per_line: Decimal,

    /// 訂單總份數（訂單層級）
    pub total_meals_today: Decimal,

    /// 過敏原份數（訂單層級）
    pub allergenic_meals: Decimal,

    /// 素食份數（訂單層級）
    pub vegetarian_meals: Decimal,

    /// 其他未對應欄位，原樣傳遞給匯出端
    pub extra: BTreeMap<String, Value>,

    /// 已對應欄位的原始儲存格（匯出時原樣寫回）
    #[serde(default)]
    pub source: BTreeMap<String, Value>,

    /// 衍生欄位
    pub derived: DerivedFields,
}

impl OrderLine {
    /// 創建新的訂單行
    pub fn new(order_number: impl Into<String>, sku: impl Into<String>) -> Self {
        Self {
            order_number: order_number.into(),
            sku: sku.into(),
            ..Self::default()
        }
    }

    /// 建構器模式：設置數量與每份單位數
    pub fn with_quantity(mut self, quantity: Decimal, units_per_pack: Decimal) -> Self {
        self.quantity = quantity;
        self.units_per_pack = units_per_pack;
        self
    }

    /// 建構器模式：設置包裝方式
    pub fn with_packing_method(mut self, method: impl Into<String>) -> Self {
        self.packing_method = method.into();
        self
    }

    /// 建構器模式：設置容器數量
    pub fn with_container_count(mut self, count: Decimal) -> Self {
        self.container_count = count;
        self
    }

    /// 建構器模式：設置分店
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// 建構器模式：設置訂單層級份數（總份數、過敏原、素食）
    pub fn with_order_meals(
        mut self,
        total_meals_today: Decimal,
        allergenic_meals: Decimal,
        vegetarian_meals: Decimal,
    ) -> Self {
        self.total_meals_today = total_meals_today;
        self.allergenic_meals = allergenic_meals;
        self.vegetarian_meals = vegetarian_meals;
        self
    }

    /// 建構器模式：設置本行份數
    pub fn with_meals_per_line(mut self, meals: Decimal) -> Self {
        self.meals_per_line = meals;
        self
    }

    /// 從原始試算表列建立訂單行
    pub fn from_raw(row: &RawRow, columns: &ColumnMap) -> Self {
        let text = |column: &str| row.get(column).map(text_value).unwrap_or_default();
        let number = |column: &str| {
            row.get(column)
                .map(parse_numeric)
                .unwrap_or(Decimal::ZERO)
        };

        let (source, extra): (BTreeMap<_, _>, BTreeMap<_, _>) = row
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .partition(|(key, _)| columns.is_mapped(key));

        Self {
            order_number: text(&columns.order_number),
            order_date: parse_order_date(&text(&columns.order_date)),
            customer_number: text(&columns.customer_number),
            customer_name: text(&columns.customer_name),
            phone: text(&columns.phone),
            customer_type: text(&columns.customer_type),
            city: text(&columns.city),
            branch: text(&columns.branch),
            sku: text(&columns.sku),
            product_description: text(&columns.product_description),
            category: text(&columns.category),
            department: text(&columns.department),
            quantity: number(&columns.quantity),
            units_per_pack: number(&columns.units_per_pack),
            packing_method: text(&columns.packing_method),
            container_count: number(&columns.container_count),
            container_code: text(&columns.container_code),
            meals_per_line: number(&columns.meals_per_line),
            total_meals_today: number(&columns.total_meals_today),
            allergenic_meals: number(&columns.allergenic_meals),
            vegetarian_meals: number(&columns.vegetarian_meals),
            extra,
            source,
            derived: DerivedFields::default(),
        }
    }

    /// 轉為匯出用的扁平列（原始欄位 + 衍生欄位）
    ///
    /// 來源列中存在的儲存格原樣寫回；沒有來源儲存格的欄位（程式建立的訂單行）
    /// 才以結構化欄位的值填入。
    pub fn to_export_row(&self, columns: &ColumnMap) -> RawRow {
        let mut row: RawRow = self
            .extra
            .iter()
            .chain(self.source.iter())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let texts = [
            (columns.order_number.as_str(), self.order_number.as_str()),
            (columns.customer_number.as_str(), self.customer_number.as_str()),
            (columns.customer_name.as_str(), self.customer_name.as_str()),
            (columns.phone.as_str(), self.phone.as_str()),
            (columns.customer_type.as_str(), self.customer_type.as_str()),
            (columns.city.as_str(), self.city.as_str()),
            (columns.branch.as_str(), self.branch.as_str()),
            (columns.sku.as_str(), self.sku.as_str()),
            (columns.product_description.as_str(), self.product_description.as_str()),
            (columns.category.as_str(), self.category.as_str()),
            (columns.department.as_str(), self.department.as_str()),
            (columns.packing_method.as_str(), self.packing_method.as_str()),
            (columns.container_code.as_str(), self.container_code.as_str()),
        ];
        for (column, value) in texts {
            row.entry(column)
                .or_insert_with(|| Value::String(value.to_string()));
        }
        if let Some(date) = self.order_date {
            row.entry(columns.order_date.as_str())
                .or_insert_with(|| Value::String(date.format("%Y-%m-%d").to_string()));
        }

        let decimals = [
            (columns.quantity.as_str(), self.quantity),
            (columns.units_per_pack.as_str(), self.units_per_pack),
            (columns.container_count.as_str(), self.container_count),
            (columns.meals_per_line.as_str(), self.meals_per_line),
            (columns.total_meals_today.as_str(), self.total_meals_today),
            (columns.allergenic_meals.as_str(), self.allergenic_meals),
            (columns.vegetarian_meals.as_str(), self.vegetarian_meals),
        ];
        for (column, value) in decimals {
            row.entry(column).or_insert_with(|| decimal_value(value));
        }

        row.insert(
            derived_columns::TARGET_MEALS.to_string(),
            decimal_value(self.derived.target_meals),
        );
        row.insert(
            derived_columns::CONTAINER_COUNT.to_string(),
            decimal_value(self.container_count),
        );
        row.insert(
            derived_columns::CONTAINER_TYPE.to_string(),
            Value::String(self.container_code.clone()),
        );
        row.insert(
            derived_columns::PACKING_METHOD.to_string(),
            Value::String(self.packing_method.clone()),
        );

        let derived = &self.derived;
        row.insert(
            derived_columns::TARGET_MEALS_FLOOR.to_string(),
            Value::from(derived.target_meals_floor),
        );
        row.insert(derived_columns::PACKS_A.to_string(), Value::from(derived.packs_a));
        row.insert(derived_columns::PACKS_B.to_string(), Value::from(derived.packs_b));
        row.insert(
            derived_columns::TOTAL_PACKS.to_string(),
            Value::from(derived.total_packs),
        );
        row.insert(derived_columns::OVERAGE.to_string(), Value::from(derived.overage));
        row.insert(
            derived_columns::STATUS.to_string(),
            Value::String(derived.status.label().to_string()),
        );

        row
    }
}

/// 解析訂單日期：YYYY-MM-DD、DD/MM/YYYY 或 DD.MM.YYYY
fn parse_order_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    ["%Y-%m-%d", "%d/%m/%Y", "%d.%m.%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// 整數輸出為整數，其餘轉為浮點數（JSON 無十進位型別）
fn decimal_value(value: Decimal) -> Value {
    let normalized = value.normalize();
    if normalized.scale() == 0 {
        if let Some(i) = normalized.to_i64() {
            return Value::from(i);
        }
    }
    normalized
        .to_f64()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derived::OptimizationStatus;
    use rstest::rstest;
    use serde_json::json;

    fn sample_row() -> RawRow {
        let value = json!({
            "הזמנה": 1001,
            "תאריך": "2025-11-03",
            "שם לקוח": "גן שושנים",
            "סניף": "צפון",
            "מק\"ט": "SKU-7",
            "כמות מוצר": "35",
            "פרמטר 8 למוצר": 7,
            "שיטת אירוז": "מיכלים",
            "כמות מיכלים": 4,
            "מספר מנות כללי": 40,
            "פרמטר 2 ללקוח": "מהדרין",
        });
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_from_raw_maps_known_columns() {
        let line = OrderLine::from_raw(&sample_row(), &ColumnMap::default());

        assert_eq!(line.order_number, "1001");
        assert_eq!(line.order_date, NaiveDate::from_ymd_opt(2025, 11, 3));
        assert_eq!(line.sku, "SKU-7");
        assert_eq!(line.quantity, Decimal::from(35));
        assert_eq!(line.units_per_pack, Decimal::from(7));
        assert_eq!(line.container_count, Decimal::from(4));
        assert_eq!(line.total_meals_today, Decimal::from(40));
        // 缺少的數值欄位為 0
        assert_eq!(line.allergenic_meals, Decimal::ZERO);
    }

    #[test]
    fn test_unmapped_columns_pass_through() {
        let line = OrderLine::from_raw(&sample_row(), &ColumnMap::default());

        assert_eq!(line.extra.len(), 1);
        assert_eq!(line.extra.get("פרמטר 2 ללקוח"), Some(&json!("מהדרין")));
        assert_eq!(line.source.len(), 10);
    }

    #[rstest]
    #[case(json!(45965))]
    #[case(json!("3 בנובמבר"))]
    fn test_unparseable_date_survives_export(#[case] date: Value) {
        let columns = ColumnMap::default();
        let mut row = sample_row();
        row.insert("תאריך".to_string(), date.clone());

        let line = OrderLine::from_raw(&row, &columns);
        assert_eq!(line.order_date, None);

        let exported = line.to_export_row(&columns);
        assert_eq!(exported.get("תאריך"), Some(&date));
    }

    #[test]
    fn test_source_cells_are_exported_unchanged() {
        let columns = ColumnMap::default();
        let mut row = sample_row();
        row.insert("פרמטר 8 למוצר".to_string(), json!(""));

        let line = OrderLine::from_raw(&row, &columns);
        assert_eq!(line.units_per_pack, Decimal::ZERO);

        let exported = line.to_export_row(&columns);
        assert_eq!(exported.get("פרמטר 8 למוצר"), Some(&json!("")));
        assert_eq!(exported.get("כמות מוצר"), Some(&json!("35")));
        assert_eq!(exported.get("הזמנה"), Some(&json!(1001)));
        assert_eq!(exported.get("תאריך"), Some(&json!("2025-11-03")));
    }

    #[test]
    fn test_built_line_exports_structured_fields() {
        let columns = ColumnMap::default();
        let line = OrderLine::new("2001", "SKU-9")
            .with_quantity(Decimal::from(14), Decimal::from(2))
            .with_packing_method("מיכלים");

        let row = line.to_export_row(&columns);

        assert_eq!(row.get("הזמנה"), Some(&json!("2001")));
        assert_eq!(row.get("כמות מוצר"), Some(&json!(14)));
        assert_eq!(row.get("פרמטר 8 למוצר"), Some(&json!(2)));
        assert!(row.get("תאריך").is_none());
    }

    #[test]
    fn test_parse_order_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 11, 3);
        assert_eq!(parse_order_date("2025-11-03"), expected);
        assert_eq!(parse_order_date("03/11/2025"), expected);
        assert_eq!(parse_order_date("03.11.2025"), expected);
        assert_eq!(parse_order_date("מחר"), None);
        assert_eq!(parse_order_date(""), None);
    }

    #[test]
    fn test_export_row_contains_derived_columns() {
        let columns = ColumnMap::default();
        let mut line = OrderLine::from_raw(&sample_row(), &columns);
        line.derived = DerivedFields::with_packs(
            Decimal::from(5),
            1,
            0,
            0,
            OptimizationStatus::Exact,
        );

        let row = line.to_export_row(&columns);

        assert_eq!(row.get("פרמטר 2 ללקוח"), Some(&json!("מהדרין")));
        assert_eq!(row.get("מק\"ט"), Some(&json!("SKU-7")));
        assert_eq!(row.get(derived_columns::TARGET_MEALS), Some(&json!(5)));
        assert_eq!(row.get(derived_columns::PACKS_A), Some(&json!(1)));
        assert_eq!(row.get(derived_columns::TOTAL_PACKS), Some(&json!(1)));
        assert_eq!(row.get(derived_columns::STATUS), Some(&json!("מדויק")));
        assert_eq!(row.get(derived_columns::CONTAINER_COUNT), Some(&json!(4)));
        assert_eq!(row.get(derived_columns::CONTAINER_TYPE), Some(&json!("")));
        assert_eq!(row.get(derived_columns::PACKING_METHOD), Some(&json!("מיכלים")));
    }
}
