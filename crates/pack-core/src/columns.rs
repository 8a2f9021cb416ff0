//! 試算表欄位對應

use serde::{Deserialize, Serialize};

/// 衍生欄位的匯出欄名
pub mod derived_columns {
    pub const TARGET_MEALS: &str = "מנות לתכנון";
    pub const TARGET_MEALS_FLOOR: &str = "מנות לתכנון מעוגל";
    pub const PACKS_A: &str = "אריזות 5";
    pub const PACKS_B: &str = "אריזות 7";
    pub const TOTAL_PACKS: &str = "סה\"כ אריזות";
    pub const OVERAGE: &str = "עודף/פחת";
    pub const STATUS: &str = "סטטוס אופטימיזציה";
    pub const CONTAINER_COUNT: &str = "כמות מיכלים מחושב";
    pub const CONTAINER_TYPE: &str = "סוג מיכל";
    pub const PACKING_METHOD: &str = "שיטת אירוז מחושב";
}

/// 來源試算表的欄名對應
///
/// 預設值是來源資料的業務欄名，可透過配置覆寫以對應其他試算表。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub order_number: String,
    pub order_date: String,
    pub customer_number: String,
    pub customer_name: String,
    pub phone: String,
    pub customer_type: String,
    pub city: String,
    pub branch: String,
    pub sku: String,
    pub product_description: String,
    pub category: String,
    pub department: String,
    pub quantity: String,
    pub units_per_pack: String,
    pub packing_method: String,
    pub container_count: String,
    pub container_code: String,
    pub meals_per_line: String,

    // 訂單層級欄位（同一訂單的每一行都相同）
    pub total_meals_today: String,
    pub allergenic_meals: String,
    pub vegetarian_meals: String,
}

impl ColumnMap {
    /// 全部已對應的欄名
    pub fn mapped_columns(&self) -> [&str; 21] {
        [
            &self.order_number,
            &self.order_date,
            &self.customer_number,
            &self.customer_name,
            &self.phone,
            &self.customer_type,
            &self.city,
            &self.branch,
            &self.sku,
            &self.product_description,
            &self.category,
            &self.department,
            &self.quantity,
            &self.units_per_pack,
            &self.packing_method,
            &self.container_count,
            &self.container_code,
            &self.meals_per_line,
            &self.total_meals_today,
            &self.allergenic_meals,
            &self.vegetarian_meals,
        ]
    }

    /// 檢查欄名是否已對應到結構化欄位
    pub fn is_mapped(&self, column: &str) -> bool {
        self.mapped_columns().contains(&column)
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            order_number: "הזמנה".to_string(),
            order_date: "תאריך".to_string(),
            customer_number: "מס. לקוח".to_string(),
            customer_name: "שם לקוח".to_string(),
            phone: "מספר טלפון".to_string(),
            customer_type: "פרמטר 1 ללקוח".to_string(),
            city: "עיר".to_string(),
            branch: "סניף".to_string(),
            sku: "מק\"ט".to_string(),
            product_description: "תאור מוצר".to_string(),
            category: "פרמטר 1 לקוד".to_string(),
            department: "פרמטר 6 למוצר".to_string(),
            quantity: "כמות מוצר".to_string(),
            units_per_pack: "פרמטר 8 למוצר".to_string(),
            packing_method: "שיטת אירוז".to_string(),
            container_count: "כמות מיכלים".to_string(),
            container_code: "קוד מיכל".to_string(),
            meals_per_line: "מספר מנות לשורה".to_string(),
            total_meals_today: "מספר מנות כללי".to_string(),
            allergenic_meals: "מספר מנות אלרגניות".to_string(),
            vegetarian_meals: "מספר מנות צמחוניות".to_string(),
        }
    }
}
