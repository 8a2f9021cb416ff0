//! 訂單規劃示例：載入一天的訂單行，輸出生產匯總與包裝匯總

use anyhow::Context;
use packplan::{logging, GroupBy, PackingConfig, PlanningSession, RawRow};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    logging::init();

    println!("=== 訂單包裝規劃示例 ===\n");

    let rows: Vec<RawRow> = serde_json::from_value(json!([
        {
            "הזמנה": 1001, "סניף": "צפון", "מק\"ט": "SKU-ORZO", "תאור מוצר": "אורז",
            "כמות מוצר": 35, "פרמטר 8 למוצר": 7, "שיטת אירוז": "מיכלים", "כמות מיכלים": 2,
            "מספר מנות לשורה": 35, "מספר מנות כללי": 60, "מספר מנות אלרגניות": 4,
        },
        {
            "הזמנה": 1001, "סניף": "צפון", "מק\"ט": "SKU-SCHNITZEL", "תאור מוצר": "שניצל",
            "כמות מוצר": 11, "פרמטר 8 למוצר": 1, "שיטת אירוז": "מיכלים", "כמות מיכלים": 3,
            "מספר מנות לשורה": 11, "מספר מנות כללי": 60, "מספר מנות אלרגניות": 4,
        },
        {
            "הזמנה": 1002, "סניף": "דרום", "מק\"ט": "SKU-SALAD", "תאור מוצר": "סלט",
            "כמות מוצר": 24, "פרמטר 8 למוצר": 2, "שיטת אירוז": "חמגשיות", "כמות מיכלים": 5,
            "מספר מנות לשורה": 24, "מספר מנות כללי": 24,
        },
    ]))
    .context("無法解析示例資料")?;

    let mut session = PlanningSession::new(PackingConfig::default())?;
    session.load_rows(rows);

    for allow_overage in [false, true] {
        session.set_allow_overage(allow_overage);
        println!("允許超量: {}", allow_overage);

        for line in session.lines() {
            println!(
                "  - 訂單 {}, 產品 {}: 計劃份數 {}, 5 × {}, 7 × {}, 超量 {}, 狀態 {}",
                line.order_number,
                line.sku,
                line.derived.target_meals,
                line.derived.packs_a,
                line.derived.packs_b,
                line.derived.overage,
                line.derived.status.label()
            );
        }

        println!("\n  生產匯總（依分店）:");
        for summary in session.production_report(GroupBy::Branch) {
            let row = summary.rounded();
            println!(
                "    {}: 數量 {}, 份數 {}, 今日總份數 {}, 過敏原 {}, 素食 {}",
                row.label,
                row.total_quantity,
                row.total_meals_per_line,
                row.total_meals_today,
                row.total_allergenic,
                row.total_vegetarian
            );
        }

        println!("\n  包裝匯總（依產品編號）:");
        for summary in session.packing_report(GroupBy::Sku) {
            let row = summary.rounded();
            println!(
                "    {}: 5 × {}, 7 × {}, 合計 {}, 容器 {}, 托盤 {}, 無解 {}, 超量 {}",
                row.label,
                row.total_packs_a,
                row.total_packs_b,
                row.total_packs,
                row.total_containers,
                row.total_trays,
                row.no_solution_count,
                row.total_overage
            );
        }
        println!();
    }

    Ok(())
}
