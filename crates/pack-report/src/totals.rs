//! 匯總累加

use rust_decimal::Decimal;

/// 累加十進位數值，溢位時飽和為 `Decimal::MAX` / `Decimal::MIN`
pub(crate) fn accumulate(total: &mut Decimal, value: Decimal, label: &str, field: &str) {
    *total = match total.checked_add(value) {
        Some(sum) => sum,
        None => {
            tracing::warn!("分組 {} 的 {} 合計溢位，已飽和", label, field);
            if value.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        }
    };
}
