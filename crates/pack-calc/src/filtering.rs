//! 訂單行篩選與搜尋

use pack_core::OrderLine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 屬性篩選條件（未設置的條件視為全部符合）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFilter {
    pub branch: Option<String>,
    pub city: Option<String>,
    pub customer_type: Option<String>,
    pub category: Option<String>,
}

impl RowFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置分店
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// 建構器模式：設置城市
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// 建構器模式：設置客戶類型
    pub fn with_customer_type(mut self, customer_type: impl Into<String>) -> Self {
        self.customer_type = Some(customer_type.into());
        self
    }

    /// 建構器模式：設置類別
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// 是否沒有任何條件
    pub fn is_empty(&self) -> bool {
        self.branch.is_none()
            && self.city.is_none()
            && self.customer_type.is_none()
            && self.category.is_none()
    }

    /// 檢查訂單行是否符合條件
    pub fn matches(&self, line: &OrderLine) -> bool {
        fn accepts(condition: &Option<String>, value: &str) -> bool {
            match condition.as_deref() {
                None | Some("") => true,
                Some(expected) => expected == value,
            }
        }

        accepts(&self.branch, &line.branch)
            && accepts(&self.city, &line.city)
            && accepts(&self.customer_type, &line.customer_type)
            && accepts(&self.category, &line.category)
    }

    /// 篩選訂單行（保持原始順序）
    pub fn apply<'a>(&self, lines: &'a [OrderLine]) -> Vec<&'a OrderLine> {
        lines.iter().filter(|line| self.matches(line)).collect()
    }
}

/// 搜尋訂單行（保持原始順序）
///
/// 空白查詢回傳全部。訂單號需完全相同；客戶編號、客戶名稱與電話為包含比對。
/// 比對不分大小寫。
pub fn search<'a, I>(lines: I, query: &str) -> Vec<&'a OrderLine>
where
    I: IntoIterator<Item = &'a OrderLine>,
{
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return lines.into_iter().collect();
    }

    lines
        .into_iter()
        .filter(|line| {
            line.order_number.to_lowercase() == term
                || line.customer_number.to_lowercase().contains(&term)
                || line.customer_name.to_lowercase().contains(&term)
                || line.phone.to_lowercase().contains(&term)
        })
        .collect()
}

/// 各篩選維度的可選值（去重、排序、排除空值）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub branches: Vec<String>,
    pub cities: Vec<String>,
    pub customer_types: Vec<String>,
    pub categories: Vec<String>,
}

impl FilterOptions {
    /// 從訂單行收集可選值
    pub fn collect(lines: &[OrderLine]) -> Self {
        Self {
            branches: distinct(lines, |line| line.branch.as_str()),
            cities: distinct(lines, |line| line.city.as_str()),
            customer_types: distinct(lines, |line| line.customer_type.as_str()),
            categories: distinct(lines, |line| line.category.as_str()),
        }
    }
}

fn distinct(lines: &[OrderLine], field: fn(&OrderLine) -> &str) -> Vec<String> {
    lines
        .iter()
        .map(field)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Vec<OrderLine> {
        let mut a = OrderLine::new("1001", "SKU-1").with_branch("צפון");
        a.city = "חיפה".to_string();
        a.customer_name = "Gan Shoshanim".to_string();
        a.phone = "04-8123456".to_string();
        a.category = "עיקריות".to_string();

        let mut b = OrderLine::new("1002", "SKU-2").with_branch("דרום");
        b.city = "באר שבע".to_string();
        b.customer_number = "C-77".to_string();
        b.category = "תוספות".to_string();

        let mut c = OrderLine::new("1001", "SKU-3").with_branch("צפון");
        c.city = "חיפה".to_string();
        c.customer_name = "Gan Shoshanim".to_string();
        c.category = "תוספות".to_string();

        vec![a, b, c]
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let lines = lines();
        let filter = RowFilter::new();

        assert!(filter.is_empty());
        assert_eq!(filter.apply(&lines).len(), 3);
    }

    #[test]
    fn test_filter_combines_conditions() {
        let lines = lines();
        let filter = RowFilter::new().with_branch("צפון").with_category("תוספות");

        let matched = filter.apply(&lines);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].sku, "SKU-3");
    }

    #[test]
    fn test_search_order_number_is_exact() {
        let lines = lines();

        let matched = search(&lines, " 1001 ");
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|line| line.order_number == "1001"));

        assert!(search(&lines, "100").is_empty());
    }

    #[test]
    fn test_search_customer_fields_contain() {
        let lines = lines();

        assert_eq!(search(&lines, "shoshanim").len(), 2);
        assert_eq!(search(&lines, "c-7").len(), 1);
        assert_eq!(search(&lines, "8123").len(), 1);
        assert_eq!(search(&lines, "   ").len(), 3);
    }

    #[test]
    fn test_filter_options_are_sorted_and_distinct() {
        let mut lines = lines();
        lines.push(OrderLine::new("1003", "SKU-4"));

        let options = FilterOptions::collect(&lines);
        assert_eq!(options.branches, vec!["דרום".to_string(), "צפון".to_string()]);
        assert_eq!(options.cities.len(), 2);
        assert_eq!(options.categories.len(), 2);
        assert!(options.customer_types.is_empty());
    }
}
