//! 分組

use pack_core::{OrderLine, PackError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// 空分組值的標籤
pub const NO_VALUE_LABEL: &str = "ללא ערך";

/// 分組欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// 產品編號
    #[default]
    Sku,
    /// 產品描述
    Product,
    /// 類別
    Category,
    /// 部門
    Department,
    /// 分店
    Branch,
}

impl GroupBy {
    /// 解析分組選擇器，無法識別時退回產品編號
    pub fn from_selector(selector: &str) -> Self {
        selector.parse().unwrap_or_else(|_| {
            tracing::debug!("未知的分組欄位 {:?}，改用產品編號", selector);
            GroupBy::Sku
        })
    }

    /// 選擇器名稱
    pub fn selector(&self) -> &'static str {
        match self {
            GroupBy::Sku => "sku",
            GroupBy::Product => "product",
            GroupBy::Category => "category",
            GroupBy::Department => "department",
            GroupBy::Branch => "branch",
        }
    }

    /// 取得訂單行的分組值
    pub fn key_of<'a>(&self, line: &'a OrderLine) -> &'a str {
        match self {
            GroupBy::Sku => &line.sku,
            GroupBy::Product => &line.product_description,
            GroupBy::Category => &line.category,
            GroupBy::Department => &line.department,
            GroupBy::Branch => &line.branch,
        }
    }

    /// 取得分組標籤（空值歸入「無值」）
    pub fn label_of<'a>(&self, line: &'a OrderLine) -> &'a str {
        match self.key_of(line) {
            "" => NO_VALUE_LABEL,
            key => key,
        }
    }
}

impl FromStr for GroupBy {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sku" => Ok(GroupBy::Sku),
            "product" => Ok(GroupBy::Product),
            "category" => Ok(GroupBy::Category),
            "department" => Ok(GroupBy::Department),
            "branch" => Ok(GroupBy::Branch),
            _ => Err(PackError::InvalidSelector(s.to_string())),
        }
    }
}

impl std::fmt::Display for GroupBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.selector())
    }
}

/// 一個分組及其訂單行（保持原始順序）
#[derive(Debug, Clone)]
pub struct RowGroup<'a> {
    pub label: String,
    pub rows: Vec<&'a OrderLine>,
}

/// 依分組欄位分組
///
/// 分組順序為分組值首次出現的順序，組內訂單行保持輸入順序。
pub fn group_rows<'a, I>(rows: I, group_by: GroupBy) -> Vec<RowGroup<'a>>
where
    I: IntoIterator<Item = &'a OrderLine>,
{
    let mut groups: Vec<RowGroup<'a>> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for line in rows {
        let label = group_by.label_of(line);
        let position = *index.entry(label).or_insert_with(|| {
            groups.push(RowGroup {
                label: label.to_string(),
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[position].rows.push(line);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("sku", GroupBy::Sku)]
    #[case("product", GroupBy::Product)]
    #[case("Category", GroupBy::Category)]
    #[case(" department ", GroupBy::Department)]
    #[case("branch", GroupBy::Branch)]
    #[case("city", GroupBy::Sku)]
    #[case("", GroupBy::Sku)]
    fn test_from_selector(#[case] selector: &str, #[case] expected: GroupBy) {
        assert_eq!(GroupBy::from_selector(selector), expected);
    }

    #[test]
    fn test_strict_parse_rejects_unknown() {
        assert!(matches!(
            "city".parse::<GroupBy>(),
            Err(PackError::InvalidSelector(_))
        ));
        assert_eq!("branch".parse::<GroupBy>().unwrap(), GroupBy::Branch);
    }

    #[test]
    fn test_groups_follow_first_encounter_order() {
        let lines = vec![
            OrderLine::new("1", "B"),
            OrderLine::new("2", "A"),
            OrderLine::new("3", "B"),
            OrderLine::new("4", ""),
            OrderLine::new("5", "A"),
        ];

        let groups = group_rows(&lines, GroupBy::Sku);
        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["B", "A", NO_VALUE_LABEL]);

        let b_orders: Vec<_> = groups[0].rows.iter().map(|l| l.order_number.as_str()).collect();
        assert_eq!(b_orders, vec!["1", "3"]);
    }

    #[test]
    fn test_group_by_branch_collects_missing_values() {
        let lines = vec![
            OrderLine::new("1", "A").with_branch("צפון"),
            OrderLine::new("2", "A"),
            OrderLine::new("3", "A"),
        ];

        let groups = group_rows(&lines, GroupBy::Branch);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].label, NO_VALUE_LABEL);
        assert_eq!(groups[1].rows.len(), 2);
    }
}
