use bigdecimal::BigDecimal;
use std::fmt;

use crate::models::Product;

/// 排序用的单元格取值
///
/// 同一列的取值总是同一个变体, 跨变体比较不会发生。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue<'a> {
    Text(&'a str),
    Units(u64),
    Amount(BigDecimal),
}

pub type Extractor = fn(&Product) -> SortValue<'_>;

/// 表格列: 列键 -> 取值函数
#[derive(Clone, Copy)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub extract: Extractor,
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

pub const IMAGE: &str = "image";
pub const REFERENCE: &str = "reference";
pub const NAME: &str = "name";
pub const CATEGORY: &str = "category";
pub const PRICE: &str = "price";
pub const TOTAL_SALES: &str = "totalSales";
pub const TOTAL_REVENUE: &str = "totalRevenue";

/// 列注册表, 新增派生列只需在此追加一项
pub static COLUMNS: [Column; 7] = [
    Column { key: IMAGE, label: "Image", extract: image },
    Column { key: REFERENCE, label: "Référence", extract: reference },
    Column { key: NAME, label: "Nom", extract: name },
    Column { key: CATEGORY, label: "Catégorie", extract: category },
    Column { key: PRICE, label: "Prix", extract: price },
    Column { key: TOTAL_SALES, label: "Ventes Totales", extract: total_sales },
    Column { key: TOTAL_REVENUE, label: "Chiffre d'Affaires", extract: total_revenue },
];

/// 未知列键返回 None
pub fn column(key: &str) -> Option<&'static Column> {
    COLUMNS.iter().find(|c| c.key == key)
}

fn image(p: &Product) -> SortValue<'_> {
    SortValue::Text(&p.image_ref)
}

fn reference(p: &Product) -> SortValue<'_> {
    SortValue::Text(&p.reference)
}

fn name(p: &Product) -> SortValue<'_> {
    SortValue::Text(&p.name)
}

fn category(p: &Product) -> SortValue<'_> {
    SortValue::Text(&p.category)
}

fn price(p: &Product) -> SortValue<'_> {
    SortValue::Amount(p.unit_price.clone())
}

fn total_sales(p: &Product) -> SortValue<'_> {
    SortValue::Units(p.total_units_sold())
}

fn total_revenue(p: &Product) -> SortValue<'_> {
    SortValue::Amount(p.total_revenue())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_declared_keys() {
        let keys: Vec<_> = COLUMNS.iter().map(|c| c.key).collect();
        assert_eq!(
            keys,
            ["image", "reference", "name", "category", "price", "totalSales", "totalRevenue"]
        );
        assert!(column("unknown").is_none());
    }

    #[test]
    fn derived_columns_compute_from_sales() {
        let p = Product::new("P-1", "Lamp", "Home", BigDecimal::from(3), [2; 12]);
        assert_eq!((column(TOTAL_SALES).unwrap().extract)(&p), SortValue::Units(24));
        assert_eq!(
            (column(TOTAL_REVENUE).unwrap().extract)(&p),
            SortValue::Amount(BigDecimal::from(72))
        );
        assert_eq!((column(NAME).unwrap().extract)(&p), SortValue::Text("Lamp"));
    }
}
