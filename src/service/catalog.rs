use indexmap::IndexSet;

use crate::error::{DashboardError, Result};
use crate::models::{Product, ProductInput};

/// 分类筛选中表示"全部"的取值
pub const ALL_CATEGORIES: &str = "all";

/// 商品目录 (内存, 保持插入顺序)
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, reference: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.reference == reference)
    }

    /// 插入已规整的商品, reference 必须唯一
    pub fn insert(&mut self, product: Product) -> Result<Product> {
        if self.get(&product.reference).is_some() {
            return Err(DashboardError::Conflict(format!(
                "product '{}' already exists",
                product.reference
            )));
        }
        tracing::info!("Product {} added ({})", product.reference, product.name);
        self.products.push(product.clone());
        Ok(product)
    }

    pub fn add(&mut self, input: ProductInput) -> Result<Product> {
        self.insert(input.normalize()?)
    }

    /// 编辑商品, reference 不可修改
    pub fn update(&mut self, reference: &str, input: ProductInput) -> Result<Product> {
        let slot = self
            .products
            .iter_mut()
            .find(|p| p.reference == reference)
            .ok_or_else(|| DashboardError::NotFound(format!("product '{}'", reference)))?;

        *slot = input.normalize_onto(slot)?;
        tracing::info!("Product {} updated", reference);
        Ok(slot.clone())
    }

    pub fn delete(&mut self, reference: &str) -> Result<Product> {
        let idx = self
            .products
            .iter()
            .position(|p| p.reference == reference)
            .ok_or_else(|| DashboardError::NotFound(format!("product '{}'", reference)))?;

        let removed = self.products.remove(idx);
        tracing::info!("Product {} deleted", reference);
        Ok(removed)
    }

    /// 去重后的分类列表, 按首次出现顺序
    pub fn categories(&self) -> IndexSet<String> {
        self.products.iter().map(|p| p.category.clone()).collect()
    }

    /// 搜索词 (名称/编号/分类, 不区分大小写) + 分类筛选
    pub fn filter(&self, search: Option<&str>, category: Option<&str>) -> Vec<Product> {
        let term = search
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);
        let category = category.filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);

        self.products
            .iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .filter(|p| match &term {
                Some(t) => {
                    p.name.to_lowercase().contains(t)
                        || p.reference.to_lowercase().contains(t)
                        || p.category.to_lowercase().contains(t)
                }
                None => true,
            })
            .cloned()
            .collect()
    }
}
