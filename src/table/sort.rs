use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::column::{column, SortValue};
use crate::models::Product;

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// 降序翻转比较结果, 而不是翻转最终列表, 相等元素保持原顺序
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// 排序配置: 当前列键 + 方向
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    /// 点击表头: 同一列翻转方向, 新列从升序开始
    ///
    /// 未注册的列键同样会被记录, 只是排序时不起作用。
    pub fn request_sort(&mut self, key: &str) {
        if self.key.as_deref() == Some(key) {
            self.direction = self.direction.toggled();
        } else {
            self.key = Some(key.to_string());
            self.direction = SortDirection::Asc;
        }
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }
}

/// 返回排序后的引用列表, 输入切片本身不变
pub fn sorted_view<'a>(records: &'a [Product], config: &SortConfig) -> Vec<&'a Product> {
    let Some(extract) = config.key.as_deref().and_then(column).map(|c| c.extract) else {
        return records.iter().collect();
    };

    let mut keyed: Vec<(SortValue<'a>, &'a Product)> =
        records.iter().map(|p| (extract(p), p)).collect();
    // sort_by 是稳定排序
    keyed.sort_by(|(a, _), (b, _)| config.direction.apply(a.cmp(b)));
    keyed.into_iter().map(|(_, p)| p).collect()
}
