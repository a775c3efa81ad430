use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::Result;
use crate::models::{Settings, SettingsPatch};
use crate::seed;
use crate::service::{ClientDirectory, ProductCatalog, ALL_CATEGORIES};
use crate::table::SortableAggregateTable;

/// 仪表盘全部内存状态
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub catalog: ProductCatalog,
    pub clients: ClientDirectory,
    pub settings: Settings,
    pub selected_category: String,
    /// 仪表盘页面上的那张表, 排序配置随进程重启重置
    pub table: SortableAggregateTable,
}

impl DashboardState {
    pub fn new(catalog: ProductCatalog, clients: ClientDirectory, settings: Settings) -> Self {
        Self {
            catalog,
            clients,
            table: SortableAggregateTable::new(settings.currency),
            settings,
            selected_category: ALL_CATEGORIES.to_string(),
        }
    }

    pub fn demo(settings: Settings) -> Self {
        Self::new(
            ProductCatalog::new(seed::demo_products()),
            ClientDirectory::new(seed::demo_clients()),
            settings,
        )
    }

    /// 合并设置; 货币变化同步到表格
    pub fn apply_settings(&mut self, patch: SettingsPatch) -> Result<&Settings> {
        self.settings.apply(patch)?;
        self.table.set_currency(self.settings.currency);
        Ok(&self.settings)
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(ProductCatalog::default(), ClientDirectory::default(), Settings::default())
    }
}

/// 共享状态句柄, 由路由注入到各个处理函数
#[derive(Debug, Clone, Default)]
pub struct DashboardStore {
    inner: Arc<RwLock<DashboardState>>,
}

impl DashboardStore {
    pub fn new(state: DashboardState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, DashboardState> {
        self.inner.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, DashboardState> {
        self.inner.write().await
    }
}
