use bigdecimal::{BigDecimal, Zero};
use chrono::Local;

use crate::error::{DashboardError, Result};
use crate::models::{Client, ClientInput};

/// 客户名录 (内存)
#[derive(Debug, Clone)]
pub struct ClientDirectory {
    clients: Vec<Client>,
    next_id: u64,
}

impl Default for ClientDirectory {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ClientDirectory {
    pub fn new(clients: Vec<Client>) -> Self {
        let next_id = clients.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self { clients, next_id }
    }

    pub fn list(&self) -> &[Client] {
        &self.clients
    }

    pub fn get(&self, id: u64) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// 新客户: 分配编号, 订单数与消费额从 0 开始
    pub fn add(&mut self, input: ClientInput) -> Result<Client> {
        let input = input.validate()?;
        let client = Client {
            id: self.next_id,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            city: input.city,
            postal_code: input.postal_code,
            country: input.country,
            orders: 0,
            total_purchases: BigDecimal::zero(),
            registered_on: Local::now().date_naive(),
        };
        self.next_id += 1;

        tracing::info!("Client {} added ({})", client.id, client.full_name());
        self.clients.push(client.clone());
        Ok(client)
    }

    /// 编辑客户: 编号、统计字段与注册日期保持不变
    pub fn update(&mut self, id: u64, input: ClientInput) -> Result<Client> {
        let input = input.validate()?;
        let client = self
            .clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DashboardError::NotFound(format!("client {}", id)))?;

        client.first_name = input.first_name;
        client.last_name = input.last_name;
        client.email = input.email;
        client.phone = input.phone;
        client.address = input.address;
        client.city = input.city;
        client.postal_code = input.postal_code;
        client.country = input.country;

        tracing::info!("Client {} updated", id);
        Ok(client.clone())
    }

    pub fn delete(&mut self, id: u64) -> Result<Client> {
        let idx = self
            .clients
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| DashboardError::NotFound(format!("client {}", id)))?;

        tracing::info!("Client {} deleted", id);
        Ok(self.clients.remove(idx))
    }

    /// 按 "名 姓"、邮箱 (不区分大小写) 或电话号码搜索
    pub fn search(&self, term: Option<&str>) -> Vec<Client> {
        let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
            return self.clients.clone();
        };
        let lowered = term.to_lowercase();

        self.clients
            .iter()
            .filter(|c| {
                c.full_name().to_lowercase().contains(&lowered)
                    || c.email.to_lowercase().contains(&lowered)
                    || c.phone.contains(term)
            })
            .cloned()
            .collect()
    }
}
