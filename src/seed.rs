//! 演示数据 (无真实数据源)

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::str::FromStr;

use crate::models::{Client, Product};

fn price(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap_or_default()
}

pub fn demo_products() -> Vec<Product> {
    vec![
        Product::new(
            "REF-001",
            "Smartphone Galaxy A54",
            "Électronique",
            price("3499.00"),
            [42, 38, 45, 50, 47, 53, 61, 58, 49, 55, 60, 72],
        )
        .with_image("/images/smartphone.jpg"),
        Product::new(
            "REF-002",
            "Casque Bluetooth",
            "Électronique",
            price("599.90"),
            [80, 75, 90, 85, 95, 110, 120, 115, 100, 98, 105, 130],
        )
        .with_image("/images/casque.jpg"),
        Product::new(
            "REF-003",
            "Théière Marocaine",
            "Maison",
            price("249.50"),
            [30, 28, 35, 40, 38, 25, 20, 22, 33, 41, 45, 60],
        )
        .with_image("/images/theiere.jpg"),
        Product::new(
            "REF-004",
            "Tapis Berbère",
            "Maison",
            price("1850.00"),
            [5, 7, 6, 8, 9, 4, 3, 5, 7, 10, 12, 9],
        )
        .with_image("/images/tapis.jpg"),
        Product::new(
            "REF-005",
            "Babouches en cuir",
            "Mode",
            price("189.00"),
            [60, 55, 70, 65, 80, 90, 110, 105, 75, 68, 72, 85],
        )
        .with_image("/images/babouches.jpg"),
    ]
}

pub fn demo_clients() -> Vec<Client> {
    vec![Client {
        id: 1,
        first_name: "Jean".to_string(),
        last_name: "Dupont".to_string(),
        email: "jean.dupont@example.com".to_string(),
        phone: "0612345678".to_string(),
        address: "123 Rue de la République".to_string(),
        city: "Paris".to_string(),
        postal_code: "75001".to_string(),
        country: "France".to_string(),
        orders: 5,
        total_purchases: price("1250.50"),
        registered_on: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap_or_default(),
    }]
}
