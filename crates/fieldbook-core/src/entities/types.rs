//! List payload records for products, clients and visit reports

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};

/// Product card as served by `/products/list` (images are fetched separately)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub taxed_price_store: f64,
    #[serde(default)]
    pub untaxed_price_store: f64,
    #[serde(default)]
    pub taxed_price_client: f64,
    #[serde(default)]
    pub untaxed_price_client: f64,
    #[serde(default)]
    pub has_thumbnail: bool,
    #[serde(default)]
    pub image_count: u32,
    #[serde(default)]
    pub can_edit: bool,
}

impl Entity for Product {
    const KIND: EntityKind = EntityKind::Products;

    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> String {
        self.name.clone()
    }
}

/// Named contact attached to a client (owner, purchasing manager, accountant)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub salesman_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub has_thumbnail: bool,
    #[serde(default)]
    pub image_count: u32,
    #[serde(default)]
    pub owner: Option<Contact>,
    #[serde(default)]
    pub purchasing_manager: Option<Contact>,
    #[serde(default)]
    pub accountant: Option<Contact>,
    #[serde(default)]
    pub assigned_user: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl Entity for Client {
    const KIND: EntityKind = EntityKind::Clients;

    fn id(&self) -> i64 {
        self.id
    }

    fn is_active(&self) -> Option<bool> {
        self.is_active
    }

    fn title(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportNote {
    pub id: i64,
    pub note_text: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Product line recorded during a visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportProduct {
    pub id: i64,
    pub product_id: i64,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub displayed_price: Option<f64>,
    #[serde(default)]
    pub nearly_expired: bool,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub units_count: Option<u32>,
}

/// Visit report as served by `/visit-reports/list`
///
/// Search rows carry only id, client name, visit date and status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    #[serde(default)]
    pub client_id: Option<i64>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    pub visit_date: NaiveDate,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub notes: Vec<ReportNote>,
    #[serde(default)]
    pub products: Vec<ReportProduct>,
    #[serde(default)]
    pub can_edit: bool,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub image_count: u32,
}

impl Entity for Report {
    const KIND: EntityKind = EntityKind::Reports;

    fn id(&self) -> i64 {
        self.id
    }

    fn is_active(&self) -> Option<bool> {
        self.is_active
    }

    fn title(&self) -> String {
        format!(
            "{} - {}",
            self.client_name.as_deref().unwrap_or("Unknown"),
            self.visit_date
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_payload_decodes() {
        let report: Report = serde_json::from_value(json!({
            "id": 4,
            "client_id": 9,
            "client_name": "Al Noor Market",
            "user_id": 2,
            "username": "sami",
            "visit_date": "2024-03-11",
            "created_at": "2024-03-11T09:15:02.120000",
            "notes": [{"id": 1, "note_text": "Shelf restocked", "created_at": "2024-03-11T09:20:00"}],
            "products": [{
                "id": 5, "product_id": 12, "product_name": "Olive Oil 1L",
                "displayed_price": 4.5, "nearly_expired": true,
                "expiry_date": "2024-04-01", "units_count": 6
            }],
            "can_edit": true,
            "is_active": true,
            "image_count": 2
        }))
        .unwrap();

        assert_eq!(report.visit_date, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(report.products[0].units_count, Some(6));
        assert_eq!(report.title(), "Al Noor Market - 2024-03-11");
        assert_eq!(Entity::is_active(&report), Some(true));
    }

    #[test]
    fn test_client_optional_fields_default() {
        let client: Client = serde_json::from_value(json!({"id": 1, "name": "Bakery"})).unwrap();
        assert!(client.owner.is_none());
        assert_eq!(client.image_count, 0);
        assert_eq!(Entity::is_active(&client), None);
    }

    #[test]
    fn test_product_missing_name_is_rejected() {
        assert!(serde_json::from_value::<Product>(json!({"id": 1})).is_err());
    }
}
