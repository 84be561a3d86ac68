//! Model builders for unit tests

use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::models::*;
use crate::types::Id;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

pub fn organization(id: Id, name: &str, kind: OrganizationType) -> Organization {
    Organization {
        id,
        name: name.to_string(),
        kind,
        created_at: at(2024, 1, 1),
        updated_at: at(2024, 1, 1),
    }
}

pub fn material(id: Id, name: &str, unit: Unit) -> Material {
    Material {
        id,
        name: name.to_string(),
        unit,
        created_at: at(2024, 1, 1),
        updated_at: at(2024, 1, 1),
    }
}

pub fn inventory(id: Id, material_name: &str, unit: Unit, quantity: &str, owner: Id) -> Inventory {
    Inventory {
        id,
        quantity: dec(quantity),
        organization: organization(owner, &format!("Workshop {}", owner), OrganizationType::JewelryMaking),
        material: material(id * 100, material_name, unit),
        created_at: at(2024, 1, 1),
        updated_at: at(2024, 1, 1),
    }
}

pub fn transaction(
    id: Id,
    sender: &str,
    receiver: &str,
    status: TransactionStatus,
    created_at: DateTime<Utc>,
) -> Transaction {
    Transaction {
        id,
        items: Vec::new(),
        sender: organization(1, sender, OrganizationType::Bank),
        receiver: organization(2, receiver, OrganizationType::GoldProcessing),
        status,
        created_at,
        updated_at: created_at,
    }
}

pub fn process(id: Id, organization_name: &str, status: ProcessStatus, started_at: DateTime<Utc>) -> Process {
    Process {
        id,
        organization: organization(3, organization_name, OrganizationType::GoldProcessing),
        inputs: Vec::new(),
        outputs: Vec::new(),
        status,
        started_at,
        finished_at: None,
    }
}

pub fn user(id: Id, username: &str, email: &str, organization_name: Option<&str>) -> User {
    User {
        id,
        username: username.to_string(),
        email: email.to_string(),
        first_name: String::new(),
        last_name: String::new(),
        organization: organization_name.map(|name| organization(4, name, OrganizationType::Repair)),
        is_active: true,
        is_staff: false,
    }
}
