use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::parse_date;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentType {
    Ski,
    Snowboard,
    Bicycle,
    Climbing,
    Diving,
    Golf,
    Tennis,
    Fitness,
    #[serde(rename = "Water Sports")]
    WaterSports,
    #[serde(rename = "Winter Sports")]
    WinterSports,
    Other,
}

impl EquipmentType {
    pub const ALL: [EquipmentType; 11] = [
        EquipmentType::Ski,
        EquipmentType::Snowboard,
        EquipmentType::Bicycle,
        EquipmentType::Climbing,
        EquipmentType::Diving,
        EquipmentType::Golf,
        EquipmentType::Tennis,
        EquipmentType::Fitness,
        EquipmentType::WaterSports,
        EquipmentType::WinterSports,
        EquipmentType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EquipmentType::Ski => "Ski",
            EquipmentType::Snowboard => "Snowboard",
            EquipmentType::Bicycle => "Bicycle",
            EquipmentType::Climbing => "Climbing",
            EquipmentType::Diving => "Diving",
            EquipmentType::Golf => "Golf",
            EquipmentType::Tennis => "Tennis",
            EquipmentType::Fitness => "Fitness",
            EquipmentType::WaterSports => "Water Sports",
            EquipmentType::WinterSports => "Winter Sports",
            EquipmentType::Other => "Other",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ItemCondition {
    New,
    Excellent,
    Good,
    Fair,
    Poor,
    Damaged,
}

impl ItemCondition {
    pub const ALL: [ItemCondition; 6] = [
        ItemCondition::New,
        ItemCondition::Excellent,
        ItemCondition::Good,
        ItemCondition::Fair,
        ItemCondition::Poor,
        ItemCondition::Damaged,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ItemCondition::New => "New",
            ItemCondition::Excellent => "Excellent",
            ItemCondition::Good => "Good",
            ItemCondition::Fair => "Fair",
            ItemCondition::Poor => "Poor",
            ItemCondition::Damaged => "Damaged",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum LoanType {
    Rental,
    #[serde(rename = "Borrowed")]
    Borrow,
    #[serde(rename = "Lent Out")]
    Lend,
    #[serde(rename = "Demo Equipment")]
    Demo,
    Warranty,
}

impl LoanType {
    pub const ALL: [LoanType; 5] = [
        LoanType::Rental,
        LoanType::Borrow,
        LoanType::Lend,
        LoanType::Demo,
        LoanType::Warranty,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LoanType::Rental => "Rental",
            LoanType::Borrow => "Borrowed",
            LoanType::Lend => "Lent Out",
            LoanType::Demo => "Demo Equipment",
            LoanType::Warranty => "Warranty",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    Card,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    Digital,
    Other,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::BankTransfer,
        PaymentMethod::Digital,
        PaymentMethod::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Digital => "Digital",
            PaymentMethod::Other => "Other",
        }
    }
}

/// Derived from the current date and the item's end date, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanStatus {
    Active,
    DueSoon,
    DueToday,
    Overdue,
    Returned,
}

impl LoanStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Active => "Active",
            LoanStatus::DueSoon => "Due Soon",
            LoanStatus::DueToday => "Due Today",
            LoanStatus::Overdue => "Overdue",
            LoanStatus::Returned => "Returned",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum LoanAction {
    Borrowed,
    Extended,
    Returned,
    Damaged,
    Repaired,
    Paid,
    Contacted,
}

impl LoanAction {
    pub const ALL: [LoanAction; 7] = [
        LoanAction::Borrowed,
        LoanAction::Extended,
        LoanAction::Returned,
        LoanAction::Damaged,
        LoanAction::Repaired,
        LoanAction::Paid,
        LoanAction::Contacted,
    ];
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl Contact {
    pub fn new(name: impl Into<String>) -> Self {
        Contact {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: None,
            email: None,
            company: None,
            address: None,
            notes: String::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoanItem {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: EquipmentType,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub loan_type: LoanType,
    // The owner contact is embedded as a copy, not referenced by id.
    pub owner: Contact,
    pub start_date: String,
    pub end_date: String,
    pub daily_rate: Option<f64>,
    pub deposit: Option<f64>,
    pub condition: ItemCondition,
    #[serde(default, with = "photo_bytes")]
    pub photos: Option<Vec<Vec<u8>>>,
    #[serde(default)]
    pub notes: String,
}

impl LoanItem {
    pub fn new(
        name: impl Into<String>,
        equipment_type: EquipmentType,
        loan_type: LoanType,
        owner: Contact,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        condition: ItemCondition,
    ) -> Self {
        LoanItem {
            id: Uuid::new_v4(),
            name: name.into(),
            equipment_type,
            brand: None,
            model: None,
            serial_number: None,
            loan_type,
            owner,
            start_date: start_date.into(),
            end_date: end_date.into(),
            daily_rate: None,
            deposit: None,
            condition,
            photos: None,
            notes: String::new(),
        }
    }

    /// Whole calendar days from `today` until the end date. An end date that
    /// fails to parse counts as 0 days remaining.
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        match parse_date(&self.end_date) {
            Some(end) => (end - today).num_days(),
            None => 0,
        }
    }

    pub fn status(&self, today: NaiveDate) -> LoanStatus {
        let days = self.days_remaining(today);
        if days < 0 {
            LoanStatus::Overdue
        } else if days == 0 {
            LoanStatus::DueToday
        } else if days <= 3 {
            LoanStatus::DueSoon
        } else {
            LoanStatus::Active
        }
    }

    /// Daily rate times the loan length in days, billing at least one day.
    /// None when no rate is set.
    pub fn total_cost(&self) -> Option<f64> {
        let rate = self.daily_rate?;
        let days = match (parse_date(&self.start_date), parse_date(&self.end_date)) {
            (Some(start), Some(end)) => (end - start).num_days(),
            _ => 1,
        };
        Some(days.max(1) as f64 * rate)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PaymentRecord {
    pub id: Uuid,
    pub item_id: Uuid,
    pub amount: f64,
    pub date: String,
    pub method: PaymentMethod,
    pub notes: Option<String>,
}

impl PaymentRecord {
    pub fn new(item_id: Uuid, amount: f64, date: impl Into<String>, method: PaymentMethod) -> Self {
        PaymentRecord {
            id: Uuid::new_v4(),
            item_id,
            amount,
            date: date.into(),
            method,
            notes: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoanHistory {
    pub id: Uuid,
    pub item_id: Uuid,
    pub action: LoanAction,
    pub date: String,
    pub notes: Option<String>,
    #[serde(default, with = "photo_bytes")]
    pub photos: Option<Vec<Vec<u8>>>,
}

impl LoanHistory {
    pub fn new(item_id: Uuid, action: LoanAction, date: impl Into<String>) -> Self {
        LoanHistory {
            id: Uuid::new_v4(),
            item_id,
            action,
            date: date.into(),
            notes: None,
            photos: None,
        }
    }
}

// Photo blobs ride inside the JSON collection blobs as base64 strings.
mod photo_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(photos: &Option<Vec<Vec<u8>>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match photos {
            Some(list) => {
                let encoded: Vec<String> = list.iter().map(|p| STANDARD.encode(p)).collect();
                encoded.serialize(serializer)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<Vec<u8>>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded: Option<Vec<String>> = Option::deserialize(deserializer)?;
        match encoded {
            Some(list) => list
                .into_iter()
                .map(|s| STANDARD.decode(s).map_err(serde::de::Error::custom))
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            None => Ok(None),
        }
    }
}
