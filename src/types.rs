use serde_json::Number;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Raw record as returned by a source API
pub type RawRecord = serde_json::Value;

/// The two entity types the job moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Customer,
    Order,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Customer => "customers",
            Entity::Order => "orders",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order priority derived from the cart total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Low,
}

impl Priority {
    /// Totals strictly above this are `HIGH`.
    pub const HIGH_THRESHOLD: f64 = 500.0;

    pub fn from_total(total: f64) -> Self {
        if total > Self::HIGH_THRESHOLD {
            Priority::High
        } else {
            Priority::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Low => "LOW",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HIGH" => Ok(Priority::High),
            "LOW" => Ok(Priority::Low),
            other => Err(format!("unknown priority '{other}'")),
        }
    }
}

/// Record identifier as the source sent it. Numbers and strings stay distinct,
/// so `1` and `"1"` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    Number(Number),
    Text(String),
    Null,
}

impl RecordId {
    /// Null, the empty string and numeric zero count as missing.
    pub fn is_present(&self) -> bool {
        match self {
            RecordId::Number(n) => n.as_f64().map_or(true, |v| v != 0.0),
            RecordId::Text(s) => !s.is_empty(),
            RecordId::Null => false,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
            RecordId::Null => Ok(()),
        }
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        RecordId::Number(n.into())
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

/// A row with a fixed column layout, ready for delimited output.
pub trait TabularRow {
    const HEADER: &'static [&'static str];

    /// Fields in `HEADER` order.
    fn to_record(&self) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRow {
    pub customer_id: RecordId,
    pub full_name: String,
    pub email: String,
    pub city: String,
    pub processed_time: String,
}

impl TabularRow for CustomerRow {
    const HEADER: &'static [&'static str] =
        &["customer_id", "full_name", "email", "city", "processed_time"];

    fn to_record(&self) -> Vec<String> {
        vec![
            self.customer_id.to_string(),
            self.full_name.clone(),
            self.email.clone(),
            self.city.clone(),
            self.processed_time.clone(),
        ]
    }
}

/// Priority is kept as text so the validator can reject anything outside `HIGH`/`LOW`.
/// `total` keeps the source number so integers and floats render as they arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub order_id: RecordId,
    pub customer_id: RecordId,
    pub total: Number,
    pub priority: String,
    pub processed_time: String,
}

impl TabularRow for OrderRow {
    const HEADER: &'static [&'static str] =
        &["order_id", "customer_id", "total", "priority", "processed_time"];

    fn to_record(&self) -> Vec<String> {
        vec![
            self.order_id.to_string(),
            self.customer_id.to_string(),
            self.total.to_string(),
            self.priority.clone(),
            self.processed_time.clone(),
        ]
    }
}

/// Result of a complete pipeline run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub customers_written: usize,
    pub orders_written: usize,
    pub customer_file: PathBuf,
    pub order_file: PathBuf,
}
