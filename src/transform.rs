//! Transformer: fixed projections from raw API records to flat rows.

use crate::clock::Clock;
use crate::error::TransformError;
use crate::types::{CustomerRow, OrderRow, Priority, RawRecord, RecordId};
use serde_json::Value;

type Result<T> = std::result::Result<T, TransformError>;

/// `[id, "<firstName> <lastName>", lower(email), address.city, now()]`
pub fn transform_customer(raw: &RawRecord, clock: &dyn Clock) -> Result<CustomerRow> {
    let customer_id = record_id(raw, "id")?;
    let first_name = str_field(raw, "firstName")?;
    let last_name = str_field(raw, "lastName")?;
    let email = str_field(raw, "email")?;
    let city = raw
        .get("address")
        .and_then(|address| address.get("city"))
        .ok_or(TransformError::MissingField("address.city"))?;
    // A null city is left for the validator to reject.
    let city = match city {
        Value::Null => "",
        Value::String(s) => s.as_str(),
        other => {
            return Err(TransformError::InvalidType {
                field: "address.city",
                found: type_name(other).to_string(),
            })
        }
    };

    Ok(CustomerRow {
        customer_id,
        full_name: format!("{first_name} {last_name}"),
        email: email.to_lowercase(),
        city: city.to_string(),
        processed_time: clock.timestamp(),
    })
}

/// `[id, userId, total, priority, now()]`
pub fn transform_order(raw: &RawRecord, clock: &dyn Clock) -> Result<OrderRow> {
    let order_id = record_id(raw, "id")?;
    let customer_id = record_id(raw, "userId")?;
    let total = match raw.get("total").ok_or(TransformError::MissingField("total"))? {
        Value::Number(n) => n.clone(),
        other => {
            return Err(TransformError::InvalidType {
                field: "total",
                found: type_name(other).to_string(),
            })
        }
    };
    let priority = Priority::from_total(total.as_f64().unwrap_or_default());

    Ok(OrderRow {
        order_id,
        customer_id,
        total,
        priority: priority.to_string(),
        processed_time: clock.timestamp(),
    })
}

fn record_id(raw: &RawRecord, field: &'static str) -> Result<RecordId> {
    match raw.get(field) {
        None => Err(TransformError::MissingField(field)),
        Some(Value::Null) => Ok(RecordId::Null),
        Some(Value::String(s)) => Ok(RecordId::Text(s.clone())),
        Some(Value::Number(n)) => Ok(RecordId::Number(n.clone())),
        Some(other) => Err(TransformError::InvalidType {
            field,
            found: type_name(other).to_string(),
        }),
    }
}

fn str_field<'a>(raw: &'a RawRecord, field: &'static str) -> Result<&'a str> {
    let value = raw.get(field).ok_or(TransformError::MissingField(field))?;
    value.as_str().ok_or_else(|| TransformError::InvalidType {
        field,
        found: type_name(value).to_string(),
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
