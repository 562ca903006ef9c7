//! Data-quality gate over the full row set of one entity.
//!
//! Rules run in row order and the first violation is returned; nothing is
//! collected past it.

use crate::error::DataQualityError;
use crate::types::{CustomerRow, OrderRow, Priority, RecordId};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

type Result<T> = std::result::Result<T, DataQualityError>;

/// `local@domain.tld`, anchored at the start only.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("email pattern is a valid regex")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn validate_customers(rows: &[CustomerRow]) -> Result<()> {
    let mut seen: HashSet<&RecordId> = HashSet::with_capacity(rows.len());

    for row in rows {
        if !row.customer_id.is_present() {
            return Err(DataQualityError::MissingCustomerId);
        }
        if !seen.insert(&row.customer_id) {
            return Err(DataQualityError::DuplicateCustomerId(row.customer_id.to_string()));
        }
        if !is_valid_email(&row.email) {
            return Err(DataQualityError::InvalidEmail(row.email.clone()));
        }
        if row.city.is_empty() {
            return Err(DataQualityError::MissingCity);
        }
    }
    Ok(())
}

pub fn validate_orders(rows: &[OrderRow]) -> Result<()> {
    for row in rows {
        if !row.order_id.is_present() || !row.customer_id.is_present() {
            return Err(DataQualityError::MissingOrderOrCustomerId);
        }
        if row.total.as_f64().is_some_and(|total| total < 0.0) {
            return Err(DataQualityError::NegativeOrderTotal);
        }
        if row.priority.parse::<Priority>().is_err() {
            return Err(DataQualityError::InvalidPriority(row.priority.clone()));
        }
    }
    Ok(())
}
