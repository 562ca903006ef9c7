use anyhow::Result;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use customer_order_etl::clock::FixedClock;
use customer_order_etl::error::DataQualityError;
use customer_order_etl::ports::{HttpClientPort, HttpGetResult};
use customer_order_etl::{EtlConfig, EtlError, EtlPipeline};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

const TIMESTAMP: &str = "2024-06-01T12:00:00";

/// Serves canned JSON bodies keyed by URL.
struct StubHttp {
    responses: HashMap<String, (u16, String)>,
}

impl StubHttp {
    fn new(users: Value, carts: Value) -> Self {
        let mut responses = HashMap::new();
        responses.insert(
            "http://mock.test/users?limit=10".to_string(),
            (200, users.to_string()),
        );
        responses.insert(
            "http://mock.test/carts?limit=10".to_string(),
            (200, carts.to_string()),
        );
        Self { responses }
    }
}

#[async_trait]
impl HttpClientPort for StubHttp {
    async fn get(&self, url: &str) -> std::result::Result<HttpGetResult, String> {
        let (status, body) = self
            .responses
            .get(url)
            .ok_or_else(|| format!("no stub for {url}"))?;
        Ok(HttpGetResult {
            status: *status,
            bytes: body.clone().into_bytes(),
        })
    }
}

fn config_for(dir: &Path) -> EtlConfig {
    let mut config = EtlConfig::default();
    config.base_url = "http://mock.test".to_string();
    config.output.dir = dir.to_path_buf();
    config
}

fn pipeline(dir: &Path, users: Value, carts: Value) -> EtlPipeline {
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
    EtlPipeline::new(
        config_for(dir),
        Arc::new(StubHttp::new(users, carts)),
        Arc::new(clock),
    )
}

fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(String::from).collect());
    }
    Ok(rows)
}

fn ann() -> Value {
    json!({
        "id": 1,
        "firstName": "Ann",
        "lastName": "Lee",
        "email": "ANN@EX.com",
        "address": {"city": "Lima"}
    })
}

#[tokio::test]
async fn writes_one_customer_and_one_order() -> Result<()> {
    let dir = tempdir()?;
    let etl = pipeline(
        dir.path(),
        json!({"users": [ann()], "total": 1, "skip": 0, "limit": 10}),
        json!({"carts": [{"id": 9, "userId": 1, "total": 501}]}),
    );

    let summary = etl.run().await?;
    assert_eq!(summary.customers_written, 1);
    assert_eq!(summary.orders_written, 1);

    let customers = fs::read_to_string(dir.path().join("customers_clean.csv"))?;
    assert_eq!(
        customers,
        format!("customer_id,full_name,email,city,processed_time\n1,Ann Lee,ann@ex.com,Lima,{TIMESTAMP}\n")
    );

    let orders = read_rows(&dir.path().join("orders_clean.csv"))?;
    assert_eq!(orders, vec![vec!["9", "1", "501", "HIGH", TIMESTAMP]]);
    Ok(())
}

#[tokio::test]
async fn quotes_cities_with_commas() -> Result<()> {
    let dir = tempdir()?;
    let mut customer = ann();
    customer["address"]["city"] = json!("Spring, Texas");
    let etl = pipeline(dir.path(), json!({"users": [customer]}), json!({"carts": []}));

    etl.run().await?;

    let path = dir.path().join("customers_clean.csv");
    assert!(fs::read_to_string(&path)?.contains("\"Spring, Texas\""));
    assert_eq!(read_rows(&path)?[0][3], "Spring, Texas");
    assert!(read_rows(&dir.path().join("orders_clean.csv"))?.is_empty());
    Ok(())
}

#[tokio::test]
async fn duplicate_customers_abort_without_output() -> Result<()> {
    let dir = tempdir()?;
    let etl = pipeline(
        dir.path(),
        json!({"users": [ann(), ann()]}),
        json!({"carts": [{"id": 9, "userId": 1, "total": 10}]}),
    );

    let err = etl.run().await.unwrap_err();
    assert!(matches!(
        err,
        EtlError::DataQuality(DataQualityError::DuplicateCustomerId(ref id)) if id == "1"
    ));
    assert!(err.to_string().contains("Duplicate Customer ID"));
    assert!(!dir.path().join("customers_clean.csv").exists());
    assert!(!dir.path().join("orders_clean.csv").exists());
    Ok(())
}

#[tokio::test]
async fn null_city_is_a_data_quality_failure() -> Result<()> {
    let dir = tempdir()?;
    let mut customer = ann();
    customer["address"]["city"] = Value::Null;
    let etl = pipeline(dir.path(), json!({"users": [customer]}), json!({"carts": []}));

    let err = etl.run().await.unwrap_err();
    assert!(matches!(
        err,
        EtlError::DataQuality(DataQualityError::MissingCity)
    ));
    assert_eq!(err.to_string(), "DATA QUALITY FAILED: City NULL");
    assert!(!dir.path().join("customers_clean.csv").exists());
    assert!(!dir.path().join("orders_clean.csv").exists());
    Ok(())
}

#[tokio::test]
async fn float_totals_are_written_as_received() -> Result<()> {
    let dir = tempdir()?;
    let etl = pipeline(
        dir.path(),
        json!({"users": []}),
        json!({"carts": [{"id": 1, "userId": 2, "total": 500.0}, {"id": 2, "userId": 2, "total": 89}]}),
    );

    etl.run().await?;

    let orders = read_rows(&dir.path().join("orders_clean.csv"))?;
    assert_eq!(orders[0][2], "500.0");
    assert_eq!(orders[1][2], "89");
    Ok(())
}

#[tokio::test]
async fn negative_order_total_blocks_both_files() -> Result<()> {
    let dir = tempdir()?;
    let etl = pipeline(
        dir.path(),
        json!({"users": [ann()]}),
        json!({"carts": [{"id": 9, "userId": 1, "total": -1}]}),
    );

    let err = etl.run().await.unwrap_err();
    assert!(matches!(
        err,
        EtlError::DataQuality(DataQualityError::NegativeOrderTotal)
    ));
    assert!(!dir.path().join("customers_clean.csv").exists());
    Ok(())
}

#[tokio::test]
async fn missing_records_key_is_an_extraction_failure() -> Result<()> {
    let dir = tempdir()?;
    let etl = pipeline(dir.path(), json!({"users": [ann()]}), json!({"message": "not found"}));

    let err = etl.run().await.unwrap_err();
    assert!(matches!(err, EtlError::Extraction { .. }));
    assert!(err.to_string().starts_with("extraction failed: orders"));
    assert!(!dir.path().join("customers_clean.csv").exists());
    Ok(())
}

#[tokio::test]
async fn malformed_record_is_a_transform_failure() -> Result<()> {
    let dir = tempdir()?;
    let etl = pipeline(
        dir.path(),
        json!({"users": [{"id": 1, "firstName": "Ann"}]}),
        json!({"carts": []}),
    );

    let err = etl.run().await.unwrap_err();
    assert!(matches!(err, EtlError::Transform { index: 0, .. }));
    Ok(())
}

#[tokio::test]
async fn overwrites_previous_output() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("orders_clean.csv"), "stale\n")?;
    let etl = pipeline(
        dir.path(),
        json!({"users": []}),
        json!({"carts": [{"id": 1, "userId": 2, "total": 500.0}, {"id": 2, "userId": 2, "total": 500.01}]}),
    );

    etl.run().await?;

    let orders = read_rows(&dir.path().join("orders_clean.csv"))?;
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0][3], "LOW");
    assert_eq!(orders[1][3], "HIGH");
    Ok(())
}
