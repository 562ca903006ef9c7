use crate::clock::Clock;
use crate::config::EtlConfig;
use crate::error::{EtlError, Result, TransformError};
use crate::extract::Extractor;
use crate::load;
use crate::metrics;
use crate::ports::HttpClientPort;
use crate::transform::{transform_customer, transform_order};
use crate::types::{CustomerRow, Entity, OrderRow, RawRecord, RunSummary};
use crate::validate::{validate_customers, validate_orders};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Fetch → transform → validate → write, for customers and orders.
///
/// Both row sets are validated before either file is touched, so a rejected run
/// leaves no output behind.
pub struct EtlPipeline {
    config: EtlConfig,
    extractor: Extractor,
    clock: Arc<dyn Clock>,
}

impl EtlPipeline {
    pub fn new(config: EtlConfig, http: Arc<dyn HttpClientPort>, clock: Arc<dyn Clock>) -> Self {
        Self {
            extractor: Extractor::new(http, config.clone()),
            config,
            clock,
        }
    }

    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<RunSummary> {
        info!("Starting ETL pipeline");

        // Extract
        let raw_customers = self.extractor.fetch(Entity::Customer).await?;
        let raw_orders = self.extractor.fetch(Entity::Order).await?;

        // Transform
        let customers = self.transform_all(Entity::Customer, &raw_customers, transform_customer)?;
        let orders = self.transform_all(Entity::Order, &raw_orders, transform_order)?;
        info!(
            customers = customers.len(),
            orders = orders.len(),
            "Transformed records"
        );

        // Validate
        self.validate(&customers, &orders)?;
        info!("Data quality checks passed");

        // Load
        let customer_file = self.config.output_path(Entity::Customer);
        let order_file = self.config.output_path(Entity::Order);
        let customers_written = load::write_csv(&customer_file, &customers)?;
        metrics::rows_written(Entity::Customer, customers_written);
        let orders_written = load::write_csv(&order_file, &orders)?;
        metrics::rows_written(Entity::Order, orders_written);

        info!(
            "Wrote {} customers to {} and {} orders to {}",
            customers_written,
            customer_file.display(),
            orders_written,
            order_file.display()
        );
        metrics::run_completed();

        Ok(RunSummary {
            customers_written,
            orders_written,
            customer_file,
            order_file,
        })
    }

    fn transform_all<T>(
        &self,
        entity: Entity,
        raw: &[RawRecord],
        project: fn(&RawRecord, &dyn Clock) -> std::result::Result<T, TransformError>,
    ) -> Result<Vec<T>> {
        raw.iter()
            .enumerate()
            .map(|(index, record)| {
                project(record, self.clock.as_ref())
                    .map_err(|e| EtlError::transform(entity, index, e))
            })
            .collect()
    }

    fn validate(&self, customers: &[CustomerRow], orders: &[OrderRow]) -> Result<()> {
        validate_customers(customers).map_err(|e| {
            error!(entity = Entity::Customer.as_str(), rule = e.rule(), "Data quality failed: {}", e);
            metrics::data_quality_failure(Entity::Customer, e.rule());
            EtlError::from(e)
        })?;
        validate_orders(orders).map_err(|e| {
            error!(entity = Entity::Order.as_str(), rule = e.rule(), "Data quality failed: {}", e);
            metrics::data_quality_failure(Entity::Order, e.rule());
            EtlError::from(e)
        })?;
        Ok(())
    }
}
