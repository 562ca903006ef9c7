//! Run counters recorded through the `metrics` facade.
//!
//! Nothing is exported unless the embedding process installs a recorder.

use crate::types::Entity;
use ::metrics::counter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    RecordsExtracted,
    RowsWritten,
    DataQualityFailures,
    RunsCompleted,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::RecordsExtracted => "etl_records_extracted_total",
            MetricName::RowsWritten => "etl_rows_written_total",
            MetricName::DataQualityFailures => "etl_data_quality_failures_total",
            MetricName::RunsCompleted => "etl_runs_completed_total",
        }
    }
}

pub fn records_extracted(entity: Entity, count: usize) {
    counter!(MetricName::RecordsExtracted.as_str(), "entity" => entity.as_str()).increment(count as u64);
}

pub fn rows_written(entity: Entity, count: usize) {
    counter!(MetricName::RowsWritten.as_str(), "entity" => entity.as_str()).increment(count as u64);
}

pub fn data_quality_failure(entity: Entity, rule: &'static str) {
    counter!(
        MetricName::DataQualityFailures.as_str(),
        "entity" => entity.as_str(),
        "rule" => rule
    )
    .increment(1);
}

pub fn run_completed() {
    counter!(MetricName::RunsCompleted.as_str()).increment(1);
}
