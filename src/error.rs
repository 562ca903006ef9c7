use crate::types::Entity;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("extraction failed: {entity}: {source}")]
    Extraction {
        entity: Entity,
        #[source]
        source: ExtractError,
    },

    #[error("transform failed: {entity} record {index}: {source}")]
    Transform {
        entity: Entity,
        index: usize,
        #[source]
        source: TransformError,
    },

    #[error("DATA QUALITY FAILED: {0}")]
    DataQuality(#[from] DataQualityError),

    #[error("load failed: {0}")]
    Load(#[from] LoadError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EtlError {
    pub fn extraction(entity: Entity, source: ExtractError) -> Self {
        EtlError::Extraction { entity, source }
    }

    pub fn transform(entity: Entity, index: usize, source: TransformError) -> Self {
        EtlError::Transform {
            entity,
            index,
            source,
        }
    }

    /// True when the run was rejected by a data-quality rule rather than a fault.
    pub fn is_data_quality(&self) -> bool {
        matches!(self, EtlError::DataQuality(_))
    }
}

/// Failures while fetching and unpacking a source response.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("HTTP request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingKey(String),

    #[error("field '{0}' is not an array")]
    NotAnArray(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum TransformError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("field '{field}' has unexpected type: {found}")]
    InvalidType { field: &'static str, found: String },
}

/// One variant per integrity rule. The first violation aborts the run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataQualityError {
    #[error("Customer ID NULL")]
    MissingCustomerId,

    #[error("Duplicate Customer ID {0}")]
    DuplicateCustomerId(String),

    #[error("Invalid email {0}")]
    InvalidEmail(String),

    #[error("City NULL")]
    MissingCity,

    #[error("Order or Customer ID NULL")]
    MissingOrderOrCustomerId,

    #[error("Negative order total")]
    NegativeOrderTotal,

    #[error("Invalid priority")]
    InvalidPriority(String),
}

impl DataQualityError {
    /// Stable rule name, used as a metric label.
    pub fn rule(&self) -> &'static str {
        match self {
            DataQualityError::MissingCustomerId => "customer_id_null",
            DataQualityError::DuplicateCustomerId(_) => "duplicate_customer_id",
            DataQualityError::InvalidEmail(_) => "invalid_email",
            DataQualityError::MissingCity => "city_null",
            DataQualityError::MissingOrderOrCustomerId => "order_or_customer_id_null",
            DataQualityError::NegativeOrderTotal => "negative_order_total",
            DataQualityError::InvalidPriority(_) => "invalid_priority",
        }
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error writing {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, EtlError>;
