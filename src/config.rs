use crate::error::{EtlError, Result};
use crate::types::Entity;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const DEFAULT_CUSTOMER_FILE: &str = "customers_clean.csv";
pub const DEFAULT_ORDER_FILE: &str = "orders_clean.csv";

pub const ENV_BASE_URL: &str = "ETL_BASE_URL";
pub const ENV_PAGE_LIMIT: &str = "ETL_PAGE_LIMIT";
pub const ENV_OUTPUT_DIR: &str = "ETL_OUTPUT_DIR";

/// Everything the pipeline needs to know about where to read and write.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EtlConfig {
    pub base_url: String,
    pub page_limit: u32,
    pub customers: SourceConfig,
    pub orders: SourceConfig,
    pub output: OutputConfig,
}

/// One HTTP source. `url` replaces the `{base_url}/{path}?limit=` construction when set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceConfig {
    pub path: String,
    pub records_key: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub customer_file: String,
    pub order_file: String,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            customers: SourceConfig {
                path: "users".to_string(),
                records_key: "users".to_string(),
                url: None,
            },
            orders: SourceConfig {
                path: "carts".to_string(),
                records_key: "carts".to_string(),
                url: None,
            },
            output: OutputConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            customer_file: DEFAULT_CUSTOMER_FILE.to_string(),
            order_file: DEFAULT_ORDER_FILE.to_string(),
        }
    }
}

impl EtlConfig {
    /// Parse a TOML document; omitted keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EtlConfig = toml::from_str(content)
            .map_err(|e| EtlError::Config(format!("Invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            EtlError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Defaults, then the optional file, then `ETL_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a key lookup, usually the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = base_url;
        }
        if let Some(limit) = lookup(ENV_PAGE_LIMIT) {
            self.page_limit = limit.trim().parse().map_err(|_| {
                EtlError::Config(format!("{ENV_PAGE_LIMIT} must be a positive integer, got '{limit}'"))
            })?;
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.trim().is_empty()) {
            self.output.dir = PathBuf::from(dir);
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.page_limit == 0 {
            return Err(EtlError::Config("page_limit must be at least 1".to_string()));
        }
        if self.base_url.trim().is_empty() {
            return Err(EtlError::Config("base_url must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn source(&self, entity: Entity) -> &SourceConfig {
        match entity {
            Entity::Customer => &self.customers,
            Entity::Order => &self.orders,
        }
    }

    pub fn endpoint_url(&self, entity: Entity) -> String {
        let source = self.source(entity);
        match &source.url {
            Some(url) => url.clone(),
            None => format!(
                "{}/{}?limit={}",
                self.base_url.trim_end_matches('/'),
                source.path.trim_start_matches('/'),
                self.page_limit
            ),
        }
    }

    pub fn output_path(&self, entity: Entity) -> PathBuf {
        match entity {
            Entity::Customer => self.output.dir.join(&self.output.customer_file),
            Entity::Order => self.output.dir.join(&self.output.order_file),
        }
    }
}
