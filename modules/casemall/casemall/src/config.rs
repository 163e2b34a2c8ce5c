use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// Configuration for the `casemall` module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CasemallConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    /// Directory uploaded product images are written to.
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,
    /// URL path the image directory is served under.
    #[serde(default = "default_image_url_prefix")]
    pub image_url_prefix: String,
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

impl Default for CasemallConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            image_dir: default_image_dir(),
            image_url_prefix: default_image_url_prefix(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

impl CasemallConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.default_page_size >= 1,
            "casemall.default_page_size must be at least 1"
        );
        anyhow::ensure!(
            self.max_page_size >= self.default_page_size,
            "casemall.max_page_size ({}) must not be below default_page_size ({})",
            self.max_page_size,
            self.default_page_size
        );
        anyhow::ensure!(
            self.max_image_bytes > 0,
            "casemall.max_image_bytes must be positive"
        );
        anyhow::ensure!(
            self.image_url_prefix.starts_with('/') && self.image_url_prefix.trim_matches('/') != "",
            "casemall.image_url_prefix must be a non-root path starting with '/'"
        );
        Ok(())
    }

    pub(crate) fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
        }
    }
}

fn default_page_size() -> u64 {
    12
}

fn default_max_page_size() -> u64 {
    100
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("data/images")
}

fn default_image_url_prefix() -> String {
    "/images".to_owned()
}

fn default_max_image_bytes() -> usize {
    10 * 1024 * 1024
}
