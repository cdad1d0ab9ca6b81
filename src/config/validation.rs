use crate::config::types::{Config, CrawlerConfig, HttpConfig, OutputConfig, PagingConfig, SiteConfig};
use crate::crawler::PageSelectors;
use crate::ConfigError;
use url::Url;

/// Upper bound on concurrent detail fetches within one listing page
pub const MAX_ITEM_CONCURRENCY: usize = 32;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    PageSelectors::compile(&config.selectors)?;
    validate_paging_config(&config.paging)?;
    validate_http_config(&config.http)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the site location
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    base.join(&config.listing_path).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "Invalid listing-path '{}': {}",
            config.listing_path, e
        ))
    })?;

    Ok(())
}

fn validate_paging_config(config: &PagingConfig) -> Result<(), ConfigError> {
    if config.page_param.trim().is_empty() {
        return Err(ConfigError::Validation(
            "page-param cannot be empty".to_string(),
        ));
    }

    if config.filter_param.trim().is_empty() {
        return Err(ConfigError::Validation(
            "filter-param cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.item_concurrency < 1 || config.item_concurrency > MAX_ITEM_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "item-concurrency must be between 1 and {}, got {}",
            MAX_ITEM_CONCURRENCY, config.item_concurrency
        )));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
