//! HTTP client for the category API

use crate::auth::AccessToken;
use crate::config::CommerceConfig;
use crate::error::{CommerceError, Result};
use crate::types::{Category, CategoryPage};
use reqwest::{header, Client};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Number of categories requested per page
pub const PAGE_SIZE: u64 = 500;

/// HTTP client for the commerce platform
///
/// # Example
///
/// ```rust,no_run
/// use commerce_client::{CommerceClient, CommerceConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CommerceClient::new(CommerceConfig::new(
///     "https://auth.example.com/oauth/token",
///     "https://api.example.com",
///     "my-project",
///     "client-id",
///     "client-secret",
/// ))?;
///
/// let token = client.fetch_token().await?;
/// let categories = client.fetch_all_categories(&token).await?;
/// # Ok(())
/// # }
/// ```
pub struct CommerceClient {
    config: CommerceConfig,
    client: Client,
}

impl CommerceClient {
    /// Create a new client
    pub fn new(config: CommerceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CommerceError::Client(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Validate a host configuration object and build a client from it
    pub fn from_host_config(value: &serde_json::Value) -> Result<Self> {
        Self::new(CommerceConfig::from_value(value)?)
    }

    pub fn config(&self) -> &CommerceConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Fetch a single page of categories
    pub async fn fetch_category_page(
        &self,
        token: &AccessToken,
        offset: u64,
        limit: u64,
    ) -> Result<CategoryPage> {
        let url = format!(
            "{}?limit={}&offset={}",
            self.config.categories_url(),
            limit,
            offset
        );

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, token.bearer())
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, offset, "Category page request could not be sent");
                CommerceError::transport()
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), offset, "Category page request failed");
            return Err(CommerceError::Fetch {
                status: Some(status.as_u16()),
            });
        }

        response.json().await.map_err(|e| {
            warn!(error = %e, offset, "Category page was not valid JSON");
            CommerceError::InvalidResponse
        })
    }

    /// Fetch every category of the project, one page at a time
    ///
    /// Stops once the accumulated count reaches the reported `total`. The
    /// total is assumed stable for the duration of the run; categories
    /// created or deleted mid-run may be missed or seen twice. An empty page
    /// before the total is reached fails the whole fetch.
    pub async fn fetch_all_categories(&self, token: &AccessToken) -> Result<Vec<Category>> {
        let mut categories: Vec<Category> = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.fetch_category_page(token, offset, PAGE_SIZE).await?;
            let received = page.results.len();
            categories.extend(page.results);

            debug!(
                offset,
                received,
                accumulated = categories.len(),
                total = page.total,
                "Fetched category page"
            );

            if categories.len() as u64 >= page.total {
                break;
            }
            if received == 0 {
                warn!(
                    accumulated = categories.len(),
                    total = page.total,
                    "Empty category page before reaching total"
                );
                return Err(CommerceError::Incomplete {
                    received: categories.len() as u64,
                    total: page.total,
                });
            }

            offset += PAGE_SIZE;
        }

        info!(count = categories.len(), "Fetched all categories");
        Ok(categories)
    }

    /// Run the network half of a load cycle: token, then every page
    pub async fn load_categories(&self) -> Result<Vec<Category>> {
        let token = self.fetch_token().await?;
        self.fetch_all_categories(&token).await
    }
}
