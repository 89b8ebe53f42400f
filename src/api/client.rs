use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{ChefError, Result};
use crate::models::Recipe;

/// Default public API base.
pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";

/// Paging window for a search request.
#[derive(Debug, Clone, Copy)]
pub struct SearchPage {
    pub number: u32,
    pub offset: u32,
}

impl Default for SearchPage {
    fn default() -> Self {
        Self {
            number: 10,
            offset: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Recipe>,
}

/// Client for the remote recipe-search/detail API.
pub struct RecipeApiClient {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl RecipeApiClient {
    pub fn new(base_url: &str, api_key: &str, http_client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http_client,
        }
    }

    /// Search recipes by free-text query and/or category, with paging.
    pub async fn search(
        &self,
        query: Option<&str>,
        category: Option<&str>,
        page: SearchPage,
    ) -> Result<Vec<Recipe>> {
        let mut url = self.endpoint("/recipes/complexSearch")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("apiKey", &self.api_key);
            pairs.append_pair("addRecipeInformation", "true");
            pairs.append_pair("number", &page.number.to_string());
            pairs.append_pair("offset", &page.offset.to_string());
            if let Some(query) = query {
                pairs.append_pair("query", query);
            }
            if let Some(category) = category {
                pairs.append_pair("type", category);
            }
        }

        let body = self.fetch_text(url).await?;
        let decoded: SearchResponse =
            serde_json::from_str(&body).map_err(|e| ChefError::DecodingFailure(e.to_string()))?;
        debug!(count = decoded.results.len(), "search results received");
        Ok(decoded.results)
    }

    /// Fetch the full recipe record, including nutrition, ingredients and
    /// instructions. Used to backfill search results that arrived without
    /// them.
    pub async fn recipe_detail(&self, id: i64) -> Result<Recipe> {
        if id < 0 {
            return Err(ChefError::InvalidReference(format!(
                "user-authored recipe {} has no remote detail",
                id
            )));
        }

        let mut url = self.endpoint(&format!("/recipes/{}/information", id))?;
        url.query_pairs_mut()
            .append_pair("apiKey", &self.api_key)
            .append_pair("includeNutrition", "true");

        let body = self.fetch_text(url).await?;
        serde_json::from_str(&body).map_err(|e| ChefError::DecodingFailure(e.to_string()))
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ChefError::InvalidReference(format!("{}{}: {}", self.base_url, path, e)))
    }

    async fn fetch_text(&self, url: Url) -> Result<String> {
        let response = self.http_client.get(url.clone()).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ChefError::NotFound(url.path().to_string()));
        }
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}
