// src/blockchain/services/token.rs

use crate::blockchain::models::{TokenListing, TokenSearchResponse};
use crate::blockchain::provider::{ActionProvider, RawTokenListing};
use crate::error::{AppFault, FaultCode};
use crate::utils::non_empty;
use tracing::error;

const SEARCH_LIMIT: u32 = 20;
const DEFAULT_DECIMALS: u32 = 18;

fn listing(raw: RawTokenListing) -> TokenListing {
    TokenListing {
        address: raw.address.unwrap_or_default(),
        name: raw.name.unwrap_or_default(),
        ticker: raw.ticker.unwrap_or_default(),
        decimals: raw.decimal.unwrap_or(DEFAULT_DECIMALS),
        image_url: non_empty(raw.image_url),
        twitter: non_empty(raw.twitter),
        website: non_empty(raw.website),
    }
}

/// Searches the token directory by name or ticker.
pub async fn search(provider: &dyn ActionProvider, query: &str) -> Result<TokenSearchResponse, AppFault> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppFault::bad_request(
            FaultCode::InvalidQuery,
            "Search query must be a non-empty string",
        ));
    }

    let raw = provider.search_tokens(Some(query), SEARCH_LIMIT).await.map_err(|e| {
        error!("Error searching tokens for {:?}: {:#}", query, e);
        AppFault::failed(FaultCode::TokenSearchFailed, format!("Failed to search tokens: {:#}", e))
    })?;

    let malformed = || AppFault::failed(FaultCode::TokenSearchFailed, "Failed to retrieve token data");
    if !raw.success {
        return Err(malformed());
    }
    let page = raw.data.ok_or_else(malformed)?;
    let listings = page.data.ok_or_else(malformed)?;

    let tokens: Vec<TokenListing> = listings.into_iter().map(listing).collect();
    let total = page
        .pagination
        .and_then(|p| p.total)
        .unwrap_or(tokens.len() as u64);

    Ok(TokenSearchResponse {
        query: query.to_string(),
        tokens,
        total,
    })
}
