// src/blockchain/services/nadfun.rs

use super::{check_status, hash_string};
use crate::blockchain::models::CurveCreationResponse;
use crate::blockchain::provider::{ActionProvider, CurveLaunch};
use crate::blockchain::session::Session;
use crate::error::{AppFault, FaultCode};
use crate::utils::{is_blank, non_empty, or_default};
use tracing::{error, info};

/// Smallest initial buy nad.fun accepts, in MON.
pub const MIN_INITIAL_BUY: f64 = 0.5;
const DEFAULT_IMAGE_TYPE: &str = "image/jpeg";

/// Caller-supplied token metadata.
#[derive(Debug, Clone, Default)]
pub struct CurveParams {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image_url: String,
    pub amount_in: String,
    pub home_page: Option<String>,
    pub twitter: Option<String>,
    pub telegram: Option<String>,
}

fn check_params(params: &CurveParams) -> Result<(), AppFault> {
    let required = [
        ("name", &params.name),
        ("symbol", &params.symbol),
        ("description", &params.description),
        ("imageUrl", &params.image_url),
        ("amountIn", &params.amount_in),
    ];
    if let Some((field, _)) = required.iter().find(|(_, v)| is_blank(v)) {
        return Err(AppFault::bad_request(
            FaultCode::InvalidParameters,
            format!("Missing required parameter: {}", field),
        ));
    }

    match params.amount_in.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= MIN_INITIAL_BUY => Ok(()),
        _ => Err(AppFault::bad_request(
            FaultCode::InvalidAmount,
            format!("Minimum investment amount is {} ETH", MIN_INITIAL_BUY),
        )),
    }
}

/// Launches a token on the nad.fun bonding curve. The amount is checked
/// before the image is downloaded.
pub async fn create_curve(
    provider: &dyn ActionProvider,
    session: &Session,
    params: CurveParams,
) -> Result<CurveCreationResponse, AppFault> {
    check_params(&params)?;

    let mut image = provider.fetch_image(&params.image_url).await.map_err(|e| {
        error!("Error downloading image {}: {:#}", params.image_url, e);
        AppFault::bad_request(
            FaultCode::ImageDownloadFailed,
            format!("Failed to download image from {}", params.image_url),
        )
    })?;

    let content_type = or_default(image.content_type.take(), DEFAULT_IMAGE_TYPE);
    if !content_type.starts_with("image/") {
        return Err(AppFault::bad_request(
            FaultCode::InvalidImage,
            format!("URL does not point to an image (content type {})", content_type),
        ));
    }
    image.content_type = Some(content_type);

    info!("Creating curve for {} ({}), {} bytes of image", params.name, params.symbol, image.bytes.len());
    let launch = CurveLaunch {
        name: params.name,
        symbol: params.symbol,
        description: params.description,
        image,
        amount_in: params.amount_in,
        home_page: non_empty(params.home_page),
        twitter: non_empty(params.twitter),
        telegram: non_empty(params.telegram),
    };

    let raw = provider.create_curve(session, &launch).await.map_err(|e| {
        error!("Error creating curve for {}: {:#}", launch.name, e);
        AppFault::failed(FaultCode::CurveCreationFailed, format!("Failed to create token: {:#}", e))
    })?;
    check_status(
        raw.status.as_deref(),
        raw.message.as_deref(),
        FaultCode::CurveCreationFailed,
        "Failed to create token",
    )?;

    Ok(CurveCreationResponse {
        tx_hash: hash_string(raw.tx_hash),
        status: or_default(raw.status, "pending"),
        message: or_default(raw.message, "Transaction submitted successfully"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(amount_in: &str) -> CurveParams {
        CurveParams {
            name: "Moon Cat".into(),
            symbol: "MCAT".into(),
            description: "cats".into(),
            image_url: "https://example.com/cat.png".into(),
            amount_in: amount_in.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_buy_threshold() {
        assert!(check_params(&params("0.5")).is_ok());
        assert!(check_params(&params("2")).is_ok());

        let low = check_params(&params("0.49")).unwrap_err();
        assert_eq!(low.code, FaultCode::InvalidAmount);
        assert_eq!(low.status, 400);

        let garbage = check_params(&params("lots")).unwrap_err();
        assert_eq!(garbage.code, FaultCode::InvalidAmount);
    }

    #[test]
    fn test_blank_metadata_is_rejected() {
        let mut p = params("1");
        p.symbol = " ".into();
        let fault = check_params(&p).unwrap_err();
        assert_eq!(fault.code, FaultCode::InvalidParameters);
        assert!(fault.message.contains("symbol"));
    }
}
