use crate::common::error::{AppError, ServiceResult};
use crate::common::state::AppState;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use tracing::warn;

pub struct IpAddrInfo {
    pub ip_addr: IpAddr,
}

/// Reads the client address a reverse proxy reported, if any.
/// `X-Forwarded-For` may carry a chain; the leftmost entry is the client.
fn forwarded_ip_addr(headers: &HeaderMap) -> ServiceResult<Option<IpAddr>> {
    let header = match headers.get("CF-Connecting-IP") {
        Some(header) => header,
        None => match headers.get("X-Forwarded-For") {
            Some(header) => header,
            None => return Ok(None),
        },
    };
    let value = header
        .to_str()
        .map_err(|_| AppError::DecodingRequestFailed)?;
    let client = value.split(',').next().unwrap_or_default().trim();
    match IpAddr::from_str(client) {
        Ok(ip_addr) => Ok(Some(ip_addr)),
        Err(_) => {
            warn!("Rejected unparseable forwarded address: {value:?}");
            Err(AppError::DecodingRequestFailed)
        }
    }
}

async fn get_ip_addr(parts: &mut Parts, trust_proxy: bool) -> ServiceResult<IpAddrInfo> {
    if trust_proxy {
        if let Some(ip_addr) = forwarded_ip_addr(&parts.headers)? {
            return Ok(IpAddrInfo { ip_addr });
        }
    }
    let info = <ConnectInfo<SocketAddr>>::from_request_parts(parts, &()).await?;
    let ip_addr = info.ip();
    Ok(IpAddrInfo { ip_addr })
}

impl FromRequestParts<AppState> for IpAddrInfo {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        get_ip_addr(parts, state.settings.trust_proxy).await
    }
}
