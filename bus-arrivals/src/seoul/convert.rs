//! Conversion from feed DTOs to domain types.
//!
//! Decoding has two layers: the envelope (result codes, gateway errors)
//! decides whether the response is usable at all, then each `itemList`
//! entry is converted on its own. An entry with unusable ETA fields is
//! dropped rather than failing the whole route.

use tracing::debug;

use crate::domain::{ArrivalItem, RouteId};

use super::error::ArrivalFeedError;
use super::types::{ArrivalItemDto, GatewayHeader, GatewayResponse, ServiceResult};

/// Result code for a successful query.
const HEADER_OK: &str = "0";

/// Result code for "no result" (valid route, nothing running).
const HEADER_NO_RESULT: &str = "4";

/// Result code for an unregistered or unauthorised key.
const HEADER_KEY_REJECTED: &str = "7";

/// Result code for the request quota being exceeded.
const HEADER_LIMIT_EXCEEDED: &str = "8";

/// Maximum amount of a response body kept in error messages.
const BODY_SNIPPET_CHARS: usize = 500;

/// Decode a raw `getArrInfoByRouteAll` response body for `route`.
pub fn decode_arrivals(route: &RouteId, body: &str) -> Result<Vec<ArrivalItem>, ArrivalFeedError> {
    if body.contains("<OpenAPI_ServiceResponse") {
        let gateway: GatewayResponse = serde_xml_rs::from_str(body).map_err(|e| xml_error(e, body))?;
        return Err(gateway_error(&gateway.header));
    }

    let result: ServiceResult = serde_xml_rs::from_str(body).map_err(|e| xml_error(e, body))?;

    match result.msg_header.header_cd.trim() {
        HEADER_OK => {}
        HEADER_NO_RESULT => return Ok(Vec::new()),
        HEADER_KEY_REJECTED => return Err(ArrivalFeedError::Unauthorized),
        HEADER_LIMIT_EXCEEDED => return Err(ArrivalFeedError::RateLimited),
        code => {
            return Err(ArrivalFeedError::Api {
                status: code.parse().unwrap_or(0),
                message: result.msg_header.header_msg.unwrap_or_default(),
            });
        }
    }

    let dtos = result.msg_body.map(|b| b.item_list).unwrap_or_default();
    Ok(convert_items(route, dtos))
}

/// Convert every entry that has usable ETAs, preserving feed order.
pub fn convert_items(route: &RouteId, dtos: Vec<ArrivalItemDto>) -> Vec<ArrivalItem> {
    let total = dtos.len();
    let items: Vec<ArrivalItem> = dtos
        .into_iter()
        .filter_map(|dto| convert_item(route, dto))
        .collect();

    if items.len() < total {
        debug!(
            route = %route,
            dropped = total - items.len(),
            "dropped arrival entries without numeric ETAs"
        );
    }

    items
}

/// Convert one entry. Returns `None` when either ETA is missing or not a
/// non-negative integer.
pub fn convert_item(route: &RouteId, dto: ArrivalItemDto) -> Option<ArrivalItem> {
    let first_eta_secs = parse_secs(dto.exps1.as_deref())?;
    let second_eta_secs = parse_secs(dto.exps2.as_deref())?;

    Some(ArrivalItem {
        route_id: route.clone(),
        bus_number: text(dto.rt_nm).unwrap_or_else(|| route.to_string()),
        station_id: text(dto.st_id).unwrap_or_default(),
        station_name: text(dto.st_nm).unwrap_or_default(),
        station_order: dto.sta_ord.as_deref().and_then(|s| s.trim().parse().ok()),
        plate_no: text(dto.plain_no1).unwrap_or_default(),
        first_eta_secs,
        second_eta_secs,
        first_arrival_message: text(dto.arrmsg1).unwrap_or_default(),
        second_arrival_message: text(dto.arrmsg2).unwrap_or_default(),
    })
}

fn parse_secs(value: Option<&str>) -> Option<u32> {
    value?.trim().parse().ok()
}

/// Trimmed text, with blank values treated as absent.
fn text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn gateway_error(header: &GatewayHeader) -> ArrivalFeedError {
    match header.return_reason_code.as_deref().map(str::trim) {
        // 30: key not registered, 31: key expired, 32: unregistered IP
        Some("30") | Some("31") | Some("32") => ArrivalFeedError::Unauthorized,
        // 22: request quota exceeded
        Some("22") => ArrivalFeedError::RateLimited,
        code => ArrivalFeedError::Api {
            status: code.and_then(|c| c.parse().ok()).unwrap_or(0),
            message: header
                .return_auth_msg
                .clone()
                .or_else(|| header.err_msg.clone())
                .unwrap_or_default(),
        },
    }
}

fn xml_error(err: serde_xml_rs::Error, body: &str) -> ArrivalFeedError {
    ArrivalFeedError::Xml {
        message: err.to_string(),
        body: Some(body.chars().take(BODY_SNIPPET_CHARS).collect()),
    }
}
