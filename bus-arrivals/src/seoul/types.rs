//! Arrival feed response DTOs.
//!
//! These types map directly to the XML returned by
//! `getArrInfoByRouteAll`. Every leaf is an `Option<String>` because the
//! feed omits elements freely and encodes numbers as text; conversion to
//! typed domain values happens in `convert`.

use serde::Deserialize;

/// Root element of a normal response (`<ServiceResult>`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResult {
    /// Result code and message.
    pub msg_header: MsgHeader,

    /// Payload. Absent on some error responses.
    #[serde(default)]
    pub msg_body: Option<MsgBody>,
}

/// `<msgHeader>`: outcome of the request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsgHeader {
    /// Result code; "0" means success, "4" means no result.
    pub header_cd: String,

    /// Human-readable result message (Korean).
    #[serde(default)]
    pub header_msg: Option<String>,

    /// Number of items in the body.
    #[serde(default)]
    pub item_count: Option<String>,
}

/// `<msgBody>`: repeated `<itemList>` elements, one per station.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MsgBody {
    #[serde(rename = "itemList", default)]
    pub item_list: Vec<ArrivalItemDto>,
}

/// One `<itemList>` entry: the next two buses at one station.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalItemDto {
    /// Route ID the entry belongs to.
    #[serde(default)]
    pub bus_route_id: Option<String>,

    /// Route display name (line label).
    #[serde(default)]
    pub rt_nm: Option<String>,

    /// Station ID.
    #[serde(default)]
    pub st_id: Option<String>,

    /// Station name.
    #[serde(default)]
    pub st_nm: Option<String>,

    /// Station sequence number along the route.
    #[serde(default)]
    pub sta_ord: Option<String>,

    /// Plate number of the first bus.
    #[serde(default)]
    pub plain_no1: Option<String>,

    /// Plate number of the second bus.
    #[serde(default)]
    pub plain_no2: Option<String>,

    /// Smoothed ETA of the first bus, in seconds.
    #[serde(default)]
    pub exps1: Option<String>,

    /// Smoothed ETA of the second bus, in seconds.
    #[serde(default)]
    pub exps2: Option<String>,

    /// Arrival message for the first bus.
    #[serde(default)]
    pub arrmsg1: Option<String>,

    /// Arrival message for the second bus.
    #[serde(default)]
    pub arrmsg2: Option<String>,
}

/// Root element of a public-data gateway error (`<OpenAPI_ServiceResponse>`).
///
/// The gateway answers with this envelope instead of `ServiceResult` when
/// the service key is rejected or the daily quota is spent.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayResponse {
    #[serde(rename = "cmmMsgHeader")]
    pub header: GatewayHeader,
}

/// `<cmmMsgHeader>` of a gateway error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayHeader {
    #[serde(default)]
    pub err_msg: Option<String>,

    #[serde(default)]
    pub return_auth_msg: Option<String>,

    #[serde(default)]
    pub return_reason_code: Option<String>,
}
