//! Seoul bus arrival feed client.
//!
//! This module provides an HTTP client for the Seoul Metropolitan bus
//! arrival API (`getArrInfoByRouteAll`), plus a file-backed mock.
//!
//! Key characteristics of the feed:
//! - Responses are XML, with every value encoded as text
//! - ETAs (`exps1`/`exps2`) are smoothed seconds-until-arrival for the
//!   next two buses at each station
//! - Result codes in `msgHeader` distinguish "no buses" from key or
//!   quota errors; the public-data gateway uses its own error envelope

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{SeoulBusClient, SeoulBusConfig};
pub use convert::decode_arrivals;
pub use error::ArrivalFeedError;
pub use mock::MockArrivalFeed;
pub use types::{ArrivalItemDto, MsgBody, MsgHeader, ServiceResult};
