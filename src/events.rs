//! Event record types
//!
//! One immutable row per occurrence: a GPS fix, a forwarded SMS, or a page
//! view. Inbound shapes keep every field optional so a partial record can
//! be rejected with a 400 before any write is attempted; the validated
//! record types carry only complete data.

use serde::Deserialize;

use crate::error::ApiError;

/// A validated GPS fix ready for insert. Latitude, longitude, timestamp,
/// and speed are opaque caller-supplied strings, unvalidated beyond
/// non-empty.
#[derive(Debug, Clone)]
pub struct GpsFix {
    pub username: String,
    pub latitude: String,
    pub longitude: String,
    pub timestamp: String,
    pub speed: String,
}

/// Query parameters of GET /log, field names as sent by the tracker.
#[derive(Debug, Deserialize)]
pub struct GpsQuery {
    pub lat: Option<String>,
    pub longitude: Option<String>,
    pub time: Option<String>,
    pub s: Option<String>,
}

impl GpsQuery {
    /// Reject unless every field is present and non-empty. The username
    /// comes from the auth gate, not the query string.
    pub fn into_fix(self, username: String) -> Result<GpsFix, ApiError> {
        match (self.lat, self.longitude, self.time, self.s) {
            (Some(lat), Some(longitude), Some(time), Some(s))
                if !lat.is_empty() && !longitude.is_empty() && !time.is_empty() && !s.is_empty() =>
            {
                Ok(GpsFix {
                    username,
                    latitude: lat,
                    longitude,
                    timestamp: time,
                    speed: s,
                })
            }
            _ => Err(ApiError::BadRequest("Request body is invalid")),
        }
    }
}

/// A validated SMS record ready for insert.
#[derive(Debug, Clone)]
pub struct SmsMessage {
    pub from: String,
    pub text: String,
    pub sent_stamp: String,
    pub receive_stamp: String,
    pub sim: String,
}

/// JSON body of POST /sms-log, field names as sent by the forwarder app.
#[derive(Debug, Deserialize)]
pub struct SmsBody {
    pub from: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "sentStamp")]
    pub sent_stamp: Option<String>,
    #[serde(rename = "receiveStamp")]
    pub receive_stamp: Option<String>,
    pub sim: Option<String>,
}

impl SmsBody {
    pub fn into_message(self) -> Result<SmsMessage, ApiError> {
        match (
            self.from,
            self.text,
            self.sent_stamp,
            self.receive_stamp,
            self.sim,
        ) {
            (Some(from), Some(text), Some(sent), Some(received), Some(sim))
                if !from.is_empty()
                    && !text.is_empty()
                    && !sent.is_empty()
                    && !received.is_empty()
                    && !sim.is_empty() =>
            {
                Ok(SmsMessage {
                    from,
                    text,
                    sent_stamp: sent,
                    receive_stamp: received,
                    sim,
                })
            }
            _ => Err(ApiError::BadRequest("Missing fields")),
        }
    }
}

/// Query parameters of GET /site/view identifying the countable page.
#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    #[serde(rename = "siteBase")]
    pub site_base: Option<String>,
    #[serde(rename = "sitePath")]
    pub site_path: Option<String>,
}

impl ViewQuery {
    /// The `(siteBase, sitePath)` resource key, or a 400 when either half
    /// is missing or empty.
    pub fn into_key(self) -> Result<(String, String), ApiError> {
        match (self.site_base, self.site_path) {
            (Some(base), Some(path)) if !base.is_empty() && !path.is_empty() => Ok((base, path)),
            _ => Err(ApiError::BadRequest("Missing siteBase or sitePath")),
        }
    }
}
