//! Remote color-space lookup
//!
//! Delegates color-space math to an external identification service keyed
//! by a six-digit hex string. The service returns a JSON document with
//! nested CMYK/HSL/HSV/XYZ blocks and a human-readable name; every failure
//! mode (network, timeout, non-success status, malformed payload) degrades
//! to "no enrichment data" rather than an error.

use crate::color::HexColor;
use crate::constants::lookup::{BASE_URL, CONNECT_TIMEOUT, REQUEST_TIMEOUT};
use crate::{PickerError, Result};
use serde::{Deserialize, Serialize};

/// Derived color-space representations fetched for a committed color
///
/// Every field is optional: the service omits blocks it cannot compute and
/// this type deserializes whatever subset arrives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorDetails {
    pub name: Option<ColorName>,
    pub cmyk: Option<Cmyk>,
    pub hsl: Option<Hsl>,
    pub hsv: Option<Hsv>,
    #[serde(rename = "XYZ")]
    pub xyz: Option<Xyz>,
    pub contrast: Option<Contrast>,
}

/// Human-readable color name with match metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorName {
    pub value: Option<String>,
    pub closest_named_hex: Option<String>,
    pub exact_match_name: Option<bool>,
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cmyk {
    pub c: Option<f64>,
    pub m: Option<f64>,
    pub y: Option<f64>,
    pub k: Option<f64>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: Option<f64>,
    pub s: Option<f64>,
    pub l: Option<f64>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: Option<f64>,
    pub s: Option<f64>,
    pub v: Option<f64>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Xyz {
    #[serde(rename = "X")]
    pub x: Option<f64>,
    #[serde(rename = "Y")]
    pub y: Option<f64>,
    #[serde(rename = "Z")]
    pub z: Option<f64>,
    pub value: Option<String>,
}

/// Recommended overlay contrast color, e.g. "#ffffff"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contrast {
    pub value: Option<String>,
}

/// Client for the remote color identification service
pub struct LookupClient {
    http: reqwest::Client,
    base_url: String,
}

impl LookupClient {
    /// Create a client against the default service
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::Lookup`] if the HTTP client cannot be
    /// constructed.
    pub fn new() -> Result<Self> {
        Self::with_base_url(BASE_URL)
    }

    /// Create a client against a custom base URL (tests, mirrors)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| PickerError::lookup("building HTTP client", e))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetch derived representations for a color
    ///
    /// Never fails: any transport or decoding problem is logged and
    /// surfaced as `None`, leaving the caller's state untouched. Intended
    /// to be awaited inside a spawned task, never on the interactive
    /// thread.
    pub async fn fetch(&self, color: HexColor) -> Option<ColorDetails> {
        match self.try_fetch(color).await {
            Ok(details) => Some(details),
            Err(error) => {
                tracing::warn!(%color, %error, "color lookup failed, continuing without enrichment");
                None
            }
        }
    }

    async fn try_fetch(&self, color: HexColor) -> Result<ColorDetails> {
        let url = format!("{}/id?hex={}", self.base_url, color);
        tracing::debug!(%url, "requesting color details");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| PickerError::lookup(format!("GET {url}"), e))?;

        response
            .json::<ColorDetails>()
            .await
            .map_err(|e| PickerError::lookup("decoding lookup response", e))
    }
}
