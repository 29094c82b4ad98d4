//! ESP-IDF HTTP client adapter.
//!
//! Implements [`HttpPort`] with a fresh `EspHttpConnection` per request:
//! open, POST, read the status, close. HTTPS endpoints are verified
//! against the built-in certificate bundle.

use core::time::Duration;

use embedded_svc::http::client::Client;
use embedded_svc::io::{Read, Write};
use esp_idf_svc::http::client::{Configuration, EspHttpConnection};
use log::{debug, warn};

use crate::app::ports::HttpPort;
use crate::error::SendFailure;
use crate::transport::http::content_length;

/// Response bytes read back for the debug log. The rest is discarded.
const RESPONSE_PREVIEW_LEN: usize = 128;

pub struct EspHttpClient {
    timeout: Duration,
}

impl EspHttpClient {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            timeout: Duration::from_millis(u64::from(timeout_ms)),
        }
    }
}

impl HttpPort for EspHttpClient {
    fn post_json(&mut self, url: &str, body: &[u8]) -> Result<u16, SendFailure> {
        let conf = Configuration {
            timeout: Some(self.timeout),
            crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
            ..Default::default()
        };
        let conn = EspHttpConnection::new(&conf).map_err(|e| {
            warn!("HTTP: connection setup failed: {e}");
            SendFailure::Connection
        })?;
        let mut client = Client::wrap(conn);

        let len = content_length(body.len())?;
        let headers = [
            ("Content-Type", "application/json"),
            ("Content-Length", len.as_str()),
        ];

        let mut request = client.post(url, &headers).map_err(|e| {
            warn!("HTTP: request open failed: {e}");
            SendFailure::Connection
        })?;
        request.write_all(body).map_err(|e| {
            warn!("HTTP: body write failed: {e}");
            SendFailure::Connection
        })?;
        let mut response = request.submit().map_err(|e| {
            warn!("HTTP: submit failed: {e}");
            SendFailure::Connection
        })?;

        let status = response.status();

        let mut preview = [0u8; RESPONSE_PREVIEW_LEN];
        match response.read(&mut preview) {
            Ok(n) if n > 0 => {
                debug!(
                    "HTTP: response ({} bytes shown): {}",
                    n,
                    core::str::from_utf8(&preview[..n]).unwrap_or("<binary>")
                );
            }
            Ok(_) => {}
            Err(e) => debug!("HTTP: response body unreadable: {e}"),
        }

        Ok(status)
    }
}
