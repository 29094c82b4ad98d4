//! HTTP transport: one stateless `POST` per switch event.
//!
//! No session, no retry. A non-2xx answer or a broken connection drops
//! the event and is reported to the caller.

use core::fmt::Write;

use log::{info, warn};

use crate::adapters::device_id::DeviceId;
use crate::app::events::SwitchEvent;
use crate::app::ports::{EventPublisher, HttpPort};
use crate::error::{Error, Result, SendFailure};

use super::payload;

/// Decimal `Content-Length` header value.
pub type ContentLength = heapless::String<8>;

/// Format a `Content-Length` value for a body of `body_len` bytes.
pub fn content_length(body_len: usize) -> core::result::Result<ContentLength, SendFailure> {
    let mut len = ContentLength::new();
    write!(len, "{}", body_len).map_err(|_| {
        warn!("HTTP: body of {} bytes has no Content-Length", body_len);
        SendFailure::Connection
    })?;
    Ok(len)
}

pub struct HttpPublisher<H> {
    client: H,
    endpoint: &'static str,
    device_id: DeviceId,
}

impl<H: HttpPort> HttpPublisher<H> {
    pub fn new(client: H, endpoint: &'static str, device_id: DeviceId) -> Self {
        Self {
            client,
            endpoint,
            device_id,
        }
    }

    pub fn client(&self) -> &H {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut H {
        &mut self.client
    }
}

impl<H: HttpPort> EventPublisher for HttpPublisher<H> {
    fn publish(&mut self, event: &SwitchEvent) -> Result<()> {
        let body = payload::encode(&self.device_id, event)?;
        match self.client.post_json(self.endpoint, &body) {
            Ok(status) if (200..300).contains(&status) => {
                info!("HTTP: switch {} {} delivered ({})", event.switch_index, event.state.label(), status);
                Ok(())
            }
            Ok(status) => {
                warn!("HTTP: server answered {} for switch {}", status, event.switch_index);
                Err(Error::SendFailed(SendFailure::HttpStatus(status)))
            }
            Err(e) => Err(Error::SendFailed(e)),
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
