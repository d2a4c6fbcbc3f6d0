//! Network Time Protocol (NTP) [`TimeSource`] over an existing embassy-net stack.
//!
//! # Examples
//!
//! ```no_run
//! # #![no_std]
//! # #![no_main]
//! # use panic_probe as _;
//! use embassy_net::Stack;
//! use time::UtcOffset;
//! use tft_clock::time_source::TimeSource;
//! use tft_clock::time_sync::NtpTimeSource;
//!
//! # async fn example(stack: Stack<'static>) {
//! let mut ntp = NtpTimeSource::new(stack, "pool.ntp.org", UtcOffset::UTC);
//! if let Ok(now) = ntp.fetch().await {
//!     defmt::info!("Local time is {}", now);
//! }
//! # }
//! ```

#![allow(clippy::future_not_send, reason = "single-threaded")]

use defmt::{info, warn};
use embassy_net::{Stack, dns, udp};
use embassy_time::Duration;
use time::UtcOffset;

use crate::time_of_day::TimeOfDay;
use crate::time_source::TimeSource;
use crate::unix_seconds::UnixSeconds;
use crate::{Error, Result};

const NTP_PORT: u16 = 123;
const NTP_PACKET_LEN: usize = 48;
const NTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Queries one NTP host and converts the answer to local time with a fixed offset.
pub struct NtpTimeSource {
    stack: Stack<'static>,
    server: &'static str,
    offset: UtcOffset,
}

impl NtpTimeSource {
    #[must_use]
    pub const fn new(stack: Stack<'static>, server: &'static str, offset: UtcOffset) -> Self {
        Self {
            stack,
            server,
            offset,
        }
    }

    /// One NTP round trip, returning the server's transmit timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimeSync`] naming the step that failed.
    pub async fn fetch_unix_seconds(&self) -> Result<UnixSeconds> {
        use dns::DnsQueryType;
        use udp::UdpSocket;

        info!("Resolving NTP host {}...", self.server);
        let dns_result = self
            .stack
            .dns_query(self.server, DnsQueryType::A)
            .await
            .map_err(|err| {
                warn!("DNS lookup failed: {:?}", err);
                Error::TimeSync("DNS lookup failed")
            })?;
        let server_addr = dns_result
            .first()
            .ok_or(Error::TimeSync("No DNS results"))?;
        info!("NTP server IP: {}", server_addr);

        let mut rx_meta = [udp::PacketMetadata::EMPTY; 1];
        let mut rx_buffer = [0; 128];
        let mut tx_meta = [udp::PacketMetadata::EMPTY; 1];
        let mut tx_buffer = [0; 128];
        let mut socket = UdpSocket::new(
            self.stack,
            &mut rx_meta,
            &mut rx_buffer,
            &mut tx_meta,
            &mut tx_buffer,
        );

        socket.bind(0).map_err(|err| {
            warn!("Socket bind failed: {:?}", err);
            Error::TimeSync("Socket bind failed")
        })?;

        let mut request = [0_u8; NTP_PACKET_LEN];
        // LI=0, VN=3, Mode=3 (client)
        if let Some(first) = request.first_mut() {
            *first = 0x1B;
        }

        socket
            .send_to(&request, (*server_addr, NTP_PORT))
            .await
            .map_err(|err| {
                warn!("NTP send failed: {:?}", err);
                Error::TimeSync("NTP send failed")
            })?;

        let mut response = [0_u8; NTP_PACKET_LEN];
        let (len, _from) = embassy_time::with_timeout(NTP_TIMEOUT, socket.recv_from(&mut response))
            .await
            .map_err(|_| {
                warn!("NTP receive timeout");
                Error::TimeSync("NTP receive timeout")
            })?
            .map_err(|err| {
                warn!("NTP receive failed: {:?}", err);
                Error::TimeSync("NTP receive failed")
            })?;

        if len < NTP_PACKET_LEN {
            warn!("NTP response too short: {} bytes", len);
            return Err(Error::TimeSync("NTP response too short"));
        }

        // Transmit timestamp seconds: bytes 40..44, big-endian.
        let transmit_seconds = response
            .get(40..44)
            .and_then(|bytes| <[u8; 4]>::try_from(bytes).ok())
            .map(u32::from_be_bytes)
            .ok_or(Error::TimeSync("NTP response too short"))?;

        let unix_seconds = UnixSeconds::from_ntp_seconds(transmit_seconds)
            .ok_or(Error::TimeSync("Invalid NTP timestamp"))?;
        info!("NTP time: {} (unix timestamp)", unix_seconds.as_i64());
        Ok(unix_seconds)
    }
}

impl TimeSource for NtpTimeSource {
    async fn fetch(&mut self) -> Result<TimeOfDay> {
        let unix_seconds = self.fetch_unix_seconds().await?;
        unix_seconds
            .to_time_of_day(self.offset)
            .ok_or(Error::TimeSync("Timestamp out of range"))
    }
}
