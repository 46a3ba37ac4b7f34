use super::{X_FORWARDED_FOR_HEADER, X_REAL_IP_HEADER};
use bp_core::net::is_local_addr;
use getset::Getters;
use http::{HeaderMap, HeaderName};
use itertools::Itertools;
use std::fmt::{Display, Formatter};
use std::net::{AddrParseError, IpAddr};
use std::str::Utf8Error;
use thiserror::Error;
use tracing::warn;
use typed_builder::TypedBuilder;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientAddrParseError {
    #[error("unable to parse IP from address [{token}] in header {header}: {source}")]
    InvalidAddress {
        header: HeaderName,
        token: String,
        #[source]
        source: AddrParseError,
    },

    #[error("unable to decode address [{token}] in header {header}: {source}")]
    InvalidEncoding {
        header: HeaderName,
        token: String,
        #[source]
        source: Utf8Error,
    },
}

/// Client addresses collected from the forwarding headers of a single request.
///
/// Addresses keep the order they were found in. Tokens that could not be
/// parsed are kept aside in `errors` and never end up in `addrs`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Getters)]
pub struct ClientAddrs {
    #[getset(get = "pub")]
    addrs: Vec<IpAddr>,

    #[getset(get = "pub")]
    errors: Vec<ClientAddrParseError>,
}

impl ClientAddrs {
    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    /// True when any collected address is loopback, private or link-local.
    pub fn has_local_addr(&self) -> bool {
        self.addrs.iter().any(|addr| is_local_addr(addr))
    }

    fn push_token(&mut self, header: &HeaderName, raw: &[u8]) {
        let token = match std::str::from_utf8(raw) {
            Ok(token) => token.trim(),
            Err(source) => {
                let token = String::from_utf8_lossy(raw).trim().to_string();
                warn!("Undecodable address [{}] in header {}", token, header);
                self.errors.push(ClientAddrParseError::InvalidEncoding {
                    header: header.clone(),
                    token,
                    source,
                });
                return;
            }
        };

        if token.is_empty() {
            return;
        }

        match token.parse::<IpAddr>() {
            Ok(addr) => self.addrs.push(addr),
            Err(source) => {
                warn!("Invalid address [{}] in header {}", token, header);
                self.errors.push(ClientAddrParseError::InvalidAddress {
                    header: header.clone(),
                    token: token.to_string(),
                    source,
                });
            }
        }
    }
}

impl Display for ClientAddrs {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.addrs.iter().join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct ForwardedHeadersClientAddrsExtractor {
    #[builder(default = vec![X_FORWARDED_FOR_HEADER, X_REAL_IP_HEADER])]
    headers: Vec<HeaderName>,
}

impl Default for ForwardedHeadersClientAddrsExtractor {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ForwardedHeadersClientAddrsExtractor {
    /// Reads the first value of every configured header in order, splits it
    /// on `,` and parses each trimmed token as an IP address.
    ///
    /// Header values are split as raw bytes, so a token that is not valid
    /// UTF-8 is reported on its own and its neighbours are still parsed.
    pub fn extract(&self, headers: &HeaderMap) -> ClientAddrs {
        let mut client_addrs = ClientAddrs::default();

        for header in &self.headers {
            let Some(value) = headers.get(header) else {
                continue;
            };

            for raw in value.as_bytes().split(|byte| *byte == b',') {
                client_addrs.push_token(header, raw);
            }
        }

        client_addrs
    }
}
