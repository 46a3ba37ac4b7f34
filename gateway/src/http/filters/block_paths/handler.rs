use super::{BlockPathsFilterError, PathMatchers};
use crate::http::filters::client_addrs::{ClientAddrs, ForwardedHeadersClientAddrsExtractor};
use bp_core::config::block_paths::BlockPathsConfig;
use getset::{CopyGetters, Getters};
use http::header::HOST;
use http::{Request, Response, StatusCode};
use strum::Display;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum BlockPathsDecision {
    NotMatched,
    /// A pattern matched, but a forwarded client address is local and local
    /// requests are allowed.
    AllowedLocal,
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct BlockPathsEvaluation {
    #[getset(get = "pub")]
    path: String,

    #[getset(get = "pub")]
    matched_pattern: Option<String>,

    #[getset(get = "pub")]
    client_addrs: ClientAddrs,

    #[getset(get_copy = "pub")]
    decision: BlockPathsDecision,
}

impl BlockPathsEvaluation {
    pub fn is_blocked(&self) -> bool {
        self.decision == BlockPathsDecision::Blocked
    }
}

/// Blocks requests whose escaped path matches one of the configured patterns.
///
/// The handler is immutable once built and can be shared between any number
/// of concurrent requests.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct BlockPathsFilterHandler {
    #[getset(get = "pub")]
    name: String,

    #[getset(get = "pub")]
    matchers: PathMatchers,

    #[getset(get_copy = "pub")]
    status_code: StatusCode,

    #[getset(get_copy = "pub")]
    allow_local_requests: bool,

    extractor: ForwardedHeadersClientAddrsExtractor,
}

impl BlockPathsFilterHandler {
    pub fn new<N: Into<String>>(
        name: N,
        config: &BlockPathsConfig,
    ) -> Result<Self, BlockPathsFilterError> {
        let name = name.into();

        if config.regex().is_empty() {
            return Err(BlockPathsFilterError::EmptyRuleSet);
        }

        if !config.silent_start_up() {
            info!("{}: Regex list: {:?}", name, config.regex());
            info!("{}: StatusCode: {}", name, config.status_code());
        }

        let matchers = PathMatchers::compile(config.regex())?;

        let status_code = StatusCode::from_u16(config.status_code()).map_err(|source| {
            BlockPathsFilterError::InvalidStatusCode {
                status_code: config.status_code(),
                source,
            }
        })?;

        Ok(Self {
            name,
            matchers,
            status_code,
            allow_local_requests: config.allow_local_requests(),
            extractor: ForwardedHeadersClientAddrsExtractor::default(),
        })
    }

    #[instrument(
        name = "BlockPathsFilterHandler::evaluate",
        level = "debug",
        skip(self, req),
        fields(name = %self.name)
    )]
    pub fn evaluate<B>(&self, req: &Request<B>) -> BlockPathsEvaluation {
        // Matched as sent on the wire, percent-encoding included
        let path = req.uri().path();

        let Some(matcher) = self.matchers.find(path) else {
            return BlockPathsEvaluation {
                path: path.to_string(),
                matched_pattern: None,
                client_addrs: ClientAddrs::default(),
                decision: BlockPathsDecision::NotMatched,
            };
        };

        let client_addrs = self.extractor.extract(req.headers());

        // Any single local candidate is enough
        let decision = if self.allow_local_requests && client_addrs.has_local_addr() {
            debug!(
                "{}: Request ({} {}) allowed for local IPs [{}]",
                self.name,
                request_host(req),
                req.uri(),
                client_addrs
            );
            BlockPathsDecision::AllowedLocal
        } else {
            warn!(
                "{}: Request ({} {}) denied for IPs [{}]",
                self.name,
                request_host(req),
                req.uri(),
                client_addrs
            );
            BlockPathsDecision::Blocked
        };

        BlockPathsEvaluation {
            path: path.to_string(),
            matched_pattern: Some(matcher.pattern().to_string()),
            client_addrs,
            decision,
        }
    }

    /// Either hands the request to `next` or answers it with the configured
    /// status code and an empty body.
    pub fn filter<B, R, F>(&self, req: Request<B>, next: F) -> Response<R>
    where
        R: Default,
        F: FnOnce(Request<B>) -> Response<R>,
    {
        if self.evaluate(&req).is_blocked() {
            self.blocked_response()
        } else {
            next(req)
        }
    }

    pub fn blocked_response<R: Default>(&self) -> Response<R> {
        let mut response = Response::new(R::default());
        *response.status_mut() = self.status_code;
        response
    }
}

fn request_host<B>(req: &Request<B>) -> &str {
    req.headers()
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| req.uri().host())
        .unwrap_or_default()
}
