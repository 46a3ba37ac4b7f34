use http::HeaderName;

mod extractors;

pub const X_FORWARDED_FOR_HEADER: HeaderName = HeaderName::from_static("x-forwarded-for");
pub const X_REAL_IP_HEADER: HeaderName = HeaderName::from_static("x-real-ip");

pub use extractors::*;
