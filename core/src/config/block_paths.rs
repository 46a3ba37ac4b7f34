use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use typed_builder::TypedBuilder;

pub const DEFAULT_STATUS_CODE: u16 = 403;

/// Configuration of a block paths filter as handed over by the host.
///
/// Missing keys fall back to the defaults: silent startup, local requests
/// allowed and `403 Forbidden`. The pattern list has no default and must be
/// provided.
#[derive(
    Validate,
    TypedBuilder,
    Getters,
    CopyGetters,
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockPathsConfig {
    #[getset(get = "pub")]
    #[validate(min_items = 1)]
    #[builder(setter(into))]
    regex: Vec<String>,

    #[getset(get_copy = "pub")]
    #[builder(default = true)]
    silent_start_up: bool,

    #[getset(get_copy = "pub")]
    #[builder(default = true)]
    allow_local_requests: bool,

    #[getset(get_copy = "pub")]
    #[validate(minimum = 100)]
    #[validate(maximum = 599)]
    #[builder(default = DEFAULT_STATUS_CODE)]
    status_code: u16,
}

impl Default for BlockPathsConfig {
    fn default() -> Self {
        Self {
            regex: Vec::new(),
            silent_start_up: true,
            allow_local_requests: true,
            status_code: DEFAULT_STATUS_CODE,
        }
    }
}
