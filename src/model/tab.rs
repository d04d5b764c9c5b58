use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

/// Listing filter selected by the user.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StatusTab {
    #[default]
    All,
    Live,
    Upcoming,
}
