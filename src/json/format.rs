//! Fixed date/time wire formats.
//!
//! Every temporal value crossing the JSON boundary uses one of three patterns:
//!
//! - datetime: `yyyy-MM-dd HH:mm:ss`
//! - date: `yyyy-MM-dd`
//! - time: `HH:mm:ss`
//!
//! Each pattern is exposed as a serde `with` module, plus an `_opt` variant for
//! `Option` fields:
//!
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct Example {
//!     #[serde(with = "crate::json::format::datetime")]
//!     created_at: NaiveDateTime,
//!     #[serde(default, with = "crate::json::format::date_opt")]
//!     birthday: Option<NaiveDate>,
//! }
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serializer};

/// `yyyy-MM-dd HH:mm:ss`
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// `yyyy-MM-dd`
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// `HH:mm:ss`
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Generate a `with` module and its `Option` counterpart for one chrono type.
macro_rules! chrono_format {
    ($module:ident, $opt_module:ident, $ty:ty, $fmt:expr) => {
        pub mod $module {
            use super::*;

            pub fn serialize<S: Serializer>(value: &$ty, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(&value.format($fmt))
            }

            pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<$ty, D::Error> {
                let raw = String::deserialize(deserializer)?;
                <$ty>::parse_from_str(&raw, $fmt).map_err(serde::de::Error::custom)
            }
        }

        pub mod $opt_module {
            use super::*;

            pub fn serialize<S: Serializer>(
                value: &Option<$ty>,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                match value {
                    Some(value) => serializer.serialize_some(&value.format($fmt).to_string()),
                    None => serializer.serialize_none(),
                }
            }

            pub fn deserialize<'de, D: Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Option<$ty>, D::Error> {
                Option::<String>::deserialize(deserializer)?
                    .map(|raw| <$ty>::parse_from_str(&raw, $fmt).map_err(serde::de::Error::custom))
                    .transpose()
            }
        }
    };
}

chrono_format!(datetime, datetime_opt, NaiveDateTime, DATETIME_FORMAT);
chrono_format!(date, date_opt, NaiveDate, DATE_FORMAT);
chrono_format!(time, time_opt, NaiveTime, TIME_FORMAT);
