//! JSON codec with fixed date/time formats.
//!
//! - `format`: serde `with` modules for `yyyy-MM-dd HH:mm:ss`, `yyyy-MM-dd`, `HH:mm:ss`
//! - `codec`: encode/decode helpers; the non-`try_` variants log and return `None`
//! - `quotes`: single-quoted string acceptance on parse
//!
//! Unknown properties are ignored on deserialization, which is serde's default
//! as long as types do not opt into `deny_unknown_fields`.

mod codec;
mod error;
pub mod format;
mod quotes;


pub use codec::{
    is_json_string, json_to_bean, object_to_object, read_tree, str_to_object, to_json_str,
    to_json_str_if_not_already, to_json_str_non_null, try_json_to_bean, try_to_json_str,
    try_to_json_str_non_null,
};
pub use error::{JsonError, JsonResult};
pub use quotes::normalize_quotes;
