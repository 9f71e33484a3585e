//! Blueprint string codec: entities in, a
//! `"0" + base64(deflate(json))` blueprint string out, and back.

pub mod codec;
pub mod error;

pub use codec::{decode_json, encode, encode_json};
pub use error::BlueprintError;
