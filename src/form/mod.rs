//! Restaurant management form: model and transfer codec.
//!
//! - [`model`]: the editable form model
//! - [`codec`]: entity → form decoding, form → payload encoding and validation
//! - [`payload`]: the flattened multipart-ready field list

pub mod codec;
pub mod model;
pub mod payload;

pub use codec::{decode, encode, validate};
pub use model::{ImageFile, MenuItemForm, RestaurantForm};
pub use payload::{FieldValue, TransferPayload};
