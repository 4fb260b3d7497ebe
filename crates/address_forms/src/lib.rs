//! Country dependent address form schemes.

pub mod address;
pub mod builder;
pub mod scheme;
pub mod view_model;

pub use address::PostalAddress;
pub use builder::{resolve, AddressFormModelBuilder, DefaultAddressFormModelBuilder};
pub use common_enums::AddressField;
pub use scheme::{AddressLayoutNode, Scheme};
pub use view_model::AddressFormModel;
