#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

pub mod builder;
pub mod card_component;
pub mod configs;
pub mod errors;
pub mod types;

pub use builder::{
    build_component, build_components, ComponentContext, ComponentKind, FormItem, PaymentComponent,
};
pub use card_component::{
    CardComponent, CardInput, PaymentComponentData, PaymentComponentDelegate,
};
pub use configs::settings::Settings;
