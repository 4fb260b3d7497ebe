pub use common_utils::errors::{CustomResult, ValidationError};

use common_enums::PaymentMethodType;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComponentError {
    #[error("A card component can not be built for payment method type `{payment_method_type}`")]
    NotACardPaymentMethod {
        payment_method_type: PaymentMethodType,
    },
}
