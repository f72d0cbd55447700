pub mod builder;
pub mod carrier;
pub mod client;
pub mod mapper;
pub mod notifier;
pub mod validator;

pub use crate::domain::model::{
    CarrierRateOption, CartLine, DeliveryOption, DimensionNotice, DimensionPolicy, Dimensions,
    NoticeSeverity, ProductDimensions, ProviderContent, ProviderResponse, QuoteRequestDocument,
    RateQuoteResult, ShipmentRequest, VolumeRecord, WeightUnit, VOLUME_TYPE_BOX,
};
pub use crate::domain::ports::{
    ConfigProvider, CredentialField, Credentials, NotificationChannel, QuoteTransport,
    SecretResolver,
};
pub use crate::utils::error::Result;
