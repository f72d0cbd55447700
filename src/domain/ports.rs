use crate::domain::model::{
    DimensionNotice, DimensionPolicy, ProviderResponse, QuoteRequestDocument, WeightUnit,
};
use crate::utils::error::{Result, TransportError};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Account,
    Password,
    ApiKey,
    Token,
}

impl CredentialField {
    pub fn name(&self) -> &'static str {
        match self {
            CredentialField::Account => "account",
            CredentialField::Password => "password",
            CredentialField::ApiKey => "api_key",
            CredentialField::Token => "token",
        }
    }
}

/// Carrier settings as stored by the storefront. Credential values are the
/// stored (possibly encrypted) form; see [`SecretResolver`].
pub trait ConfigProvider: Send + Sync {
    fn is_active(&self) -> bool;
    fn carrier_code(&self) -> &str;
    fn carrier_title(&self) -> &str;
    fn display_name(&self) -> &str;
    fn origin_zip_code(&self) -> &str;
    fn weight_unit(&self) -> WeightUnit;
    fn api_base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn stored_credential(&self, field: CredentialField) -> Option<&str>;
    fn dimension_policy(&self) -> DimensionPolicy;
    fn show_deadline(&self) -> bool;
    fn product_edit_url(&self) -> &str;
}

pub trait SecretResolver: Send + Sync {
    /// `None` when the stored value cannot be turned into a usable secret.
    fn decrypt(&self, stored: &str) -> Option<String>;
}

#[async_trait]
pub trait QuoteTransport: Send + Sync {
    async fn quote(
        &self,
        base_url: &str,
        api_key: &str,
        document: &QuoteRequestDocument,
    ) -> std::result::Result<ProviderResponse, TransportError>;
}

pub trait NotificationChannel: Send + Sync {
    fn publish(&self, notice: &DimensionNotice) -> Result<()>;
}

/// Decrypted credentials, alive for one quote call only.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub account: String,
    pub password: String,
    pub api_key: String,
    pub token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("password_len", &self.password.len())
            .field("api_key", &"<redacted>")
            .field("token", &"<redacted>")
            .finish()
    }
}
