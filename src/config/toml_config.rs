use crate::core::client::DEFAULT_TIMEOUT;
use crate::core::{ConfigProvider, CredentialField, DimensionPolicy, WeightUnit};
use crate::utils::error::{FreightError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CARRIER_CODE: &str = "intelipost";
pub const DEFAULT_CARRIER_TITLE: &str = "E-Sprinter";
pub const DEFAULT_API_URL: &str = "https://api.intelipost.com.br/api/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub carrier: CarrierSection,
    pub api: Option<ApiSection>,
    pub credentials: CredentialsSection,
    pub notification: Option<NotificationSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrierSection {
    pub active: bool,
    pub code: Option<String>,
    /// Name shown in the storefront's shipping method list.
    pub name: String,
    pub title: Option<String>,
    pub origin_zip_code: String,
    /// `gr` for grams; anything else is read as kilograms.
    pub weight_unit: Option<String>,
    pub show_deadline: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Stored credential values, decrypted per call by a `SecretResolver`.
#[derive(Clone, Serialize, Deserialize)]
pub struct CredentialsSection {
    pub account: Option<String>,
    pub password: Option<String>,
    pub api_key: Option<String>,
    pub token: Option<String>,
}

impl std::fmt::Debug for CredentialsSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsSection")
            .field("account", &self.account)
            .field("password_len", &self.password.as_ref().map(|p| p.len()))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSection {
    pub notify_missing_dimensions: Option<bool>,
    /// Admin product page, `{id}` is replaced by the product id.
    pub product_edit_url: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FreightError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FreightError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("carrier.name", &self.carrier.name)?;
        validation::validate_non_empty_string(
            "carrier.origin_zip_code",
            &self.carrier.origin_zip_code,
        )?;
        validation::validate_url("api.base_url", self.api_base_url())?;

        if let Some(timeout) = self.api.as_ref().and_then(|a| a.timeout_seconds) {
            validation::validate_range("api.timeout_seconds", timeout, 1, 60)?;
        }

        if self.dimension_policy().notify_on_missing_dimensions {
            let url = self
                .notification
                .as_ref()
                .and_then(|n| n.product_edit_url.as_deref())
                .ok_or_else(|| FreightError::MissingConfigError {
                    field: "notification.product_edit_url".to_string(),
                })?;
            validation::validate_non_empty_string("notification.product_edit_url", url)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn is_active(&self) -> bool {
        self.carrier.active
    }

    fn carrier_code(&self) -> &str {
        self.carrier.code.as_deref().unwrap_or(DEFAULT_CARRIER_CODE)
    }

    fn carrier_title(&self) -> &str {
        self.carrier.title.as_deref().unwrap_or(DEFAULT_CARRIER_TITLE)
    }

    fn display_name(&self) -> &str {
        &self.carrier.name
    }

    fn origin_zip_code(&self) -> &str {
        &self.carrier.origin_zip_code
    }

    fn weight_unit(&self) -> WeightUnit {
        WeightUnit::parse(self.carrier.weight_unit.as_deref().unwrap_or(""))
    }

    fn api_base_url(&self) -> &str {
        self.api
            .as_ref()
            .and_then(|a| a.base_url.as_deref())
            .unwrap_or(DEFAULT_API_URL)
    }

    fn request_timeout(&self) -> Duration {
        self.api
            .as_ref()
            .and_then(|a| a.timeout_seconds)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    fn stored_credential(&self, field: CredentialField) -> Option<&str> {
        let value = match field {
            CredentialField::Account => &self.credentials.account,
            CredentialField::Password => &self.credentials.password,
            CredentialField::ApiKey => &self.credentials.api_key,
            CredentialField::Token => &self.credentials.token,
        };
        value.as_deref()
    }

    fn dimension_policy(&self) -> DimensionPolicy {
        DimensionPolicy {
            notify_on_missing_dimensions: self
                .notification
                .as_ref()
                .and_then(|n| n.notify_missing_dimensions)
                .unwrap_or(false),
        }
    }

    fn show_deadline(&self) -> bool {
        self.carrier.show_deadline.unwrap_or(false)
    }

    fn product_edit_url(&self) -> &str {
        self.notification
            .as_ref()
            .and_then(|n| n.product_edit_url.as_deref())
            .unwrap_or("")
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
