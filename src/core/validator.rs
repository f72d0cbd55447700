use crate::core::{ConfigProvider, Credentials, CredentialField, SecretResolver, ShipmentRequest};
use crate::utils::error::{FreightError, Result};
use crate::utils::validation::is_valid_postal_code;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostalSide {
    Origin,
    Destination,
}

impl fmt::Display for PostalSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostalSide::Origin => write!(f, "origin"),
            PostalSide::Destination => write!(f, "destination"),
        }
    }
}

/// Reasons the carrier declines to quote. None of these are errors for the
/// storefront; the carrier is simply left out of checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    CarrierDisabled,
    InvalidPostalCode { side: PostalSide, value: String },
    NotConfigured { missing: Vec<CredentialField> },
    EmptyCart,
    /// A cart line with quantity zero; nothing of it would ship.
    ZeroQuantity { product_id: u64 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::CarrierDisabled => write!(f, "carrier is inactive"),
            Rejection::InvalidPostalCode { side, value } => {
                write!(f, "invalid {} zip code '{}'", side, value)
            }
            Rejection::NotConfigured { missing } => {
                let names: Vec<&str> = missing.iter().map(|m| m.name()).collect();
                write!(f, "carrier not configured (missing: {})", names.join(", "))
            }
            Rejection::EmptyCart => write!(f, "cart is empty"),
            Rejection::ZeroQuantity { product_id } => {
                write!(f, "product {} has quantity zero", product_id)
            }
        }
    }
}

impl From<&Rejection> for FreightError {
    fn from(rejection: &Rejection) -> Self {
        FreightError::ValidationError {
            message: rejection.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Accepted(Credentials),
    Rejected(Rejection),
}

const CREDENTIAL_FIELDS: [CredentialField; 4] = [
    CredentialField::Account,
    CredentialField::Password,
    CredentialField::ApiKey,
    CredentialField::Token,
];

/// Runs the entry gates in order and stops at the first failure.
///
/// Only a non-positive package weight is returned as `Err`: it means the
/// catalog is broken, which the operator has to see.
pub fn validate<C, R>(
    config: &C,
    secrets: &R,
    request: &ShipmentRequest,
) -> Result<ValidationOutcome>
where
    C: ConfigProvider + ?Sized,
    R: SecretResolver + ?Sized,
{
    if !config.is_active() {
        tracing::info!(carrier = config.carrier_code(), "Carrier is inactive");
        return Ok(ValidationOutcome::Rejected(Rejection::CarrierDisabled));
    }

    let origin = config.origin_zip_code();
    let destination = request.destination_zip_code.as_str();
    for (side, value) in [(PostalSide::Origin, origin), (PostalSide::Destination, destination)] {
        if !is_valid_postal_code(value) {
            tracing::warn!(%side, origin, destination, "Invalid zip code");
            return Ok(ValidationOutcome::Rejected(Rejection::InvalidPostalCode {
                side,
                value: value.to_string(),
            }));
        }
    }

    // NaN fails this comparison too.
    if !(request.package_weight > 0.0) {
        tracing::error!(weight = request.package_weight, "Package weight is zero");
        return Err(FreightError::DataIntegrityError {
            message: format!("package weight must be positive, got {}", request.package_weight),
        });
    }

    let credentials = match resolve_credentials(config, secrets) {
        Ok(credentials) => credentials,
        Err(rejection) => return Ok(ValidationOutcome::Rejected(rejection)),
    };

    if request.lines.is_empty() {
        tracing::info!("Cart is empty");
        return Ok(ValidationOutcome::Rejected(Rejection::EmptyCart));
    }

    if let Some(line) = request.lines.iter().find(|line| line.quantity == 0) {
        tracing::warn!(product_id = line.product_id, "Cart line has quantity zero");
        return Ok(ValidationOutcome::Rejected(Rejection::ZeroQuantity {
            product_id: line.product_id,
        }));
    }

    Ok(ValidationOutcome::Accepted(credentials))
}

fn resolve_credentials<C, R>(
    config: &C,
    secrets: &R,
) -> std::result::Result<Credentials, Rejection>
where
    C: ConfigProvider + ?Sized,
    R: SecretResolver + ?Sized,
{
    let mut values: Vec<Option<String>> = CREDENTIAL_FIELDS
        .iter()
        .map(|field| {
            config
                .stored_credential(*field)
                .and_then(|stored| secrets.decrypt(stored))
                .filter(|plain| !plain.trim().is_empty())
        })
        .collect();

    let missing: Vec<CredentialField> = CREDENTIAL_FIELDS
        .iter()
        .zip(values.iter())
        .filter(|(_, value)| value.is_none())
        .map(|(field, _)| *field)
        .collect();

    if !missing.is_empty() {
        let account = values[0].as_deref().unwrap_or("");
        let password_len = values[1].as_ref().map(|p| p.len()).unwrap_or(0);
        tracing::warn!(
            account,
            password_len,
            missing = ?missing.iter().map(|m| m.name()).collect::<Vec<_>>(),
            "Carrier not configured"
        );
        return Err(Rejection::NotConfigured { missing });
    }

    let mut take = |i: usize| values[i].take().unwrap_or_default();
    Ok(Credentials {
        account: take(0),
        password: take(1),
        api_key: take(2),
        token: take(3),
    })
}
