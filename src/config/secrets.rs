use crate::core::SecretResolver;

/// For stores that keep credentials unencrypted (or already decrypted by the
/// config loader, e.g. via `${VAR}` substitution).
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSecrets;

impl SecretResolver for PlainTextSecrets {
    fn decrypt(&self, stored: &str) -> Option<String> {
        let value = stored.trim();
        // An unresolved `${VAR}` placeholder means the variable was never set.
        if value.is_empty() || (value.starts_with("${") && value.ends_with('}')) {
            return None;
        }
        Some(value.to_string())
    }
}
