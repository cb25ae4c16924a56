// Credential provider seam for store authentication
use async_trait::async_trait;
use std::fmt;

const REDACTED: &str = "[REDACTED]";

/// Bearer token for the store. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }

    /// Strip every occurrence of the token from a diagnostic message.
    pub fn redact(&self, message: &str) -> String {
        if self.0.is_empty() {
            return message.to_string();
        }
        message.replace(&self.0, REDACTED)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&REDACTED).finish()
    }
}

#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn access_token(&self) -> anyhow::Result<AccessToken>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_removes_token() {
        let token = AccessToken::new("eyJ0eXAi.secret");
        let message = "401 Unauthorized: token eyJ0eXAi.secret expired (eyJ0eXAi.secret)";
        assert_eq!(
            token.redact(message),
            "401 Unauthorized: token [REDACTED] expired ([REDACTED])"
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let token = AccessToken::new("hunter2");
        assert!(!format!("{:?}", token).contains("hunter2"));
    }

    #[test]
    fn test_empty_token_redacts_nothing() {
        assert_eq!(AccessToken::new("").redact("timeout"), "timeout");
    }
}
