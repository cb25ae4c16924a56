// Credential providers for the Kusto cluster
use crate::application::credentials::{AccessToken, CredentialProvider};
use crate::infrastructure::config::{AuthMode, GatewayConfig};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

pub fn from_config(config: &GatewayConfig) -> Result<Arc<dyn CredentialProvider>> {
    match config.auth {
        AuthMode::AzureCli => Ok(Arc::new(AzureCliTokenProvider::new(config.cluster_url.clone()))),
        AuthMode::Static => {
            let token = config
                .access_token
                .clone()
                .context("access_token is required for static auth")?;
            Ok(Arc::new(StaticTokenProvider::new(AccessToken::new(token))))
        }
    }
}

#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    pub fn new(token: AccessToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl CredentialProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<AccessToken> {
        Ok(self.token.clone())
    }
}

/// Uses the identity of the local `az login` session.
#[derive(Debug, Clone)]
pub struct AzureCliTokenProvider {
    resource: String,
}

#[derive(Debug, Deserialize)]
struct AzureCliToken {
    #[serde(rename = "accessToken")]
    access_token: String,
}

impl AzureCliTokenProvider {
    pub fn new(resource: String) -> Self {
        Self {
            resource: resource.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CredentialProvider for AzureCliTokenProvider {
    async fn access_token(&self) -> Result<AccessToken> {
        let output = tokio::process::Command::new("az")
            .args(["account", "get-access-token", "--output", "json", "--resource"])
            .arg(&self.resource)
            .output()
            .await
            .context("Failed to run Azure CLI")?;

        if !output.status.success() {
            anyhow::bail!(
                "Azure CLI could not issue a token: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        parse_cli_token(&output.stdout)
    }
}

fn parse_cli_token(stdout: &[u8]) -> Result<AccessToken> {
    let token: AzureCliToken =
        serde_json::from_slice(stdout).context("Failed to parse Azure CLI token output")?;
    Ok(AccessToken::new(token.access_token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider() {
        let provider = StaticTokenProvider::new(AccessToken::new("abc"));
        assert_eq!(provider.access_token().await.unwrap().secret(), "abc");
    }

    #[test]
    fn test_parse_cli_token() {
        let stdout = br#"{
            "accessToken": "eyJ0eXAiOiJKV1Qi",
            "expiresOn": "2026-10-19 15:04:05.000000",
            "subscription": "00000000-0000-0000-0000-000000000000",
            "tokenType": "Bearer"
        }"#;
        assert_eq!(parse_cli_token(stdout).unwrap().secret(), "eyJ0eXAiOiJKV1Qi");
        assert!(parse_cli_token(b"ERROR: Please run 'az login'").is_err());
    }
}
