// src/infra/config.rs — Run configuration and AWS credential resolution
//
// One RunConfig is constructed at process start and passed by reference into
// every component that issues network calls. There is no ambient session or
// process-global credential state.

use std::path::PathBuf;

use crate::infra::errors::ArenaError;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_PROFILE: &str = "default";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// AWS region hosting the Bedrock Runtime endpoint.
    pub region: String,
    /// Credential profile to resolve when env credentials are absent.
    pub profile: String,
    /// Output-token cap passed to every candidate model invocation.
    pub max_output_tokens: u32,
    /// Directory that report files are written into.
    pub output_dir: PathBuf,
}

impl RunConfig {
    /// Build a config from explicit overrides, falling back to environment
    /// variables and then to defaults.
    pub fn resolve(
        region: Option<String>,
        profile: Option<String>,
        max_output_tokens: Option<u32>,
        output_dir: Option<PathBuf>,
    ) -> Result<Self, ArenaError> {
        let region = region
            .or_else(|| std::env::var("AWS_REGION").ok())
            .or_else(|| std::env::var("AWS_DEFAULT_REGION").ok())
            .unwrap_or_else(|| DEFAULT_REGION.into());

        let profile = profile
            .or_else(|| std::env::var("AWS_PROFILE").ok())
            .unwrap_or_else(|| DEFAULT_PROFILE.into());

        let max_output_tokens = match max_output_tokens {
            Some(n) => n,
            None => match std::env::var("SUMMARENA_MAX_TOKENS") {
                Ok(v) => v
                    .parse()
                    .map_err(|_| ArenaError::Config(format!("invalid SUMMARENA_MAX_TOKENS: {v}")))?,
                Err(_) => DEFAULT_MAX_OUTPUT_TOKENS,
            },
        };

        let output_dir = output_dir
            .or_else(|| std::env::var("SUMMARENA_OUTPUT_DIR").ok().map(PathBuf::from))
            .map(Ok)
            .unwrap_or_else(std::env::current_dir)?;

        Ok(Self {
            region,
            profile,
            max_output_tokens,
            output_dir,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl AwsCredentials {
    /// Resolve credentials: env vars first, then the named profile in
    /// `~/.aws/credentials`.
    pub fn resolve(profile: &str) -> Result<Self, ArenaError> {
        if let (Ok(access_key_id), Ok(secret_access_key)) = (
            std::env::var("AWS_ACCESS_KEY_ID"),
            std::env::var("AWS_SECRET_ACCESS_KEY"),
        ) {
            return Ok(Self {
                access_key_id,
                secret_access_key,
                session_token: std::env::var("AWS_SESSION_TOKEN").ok(),
            });
        }

        let path = dirs::home_dir()
            .map(|h| h.join(".aws").join("credentials"))
            .ok_or_else(|| ArenaError::Config("cannot locate home directory".into()))?;
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            ArenaError::Config(format!(
                "no AWS credentials in environment and {} unreadable: {e}",
                path.display()
            ))
        })?;

        Self::from_credentials_file(&contents, profile).ok_or_else(|| {
            ArenaError::Config(format!("profile '{profile}' not found in {}", path.display()))
        })
    }

    /// Scan an AWS shared-credentials file for the named profile section.
    fn from_credentials_file(contents: &str, profile: &str) -> Option<Self> {
        let mut in_section = false;
        let mut access_key_id = None;
        let mut secret_access_key = None;
        let mut session_token = None;

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if line.starts_with('[') && line.ends_with(']') {
                in_section = line[1..line.len() - 1].trim() == profile;
                continue;
            }
            if !in_section {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim().to_string();
                match key.trim() {
                    "aws_access_key_id" => access_key_id = Some(value),
                    "aws_secret_access_key" => secret_access_key = Some(value),
                    "aws_session_token" => session_token = Some(value),
                    _ => {}
                }
            }
        }

        Some(Self {
            access_key_id: access_key_id?,
            secret_access_key: secret_access_key?,
            session_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
[default]
aws_access_key_id = AKIADEFAULT
aws_secret_access_key = secret-default

[bench]
# temporary keys
aws_access_key_id = AKIABENCH
aws_secret_access_key = secret-bench
aws_session_token = tok-bench
";

    #[test]
    fn credentials_file_picks_named_profile() {
        let creds = AwsCredentials::from_credentials_file(SAMPLE, "bench").unwrap();
        assert_eq!(creds.access_key_id, "AKIABENCH");
        assert_eq!(creds.secret_access_key, "secret-bench");
        assert_eq!(creds.session_token.as_deref(), Some("tok-bench"));
    }

    #[test]
    fn credentials_file_default_profile_has_no_token() {
        let creds = AwsCredentials::from_credentials_file(SAMPLE, "default").unwrap();
        assert_eq!(creds.access_key_id, "AKIADEFAULT");
        assert!(creds.session_token.is_none());
    }

    #[test]
    fn credentials_file_missing_profile() {
        assert!(AwsCredentials::from_credentials_file(SAMPLE, "absent").is_none());
    }

    #[test]
    fn resolve_applies_defaults() {
        let cfg = RunConfig::resolve(
            Some("eu-west-1".into()),
            Some("bench".into()),
            None,
            Some(PathBuf::from("/tmp/reports")),
        )
        .unwrap();
        assert_eq!(cfg.region, "eu-west-1");
        assert_eq!(cfg.profile, "bench");
        assert_eq!(cfg.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/reports"));
    }
}
