use aws_config::{meta::region::RegionProviderChain, BehaviorVersion, SdkConfig};
use tracing::debug;

pub const DEFAULT_REGION: &str = "us-west-2";

/// Standard AWS resolution, the same chain every AWS SDK walks.
///
/// Region: `AWS_REGION`, profile, IMDS, then [`DEFAULT_REGION`].
/// Credentials: env, profile (SSO, `credential_process`), web identity,
/// ECS container role, IMDS. Temporary credentials are refreshed by the
/// provider, not read once. `AWS_ENDPOINT_URL_BEDROCK_RUNTIME` overrides the
/// endpoint.
pub async fn load_sdk_config() -> SdkConfig {
    let region = RegionProviderChain::default_provider().or_else(DEFAULT_REGION);
    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(region)
        .load()
        .await;
    debug!(
        "AWS config region={:?} credentials_provider={}",
        config.region(),
        config.credentials_provider().is_some()
    );
    config
}
