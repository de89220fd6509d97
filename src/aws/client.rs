//! AWS Client
//!
//! Loads one shared SDK configuration and builds every service client from it,
//! so identity, parameter, QuickSight and S3 calls all use the same region.

use super::identity::StsIdentity;
use super::parameters::SsmParameterStore;
use super::quicksight::QuickSightClient;
use super::storage::S3Store;
use super::Services;
use crate::config::FALLBACK_REGION;
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Load the shared SDK configuration.
///
/// Region precedence: explicit region, then the default provider chain
/// (`AWS_REGION`, profile), then [`FALLBACK_REGION`].
pub async fn load_sdk_config(region: Option<&str>) -> SdkConfig {
    let region_provider = RegionProviderChain::first_try(region.map(|r| Region::new(r.to_string())))
        .or_default_provider()
        .or_else(FALLBACK_REGION);

    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await;

    tracing::debug!(
        "Loaded AWS config for region {}",
        config.region().map(|r| r.as_ref()).unwrap_or("-")
    );

    config
}

/// Build the service set from a loaded SDK configuration
pub fn services_from_config(config: &SdkConfig) -> Services {
    Services {
        identity: Box::new(StsIdentity::new(aws_sdk_sts::Client::new(config))),
        parameters: Box::new(SsmParameterStore::new(aws_sdk_ssm::Client::new(config))),
        quicksight: Box::new(QuickSightClient::new(aws_sdk_quicksight::Client::new(config))),
        storage: Box::new(S3Store::new(aws_sdk_s3::Client::new(config))),
    }
}

/// Load configuration and build the service set in one step
pub async fn connect(region: Option<&str>) -> Services {
    let config = load_sdk_config(region).await;
    services_from_config(&config)
}
