//! Integration resource implementations

#[cfg(feature = "aws-log-collection")]
mod aws_log_collection;
#[cfg(feature = "gcp")]
mod gcp;

use std::sync::Arc;

use crate::traits::IntegrationResource;

#[cfg(feature = "aws-log-collection")]
pub use aws_log_collection::AwsLogCollectionResource;
#[cfg(feature = "gcp")]
pub use gcp::GcpIntegrationResource;

/// Every resource enabled via feature flags.
pub fn all_resources() -> Vec<Arc<dyn IntegrationResource>> {
    let mut resources: Vec<Arc<dyn IntegrationResource>> = Vec::new();
    #[cfg(feature = "aws-log-collection")]
    resources.push(Arc::new(AwsLogCollectionResource));
    #[cfg(feature = "gcp")]
    resources.push(Arc::new(GcpIntegrationResource));
    resources
}
