//! Provider configuration, resource registry, and lifecycle sequencing.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::client::DatadogClient;
use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};
use crate::resources::all_resources;
use crate::state::ResourceData;
use crate::traits::IntegrationResource;

/// Everything a resource handler needs: the API client and its auth context.
///
/// Built once by [`Provider`] and read-only afterwards.
pub struct ProviderConfiguration {
    pub client: DatadogClient,
    pub config: ProviderConfig,
}

impl ProviderConfiguration {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        Ok(Self {
            client: DatadogClient::new(&config)?,
            config,
        })
    }
}

/// The Datadog integrations provider.
///
/// Owns the shared [`ProviderConfiguration`] and the registry of resource
/// types, and drives each lifecycle call the way the host sequences them.
pub struct Provider {
    meta: Arc<ProviderConfiguration>,
    resources: BTreeMap<&'static str, Arc<dyn IntegrationResource>>,
}

impl Provider {
    /// Builds the provider without contacting the API.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let meta = Arc::new(ProviderConfiguration::new(config)?);
        let resources = all_resources()
            .into_iter()
            .map(|r| (r.type_name(), r))
            .collect();
        Ok(Self { meta, resources })
    }

    /// Builds the provider and, when `config.validate` is set, checks the
    /// API key against Datadog first.
    pub async fn configure(config: ProviderConfig) -> Result<Self> {
        let provider = Self::new(config)?;
        if provider.meta.config.validate {
            let valid = provider.meta.client.validate_credentials().await?;
            if !valid {
                log::warn!("Datadog rejected the configured API key");
                return Err(ProviderError::InvalidCredentials {
                    provider: "datadog".to_string(),
                    raw_message: Some("API key validation failed".to_string()),
                });
            }
            log::info!("Datadog credentials validated against {}", provider.meta.client.api_url());
        }
        Ok(provider)
    }

    pub fn meta(&self) -> &ProviderConfiguration {
        &self.meta
    }

    /// Registered resource type names, sorted.
    pub fn resource_types(&self) -> Vec<&'static str> {
        self.resources.keys().copied().collect()
    }

    pub fn resource(&self, type_name: &str) -> Result<Arc<dyn IntegrationResource>> {
        self.resources
            .get(type_name)
            .cloned()
            .ok_or_else(|| ProviderError::InvalidParameter {
                provider: "datadog".to_string(),
                param: "type".to_string(),
                detail: format!("unknown resource type '{type_name}'"),
            })
    }

    /// Applies a planned change and returns the new state (`None` once deleted).
    ///
    /// - no prior state: Create
    /// - no planned state: Delete
    /// - a force-new attribute changed: Delete, then Create
    /// - otherwise: Update
    pub async fn apply(
        &self,
        type_name: &str,
        prior: Option<ResourceData>,
        planned: Option<ResourceData>,
    ) -> Result<Option<ResourceData>> {
        let resource = self.resource(type_name)?;
        let schema = resource.schema();
        let meta = self.meta.as_ref();
        let prior = prior.filter(ResourceData::has_id);

        match (prior, planned) {
            (None, None) => Ok(None),
            (Some(mut prior), None) => {
                log::debug!("[{type_name}] delete id={}", prior.id());
                resource.delete(&mut prior, meta).await?;
                Ok(None)
            }
            (None, Some(mut planned)) => {
                schema.validate(&mut planned)?;
                log::debug!("[{type_name}] create {}", planned.redacted(&schema));
                resource.create(&mut planned, meta).await?;
                Ok(Some(planned))
            }
            (Some(mut prior), Some(mut planned)) => {
                schema.validate(&mut planned)?;
                let replaced = schema.force_new_changes(&prior, &planned);
                if replaced.is_empty() {
                    planned.set_id(prior.id());
                    log::debug!("[{type_name}] update id={}", planned.id());
                    resource.update(&mut planned, meta).await?;
                } else {
                    log::info!(
                        "[{type_name}] replacing id={} (changed: {})",
                        prior.id(),
                        replaced.join(", ")
                    );
                    resource.delete(&mut prior, meta).await?;
                    resource.create(&mut planned, meta).await?;
                }
                Ok(Some(planned))
            }
        }
    }

    /// Refreshes state from the remote API: Exists, then Read.
    ///
    /// Returns `None` when the remote record is gone.
    pub async fn refresh(
        &self,
        type_name: &str,
        mut state: ResourceData,
    ) -> Result<Option<ResourceData>> {
        let resource = self.resource(type_name)?;
        let meta = self.meta.as_ref();

        if !state.has_id() || !resource.exists(&state, meta).await? {
            log::warn!("[{type_name}] id={} no longer exists remotely", state.id());
            return Ok(None);
        }
        resource.read(&mut state, meta).await?;
        Ok(state.has_id().then_some(state))
    }

    /// Imports an existing remote record by its natural key.
    pub async fn import(&self, type_name: &str, id: &str) -> Result<Vec<ResourceData>> {
        let resource = self.resource(type_name)?;
        resource
            .import(ResourceData::with_id(id), self.meta.as_ref())
            .await
    }
}
