//! Storage accounts

use crate::resource_group::{tags_output, tags_value};
use crate::tokens;
use crate::types::{AccessTier, Encryption, Endpoints, Kind, MinimumTlsVersion, NetworkRuleSet, Sku};
use skyweave_deploy::{
    CustomResource, DeploymentContext, Input, Inputs, ResourceOptions, Result,
};
use skyweave_output::Output;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct StorageAccountArgs {
    pub resource_group_name: Input,
    pub account_name: Option<Input>,
    pub location: Option<Input>,
    pub sku: Sku,
    pub kind: Kind,
    pub access_tier: Option<AccessTier>,
    pub minimum_tls_version: Option<MinimumTlsVersion>,
    pub enable_https_traffic_only: Option<bool>,
    pub allow_blob_public_access: Option<bool>,
    pub encryption: Option<Encryption>,
    pub network_rule_set: Option<NetworkRuleSet>,
    pub tags: BTreeMap<String, String>,
}

impl StorageAccountArgs {
    pub fn new(resource_group_name: impl Into<Input>, sku: impl Into<Sku>, kind: Kind) -> Self {
        Self {
            resource_group_name: resource_group_name.into(),
            account_name: None,
            location: None,
            sku: sku.into(),
            kind,
            access_tier: None,
            minimum_tls_version: None,
            enable_https_traffic_only: None,
            allow_blob_public_access: None,
            encryption: None,
            network_rule_set: None,
            tags: BTreeMap::new(),
        }
    }

    pub fn with_account_name(mut self, name: impl Into<Input>) -> Self {
        self.account_name = Some(name.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<Input>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_access_tier(mut self, tier: AccessTier) -> Self {
        self.access_tier = Some(tier);
        self
    }

    pub fn with_minimum_tls_version(mut self, version: MinimumTlsVersion) -> Self {
        self.minimum_tls_version = Some(version);
        self
    }

    pub fn with_https_traffic_only(mut self, enabled: bool) -> Self {
        self.enable_https_traffic_only = Some(enabled);
        self
    }

    pub fn with_blob_public_access(mut self, allowed: bool) -> Self {
        self.allow_blob_public_access = Some(allowed);
        self
    }

    pub fn with_encryption(mut self, encryption: Encryption) -> Self {
        self.encryption = Some(encryption);
        self
    }

    pub fn with_network_rule_set(mut self, rules: NetworkRuleSet) -> Self {
        self.network_rule_set = Some(rules);
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    fn into_inputs(self) -> Result<Inputs> {
        let mut inputs = Inputs::new()
            .set("resourceGroupName", self.resource_group_name)
            .set_opt("accountName", self.account_name)
            .set_opt("location", self.location)
            .set("sku", Input::value(self.sku)?)
            .set("kind", Input::value(self.kind)?)
            .set_opt("enableHttpsTrafficOnly", self.enable_https_traffic_only)
            .set_opt("allowBlobPublicAccess", self.allow_blob_public_access);

        if let Some(tier) = self.access_tier {
            inputs.insert("accessTier", Input::value(tier)?);
        }
        if let Some(version) = self.minimum_tls_version {
            inputs.insert("minimumTlsVersion", version.to_string());
        }
        if let Some(encryption) = self.encryption {
            inputs.insert("encryption", Input::value(encryption)?);
        }
        if let Some(rules) = self.network_rule_set {
            inputs.insert("networkRuleSet", Input::value(rules)?);
        }
        if !self.tags.is_empty() {
            inputs.insert("tags", tags_value(self.tags));
        }
        Ok(inputs)
    }
}

/// A storage account
#[derive(Debug, Clone)]
pub struct StorageAccount {
    resource: CustomResource,
}

impl StorageAccount {
    pub fn new(ctx: &DeploymentContext, name: &str, args: StorageAccountArgs) -> Result<Self> {
        Self::with_options(ctx, name, args, ResourceOptions::new())
    }

    pub fn with_options(
        ctx: &DeploymentContext,
        name: &str,
        args: StorageAccountArgs,
        options: ResourceOptions,
    ) -> Result<Self> {
        let resource =
            ctx.register_resource(tokens::STORAGE_ACCOUNT, name, args.into_inputs()?, options)?;
        Ok(Self { resource })
    }

    pub fn resource(&self) -> &CustomResource {
        &self.resource
    }

    pub fn id(&self) -> &Output<String> {
        self.resource.id()
    }

    pub fn name(&self) -> Output<String> {
        self.resource.output_as("name")
    }

    pub fn tags(&self) -> Output<BTreeMap<String, String>> {
        tags_output(&self.resource)
    }

    /// Endpoints computed by the provider once the account exists
    pub fn primary_endpoints(&self) -> Output<Endpoints> {
        self.resource.output_as("primaryEndpoints")
    }

    /// The static website endpoint; fails if the provider reported none
    pub fn web_endpoint(&self) -> Output<String> {
        let urn = self.resource.urn().to_string();
        self.primary_endpoints().try_apply(move |endpoints| {
            endpoints
                .web
                .ok_or_else(|| format!("{} reported no web endpoint", urn))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SkuName;
    use serde_json::json;

    #[tokio::test]
    async fn test_args_use_provider_wire_names() {
        let map = StorageAccountArgs::new("rg", SkuName::StandardLrs, Kind::StorageV2)
            .with_account_name("sawebsite")
            .with_access_tier(AccessTier::Hot)
            .with_minimum_tls_version(MinimumTlsVersion::Tls1_2)
            .with_https_traffic_only(true)
            .with_network_rule_set(NetworkRuleSet::allow_all())
            .into_inputs()
            .unwrap()
            .into_output()
            .await_resolved()
            .await
            .unwrap();

        assert_eq!(map["resourceGroupName"], json!("rg"));
        assert_eq!(map["accountName"], json!("sawebsite"));
        assert_eq!(map["sku"], json!({ "name": "Standard_LRS" }));
        assert_eq!(map["kind"], json!("StorageV2"));
        assert_eq!(map["accessTier"], json!("Hot"));
        assert_eq!(map["minimumTlsVersion"], json!("TLS1_2"));
        assert_eq!(map["enableHttpsTrafficOnly"], json!(true));
        assert_eq!(
            map["networkRuleSet"],
            json!({ "bypass": "AzureServices", "defaultAction": "Allow" })
        );
        assert!(!map.contains_key("allowBlobPublicAccess"));
        assert!(!map.contains_key("tags"));
    }
}
