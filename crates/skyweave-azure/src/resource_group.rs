//! Resource groups

use crate::tokens;
use skyweave_deploy::{
    CustomResource, DeploymentContext, Input, Inputs, ResourceOptions, Result,
};
use skyweave_engine::{PropertyMap, Value};
use skyweave_output::Output;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct ResourceGroupArgs {
    /// Name in Azure, when it should differ from the logical name
    pub resource_group_name: Option<Input>,
    pub location: Option<Input>,
    pub tags: BTreeMap<String, String>,
}

impl ResourceGroupArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<Input>) -> Self {
        self.resource_group_name = Some(name.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<Input>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    fn into_inputs(self) -> Inputs {
        let mut inputs = Inputs::new()
            .set_opt("resourceGroupName", self.resource_group_name)
            .set_opt("location", self.location);
        if !self.tags.is_empty() {
            inputs.insert("tags", tags_value(self.tags));
        }
        inputs
    }
}

pub(crate) fn tags_value(tags: BTreeMap<String, String>) -> Value {
    Value::Object(
        tags.into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect::<PropertyMap>(),
    )
}

/// The `tags` output of a resource; empty when it has none
pub(crate) fn tags_output(resource: &CustomResource) -> Output<BTreeMap<String, String>> {
    resource.output("tags").try_apply(|tags| match tags {
        Some(tags) => serde_json::from_value(tags),
        None => Ok(BTreeMap::new()),
    })
}

/// A resource group
#[derive(Debug, Clone)]
pub struct ResourceGroup {
    resource: CustomResource,
}

impl ResourceGroup {
    pub fn new(ctx: &DeploymentContext, name: &str, args: ResourceGroupArgs) -> Result<Self> {
        Self::with_options(ctx, name, args, ResourceOptions::new())
    }

    pub fn with_options(
        ctx: &DeploymentContext,
        name: &str,
        args: ResourceGroupArgs,
        options: ResourceOptions,
    ) -> Result<Self> {
        let resource =
            ctx.register_resource(tokens::RESOURCE_GROUP, name, args.into_inputs(), options)?;
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_args_become_inputs() {
        let map = ResourceGroupArgs::new()
            .with_name("rg-website")
            .with_tag("environment", "dev")
            .into_inputs()
            .into_output()
            .await_resolved()
            .await
            .unwrap();

        assert_eq!(map["resourceGroupName"], json!("rg-website"));
        assert_eq!(map["tags"], json!({ "environment": "dev" }));
        assert!(!map.contains_key("location"));
    }

    #[test]
    fn test_untagged_group_sends_no_tags() {
        let inputs = ResourceGroupArgs::new().into_inputs();
        assert!(inputs.get("tags").is_none());
        assert!(inputs.is_empty());
    }
}
