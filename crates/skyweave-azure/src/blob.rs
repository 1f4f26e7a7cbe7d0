//! Blobs uploaded into a storage container

use crate::asset::FileAsset;
use crate::tokens;
use skyweave_deploy::{
    CustomResource, DeploymentContext, Input, Inputs, ResourceOptions, Result,
};
use skyweave_engine::Value;
use skyweave_output::Output;

#[derive(Debug, Clone)]
pub struct BlobArgs {
    pub resource_group_name: Input,
    pub account_name: Input,
    pub container_name: Input,
    /// Name within the container
    pub blob_name: Option<Input>,
    pub source: Option<FileAsset>,
    pub content_type: Option<Input>,
}

impl BlobArgs {
    pub fn new(
        resource_group_name: impl Into<Input>,
        account_name: impl Into<Input>,
        container_name: impl Into<Input>,
    ) -> Self {
        Self {
            resource_group_name: resource_group_name.into(),
            account_name: account_name.into(),
            container_name: container_name.into(),
            blob_name: None,
            source: None,
            content_type: None,
        }
    }

    pub fn with_blob_name(mut self, name: impl Into<Input>) -> Self {
        self.blob_name = Some(name.into());
        self
    }

    pub fn with_source(mut self, source: FileAsset) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<Input>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    fn into_inputs(self) -> Inputs {
        Inputs::new()
            .set("resourceGroupName", self.resource_group_name)
            .set("accountName", self.account_name)
            .set("containerName", self.container_name)
            .set_opt("blobName", self.blob_name)
            .set_opt("source", self.source)
            .set_opt("contentType", self.content_type)
    }
}

/// A blob
#[derive(Debug, Clone)]
pub struct Blob {
    resource: CustomResource,
}

impl Blob {
    pub fn new(ctx: &DeploymentContext, name: &str, args: BlobArgs) -> Result<Self> {
        Self::with_options(ctx, name, args, ResourceOptions::new())
    }

    pub fn with_options(
        ctx: &DeploymentContext,
        name: &str,
        args: BlobArgs,
        options: ResourceOptions,
    ) -> Result<Self> {
        let resource = ctx.register_resource(tokens::BLOB, name, args.into_inputs(), options)?;
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

    pub fn content_type(&self) -> Output<Option<String>> {
        self.resource
            .output("contentType")
            .apply(|value| value.as_ref().and_then(Value::as_str).map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_is_sent_as_asset() {
        let inputs = BlobArgs::new("rg", "sa", "$web")
            .with_source(FileAsset::new("index.html"))
            .with_content_type("text/html")
            .into_inputs();

        match inputs.get("source") {
            Some(Input::Plain(value)) => assert!(FileAsset::is_asset(value)),
            other => panic!("unexpected source input: {:?}", other),
        }
        assert!(inputs.get("blobName").is_none());
    }
}
