//! Static website hosting on a storage account

use crate::tokens;
use skyweave_deploy::{
    CustomResource, DeploymentContext, Input, Inputs, ResourceOptions, Result,
};
use skyweave_engine::Value;
use skyweave_output::Output;

/// Container the provider serves static website content from
pub const WEB_CONTAINER: &str = "$web";

#[derive(Debug, Clone)]
pub struct StorageAccountStaticWebsiteArgs {
    pub account_name: Input,
    pub resource_group_name: Input,
    pub index_document: Option<Input>,
    pub error404_document: Option<Input>,
}

impl StorageAccountStaticWebsiteArgs {
    pub fn new(account_name: impl Into<Input>, resource_group_name: impl Into<Input>) -> Self {
        Self {
            account_name: account_name.into(),
            resource_group_name: resource_group_name.into(),
            index_document: None,
            error404_document: None,
        }
    }

    pub fn with_index_document(mut self, document: impl Into<Input>) -> Self {
        self.index_document = Some(document.into());
        self
    }

    pub fn with_error404_document(mut self, document: impl Into<Input>) -> Self {
        self.error404_document = Some(document.into());
        self
    }

    fn into_inputs(self) -> Inputs {
        Inputs::new()
            .set("accountName", self.account_name)
            .set("resourceGroupName", self.resource_group_name)
            .set_opt("indexDocument", self.index_document)
            .set_opt("error404Document", self.error404_document)
    }
}

/// Enables static website hosting on an existing storage account
#[derive(Debug, Clone)]
pub struct StorageAccountStaticWebsite {
    resource: CustomResource,
}

impl StorageAccountStaticWebsite {
    pub fn new(
        ctx: &DeploymentContext,
        name: &str,
        args: StorageAccountStaticWebsiteArgs,
    ) -> Result<Self> {
        Self::with_options(ctx, name, args, ResourceOptions::new())
    }

    pub fn with_options(
        ctx: &DeploymentContext,
        name: &str,
        args: StorageAccountStaticWebsiteArgs,
        options: ResourceOptions,
    ) -> Result<Self> {
        let resource = ctx.register_resource(
            tokens::STORAGE_ACCOUNT_STATIC_WEBSITE,
            name,
            args.into_inputs(),
            options,
        )?;
        Ok(Self { resource })
    }

    pub fn resource(&self) -> &CustomResource {
        &self.resource
    }

    pub fn id(&self) -> &Output<String> {
        self.resource.id()
    }

    /// Container holding the site's files, [`WEB_CONTAINER`] unless the
    /// provider reports another
    pub fn container_name(&self) -> Output<String> {
        self.resource.output("containerName").apply(|name| {
            name.as_ref()
                .and_then(Value::as_str)
                .unwrap_or(WEB_CONTAINER)
                .to_string()
        })
    }

    pub fn index_document(&self) -> Output<Option<String>> {
        self.resource
            .output("indexDocument")
            .apply(|doc| doc.as_ref().and_then(Value::as_str).map(str::to_string))
    }
}
