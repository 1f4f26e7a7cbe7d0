//! Website configuration

use skyweave_config::{Result, StackConfig};

pub const ENVIRONMENT_KEY: &str = "environment";
pub const RESOURCE_GROUP_NAME_KEY: &str = "resource-group-name";
pub const STORAGE_ACCOUNT_NAME_KEY: &str = "storage-account-name";

/// Values the website stack reads from its stack configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsiteConfig {
    /// Deployment environment, applied as the `environment` tag
    pub environment: String,
    pub resource_group_name: String,
    pub storage_account_name: String,
}

impl WebsiteConfig {
    /// Read every required key, failing on the first missing one
    pub fn load(config: &StackConfig) -> Result<Self> {
        Ok(Self {
            environment: config.require(ENVIRONMENT_KEY)?,
            resource_group_name: config.require(RESOURCE_GROUP_NAME_KEY)?,
            storage_account_name: config.require(STORAGE_ACCOUNT_NAME_KEY)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyweave_config::ConfigError;

    #[test]
    fn test_load_reads_namespaced_and_bare_keys() {
        let config = StackConfig::new("website")
            .with("website:environment", "prod")
            .with("resource-group-name", "rg-prod")
            .with("storage-account-name", "saprod");

        let website = WebsiteConfig::load(&config).unwrap();
        assert_eq!(website.environment, "prod");
        assert_eq!(website.resource_group_name, "rg-prod");
        assert_eq!(website.storage_account_name, "saprod");
    }

    #[test]
    fn test_load_names_the_missing_key() {
        let config = StackConfig::new("website").with("environment", "dev");

        match WebsiteConfig::load(&config) {
            Err(ConfigError::MissingRequired { project, key }) => {
                assert_eq!(project, "website");
                assert_eq!(key, RESOURCE_GROUP_NAME_KEY);
            }
            other => panic!("expected missing key, got {:?}", other),
        }
    }
}
