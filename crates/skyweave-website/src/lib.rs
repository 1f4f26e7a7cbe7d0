//! Static website on Azure Storage
//!
//! Declares a resource group, a StorageV2 account with static website
//! hosting enabled, and uploads `index.html` into the website container.
//!
//! Required configuration:
//!
//! | key | use |
//! |---|---|
//! | `environment` | `environment` tag on the group and the account |
//! | `resource-group-name` | Azure name of the resource group |
//! | `storage-account-name` | Azure name of the storage account |

pub mod config;
pub mod stack;

pub use config::WebsiteConfig;
pub use stack::StaticWebsiteStack;
