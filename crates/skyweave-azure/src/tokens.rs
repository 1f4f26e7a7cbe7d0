//! Azure Native type and function tokens

pub use skyweave_engine::tokens::{BLOB, LIST_STORAGE_ACCOUNT_KEYS, STORAGE_ACCOUNT};

pub const RESOURCE_GROUP: &str = "azure-native:resources:ResourceGroup";
pub const STORAGE_ACCOUNT_STATIC_WEBSITE: &str =
    "azure-native:storage:StorageAccountStaticWebsite";
