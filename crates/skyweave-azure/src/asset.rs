//! File assets
//!
//! An asset travels to the engine as an object tagged with the asset
//! signature, so providers can tell it apart from an ordinary map.

use serde_json::Value;
use skyweave_deploy::Input;
use skyweave_engine::PropertyMap;
use std::path::{Path, PathBuf};

/// Key marking a value as one of the engine's special objects
pub const SIGNATURE_KEY: &str = "4dabf18193072939515e22adb298388d";

/// Signature of an asset
pub const ASSET_SIGNATURE: &str = "c44067f5952c0a294b673a41bacd8c17";

/// A local file uploaded as the content of a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAsset {
    path: PathBuf,
}

impl FileAsset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn to_value(&self) -> Value {
        let mut object = PropertyMap::new();
        object.insert(
            SIGNATURE_KEY.to_string(),
            Value::String(ASSET_SIGNATURE.to_string()),
        );
        object.insert(
            "path".to_string(),
            Value::String(self.path.to_string_lossy().into_owned()),
        );
        Value::Object(object)
    }

    /// Whether `value` is a serialized asset
    pub fn is_asset(value: &Value) -> bool {
        value
            .get(SIGNATURE_KEY)
            .and_then(Value::as_str)
            .is_some_and(|sig| sig == ASSET_SIGNATURE)
    }
}

impl From<FileAsset> for Input {
    fn from(asset: FileAsset) -> Self {
        Input::Plain(asset.to_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_asset_serializes_with_signature() {
        let value = FileAsset::new("site/index.html").to_value();
        assert!(FileAsset::is_asset(&value));
        assert_eq!(value["path"], json!("site/index.html"));
    }

    #[test]
    fn test_plain_maps_are_not_assets() {
        assert!(!FileAsset::is_asset(&json!({ "path": "index.html" })));
        assert!(!FileAsset::is_asset(&json!("index.html")));
    }
}
