//! Registered resources and the set a run materializes

use serde::de::DeserializeOwned;
use skyweave_engine::{PropertyMap, Value};
use skyweave_output::Output;

/// Engine-level unique name of a resource
pub fn urn(stack: &str, project: &str, type_token: &str, logical_name: &str) -> String {
    format!(
        "urn:pulumi:{}::{}::{}::{}",
        stack, project, type_token, logical_name
    )
}

/// Per-declaration options
#[derive(Debug, Clone, Default)]
pub struct ResourceOptions {
    /// Identifier to hand to the engine instead of letting it assign one
    pub id: Option<String>,

    /// Resources whose ids must be known before this one is submitted
    pub depends_on: Vec<CustomResource>,
}

impl ResourceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn depends_on(mut self, resource: &CustomResource) -> Self {
        self.depends_on.push(resource.clone());
        self
    }
}

/// Handle to a declared resource
///
/// `id` and `outputs` settle once the engine has answered the
/// registration.
#[derive(Debug, Clone)]
pub struct CustomResource {
    type_token: String,
    logical_name: String,
    urn: String,
    id: Output<String>,
    outputs: Output<PropertyMap>,
}

impl CustomResource {
    pub(crate) fn new(
        type_token: String,
        logical_name: String,
        urn: String,
        id: Output<String>,
        outputs: Output<PropertyMap>,
    ) -> Self {
        Self {
            type_token,
            logical_name,
            urn,
            id,
            outputs,
        }
    }

    pub fn type_token(&self) -> &str {
        &self.type_token
    }

    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }

    pub fn urn(&self) -> &str {
        &self.urn
    }

    pub fn id(&self) -> &Output<String> {
        &self.id
    }

    pub fn outputs(&self) -> &Output<PropertyMap> {
        &self.outputs
    }

    /// A single output property, `None` when the engine did not report it
    pub fn output(&self, key: &str) -> Output<Option<Value>> {
        let key = key.to_string();
        self.outputs.apply(move |outputs| outputs.get(&key).cloned())
    }

    /// A single output property that must be present
    pub fn require_output(&self, key: &str) -> Output<Value> {
        let key = key.to_string();
        let urn = self.urn.clone();
        self.outputs.try_apply(move |outputs| {
            outputs
                .get(&key)
                .cloned()
                .ok_or_else(|| format!("{} has no output property '{}'", urn, key))
        })
    }

    /// A single output property deserialized into `T`
    pub fn output_as<T>(&self, key: &str) -> Output<T>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let key = key.to_string();
        self.require_output(&key).try_apply(move |value| {
            serde_json::from_value::<T>(value)
                .map_err(|e| format!("output property '{}' has unexpected shape: {}", key, e))
        })
    }
}

/// A resource the engine has answered for
#[derive(Debug, Clone)]
pub struct MaterializedResource {
    resource: CustomResource,
    id: String,
}

impl MaterializedResource {
    pub(crate) fn new(resource: CustomResource, id: String) -> Self {
        Self { resource, id }
    }

    pub fn type_token(&self) -> &str {
        self.resource.type_token()
    }

    pub fn logical_name(&self) -> &str {
        self.resource.logical_name()
    }

    pub fn urn(&self) -> &str {
        self.resource.urn()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn outputs(&self) -> &Output<PropertyMap> {
        self.resource.outputs()
    }

    pub fn output(&self, key: &str) -> Output<Option<Value>> {
        self.resource.output(key)
    }

    pub fn require_output(&self, key: &str) -> Output<Value> {
        self.resource.require_output(key)
    }

    pub fn output_as<T>(&self, key: &str) -> Output<T>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        self.resource.output_as(key)
    }

    pub fn resource(&self) -> &CustomResource {
        &self.resource
    }
}

/// Flat set of resources materialized by one run, in submission order
#[derive(Debug, Clone, Default)]
pub struct Resources {
    items: Vec<MaterializedResource>,
}

impl Resources {
    pub(crate) fn new(items: Vec<MaterializedResource>) -> Self {
        Self { items }
    }

    pub fn of_type(&self, type_token: &str) -> Vec<&MaterializedResource> {
        self.items
            .iter()
            .filter(|r| r.type_token() == type_token)
            .collect()
    }

    /// The only resource of a type; `None` when there are zero or several
    pub fn single_of_type(&self, type_token: &str) -> Option<&MaterializedResource> {
        match self.of_type(type_token).as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    pub fn by_name(&self, logical_name: &str) -> Option<&MaterializedResource> {
        self.items.iter().find(|r| r.logical_name() == logical_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterializedResource> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for Resources {
    type Item = MaterializedResource;
    type IntoIter = std::vec::IntoIter<MaterializedResource>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Resources {
    type Item = &'a MaterializedResource;
    type IntoIter = std::slice::Iter<'a, MaterializedResource>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(type_token: &str, name: &str, outputs: Value) -> MaterializedResource {
        let Value::Object(outputs) = outputs else {
            panic!("outputs must be an object");
        };
        let custom = CustomResource::new(
            type_token.to_string(),
            name.to_string(),
            urn("dev", "website", type_token, name),
            Output::new(format!("{}_id", name)),
            Output::new(outputs),
        );
        MaterializedResource::new(custom, format!("{}_id", name))
    }

    #[test]
    fn test_urn_format() {
        assert_eq!(
            urn("dev", "website", "azure-native:storage:Blob", "index.html"),
            "urn:pulumi:dev::website::azure-native:storage:Blob::index.html"
        );
    }

    #[test]
    fn test_query_by_type_and_name() {
        let resources = Resources::new(vec![
            resource("t:a:A", "one", json!({})),
            resource("t:b:B", "two", json!({})),
            resource("t:b:B", "three", json!({})),
        ]);

        assert_eq!(resources.len(), 3);
        assert!(resources.single_of_type("t:a:A").is_some());
        assert!(resources.single_of_type("t:b:B").is_none());
        assert!(resources.single_of_type("t:c:C").is_none());
        assert_eq!(resources.by_name("three").unwrap().id(), "three_id");
    }

    #[tokio::test]
    async fn test_output_accessors() {
        let r = resource("t:a:A", "one", json!({ "name": "one", "count": 2 }));

        assert_eq!(r.output("name").await_resolved().await.unwrap(), Some(json!("one")));
        assert_eq!(r.output("missing").await_resolved().await.unwrap(), None);
        assert_eq!(r.output_as::<u32>("count").await_resolved().await.unwrap(), 2);

        let err = r.require_output("missing").await_resolved().await.unwrap_err();
        assert!(err.to_string().contains("no output property 'missing'"));

        let err = r.output_as::<Vec<String>>("count").await_resolved().await.unwrap_err();
        assert!(err.to_string().contains("unexpected shape"));
    }
}
