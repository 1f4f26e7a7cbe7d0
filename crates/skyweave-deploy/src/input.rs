//! Resource inputs: plain values or outputs of other declarations

use serde::Serialize;
use skyweave_engine::{PropertyMap, Value};
use skyweave_output::Output;

/// A single input property
#[derive(Debug, Clone)]
pub enum Input {
    /// Known at declaration time
    Plain(Value),
    /// Known once another declaration resolves
    Deferred(Output<Value>),
}

impl Input {
    /// Serialize any value into a plain input
    pub fn value(value: impl Serialize) -> serde_json::Result<Self> {
        Ok(Self::Plain(serde_json::to_value(value)?))
    }

    /// Wrap a typed output, serializing it once it resolves
    pub fn output<T>(output: &Output<T>) -> Self
    where
        T: Serialize + Clone + Send + Sync + 'static,
    {
        Self::Deferred(output.try_apply(serde_json::to_value))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    pub(crate) fn into_output(self) -> Output<Value> {
        match self {
            Self::Plain(value) => Output::new(value),
            Self::Deferred(output) => output,
        }
    }
}

impl From<Value> for Input {
    fn from(value: Value) -> Self {
        Self::Plain(value)
    }
}

impl From<&str> for Input {
    fn from(value: &str) -> Self {
        Self::Plain(Value::String(value.to_string()))
    }
}

impl From<String> for Input {
    fn from(value: String) -> Self {
        Self::Plain(Value::String(value))
    }
}

impl From<bool> for Input {
    fn from(value: bool) -> Self {
        Self::Plain(Value::Bool(value))
    }
}

impl From<i64> for Input {
    fn from(value: i64) -> Self {
        Self::Plain(Value::from(value))
    }
}

impl<T> From<Output<T>> for Input
where
    T: Serialize + Clone + Send + Sync + 'static,
{
    fn from(output: Output<T>) -> Self {
        Self::output(&output)
    }
}

impl<T> From<&Output<T>> for Input
where
    T: Serialize + Clone + Send + Sync + 'static,
{
    fn from(output: &Output<T>) -> Self {
        Self::output(output)
    }
}

/// Ordered set of named inputs
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    entries: Vec<(String, Input)>,
}

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing an earlier value under the same key
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Input>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a property only when a value is present
    pub fn set_opt<V: Into<Input>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Input>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Input> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Combine all inputs into one output of the property map
    ///
    /// Secret if any deferred input is secret.
    pub fn into_output(self) -> Output<PropertyMap> {
        let (keys, values): (Vec<String>, Vec<Output<Value>>) = self
            .entries
            .into_iter()
            .map(|(key, input)| (key, input.into_output()))
            .unzip();

        Output::all(values).apply(move |values| keys.into_iter().zip(values).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_inputs_wait_for_deferred_values() {
        let (name, resolver) = Output::<String>::pending();
        let inputs = Inputs::new()
            .set("location", "westeurope")
            .set("resourceGroupName", &name)
            .set("enableHttpsTrafficOnly", true)
            .set_opt("accessTier", None::<&str>);
        assert_eq!(inputs.len(), 3);
        assert!(inputs.get("resourceGroupName").unwrap().is_deferred());

        let combined = inputs.into_output();
        assert!(!combined.is_resolved());

        resolver.resolve("rg".to_string());
        let map = combined.await_resolved().await.unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["location"], json!("westeurope"));
        assert_eq!(map["resourceGroupName"], json!("rg"));
        assert_eq!(map["enableHttpsTrafficOnly"], json!(true));
        assert!(!map.contains_key("accessTier"));
    }

    #[tokio::test]
    async fn test_set_replaces_existing_key() {
        let map = Inputs::new()
            .set("kind", "Storage")
            .set("kind", "StorageV2")
            .into_output()
            .await_resolved()
            .await
            .unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["kind"], json!("StorageV2"));
    }

    #[test]
    fn test_secret_input_makes_map_secret() {
        let inputs = Inputs::new().set("key", Output::secret("s3cr3t".to_string()));
        assert!(inputs.into_output().is_secret());
    }

    #[test]
    fn test_value_serializes_structs() {
        #[derive(Serialize)]
        struct Sku {
            name: &'static str,
        }
        let input = Input::value(Sku { name: "Standard_LRS" }).unwrap();
        assert!(matches!(input, Input::Plain(v) if v == json!({ "name": "Standard_LRS" })));
    }
}
