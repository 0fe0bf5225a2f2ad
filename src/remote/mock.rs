use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tracing::debug;

use super::{split_path, RemoteStore};
use crate::error::{PlannerError, Result};
use crate::models::{Menu, Recipe};
use crate::planner::constants::{MENU_PATH, RECIPES_PATH};
use crate::planner::demand::aggregate_demand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteMethod {
    Get,
    Put,
    Post,
    Delete,
}

/// In-memory stand-in for the REST backend.
///
/// Documents are JSON values keyed by resource name; collections are JSON
/// arrays whose elements are addressed by `id` (or by `name` when they have
/// no id). Posting a menu answers with its aggregated ingredient demand,
/// computed from the stored recipes, as the real service does.
///
/// Every call is logged, and paths can be made to fail on demand.
#[derive(Debug, Default)]
pub struct MockStore {
    documents: Mutex<HashMap<String, Value>>,
    calls: Mutex<Vec<(RemoteMethod, String)>>,
    failing: Mutex<HashSet<String>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let store = Self::new();
        store.documents.lock().extend(documents);
        store
    }

    /// Seed from a JSON object whose keys are resource names.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let documents: HashMap<String, Value> = serde_json::from_str(&content)?;
        Ok(Self::from_documents(documents))
    }

    pub fn with_document(self, resource: &str, document: Value) -> Self {
        self.set_document(resource, document);
        self
    }

    pub fn set_document(&self, resource: &str, document: Value) {
        self.documents.lock().insert(resource.to_string(), document);
    }

    pub fn document(&self, resource: &str) -> Option<Value> {
        self.documents.lock().get(resource).cloned()
    }

    /// Make every call on `path` (or on entities under it) fail with 503.
    pub fn fail_path(&self, path: &str) {
        self.failing.lock().insert(path.trim_matches('/').to_string());
    }

    pub fn heal_path(&self, path: &str) {
        self.failing.lock().remove(path.trim_matches('/'));
    }

    /// Number of calls made with `method` on exactly `path`.
    pub fn calls_to(&self, method: RemoteMethod, path: &str) -> usize {
        let path = path.trim_matches('/');
        self.calls
            .lock()
            .iter()
            .filter(|(m, p)| *m == method && p == path)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().len()
    }

    fn record(&self, method: RemoteMethod, path: &str) -> Result<()> {
        let path = path.trim_matches('/');
        debug!("mock {:?} {}", method, path);
        self.calls.lock().push((method, path.to_string()));

        let (resource, _) = split_path(path);
        let failing = self.failing.lock();
        if failing.contains(path) || failing.contains(resource) {
            return Err(PlannerError::Remote {
                path: path.to_string(),
                status: 503,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn read(&self, path: &str) -> Result<Value> {
        let (resource, id) = split_path(path);
        let documents = self.documents.lock();
        let document = documents.get(resource);

        let found = match id {
            None => document,
            Some(id) => document.and_then(|d| entity_position(d, id).map(|i| &d[i])),
        };
        found.cloned().ok_or_else(|| not_found(path))
    }

    fn replace(&self, path: &str, body: Value) -> Result<Value> {
        let (resource, id) = split_path(path);
        let mut documents = self.documents.lock();

        let Some(id) = id else {
            documents.insert(resource.to_string(), body);
            return Ok(Value::Null);
        };

        let collection = documents
            .entry(resource.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        let position = entity_position(collection, id);
        let Some(items) = collection.as_array_mut() else {
            return Err(conflict(path, "resource is not a collection"));
        };
        match position {
            Some(i) => items[i] = body,
            None => items.push(body),
        }
        Ok(Value::Null)
    }

    fn create(&self, path: &str, body: Value) -> Result<Value> {
        let (resource, _) = split_path(path);

        if resource == MENU_PATH {
            return self.submit_menu(body);
        }

        let mut documents = self.documents.lock();
        let collection = documents
            .entry(resource.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        let Some(items) = collection.as_array_mut() else {
            return Err(conflict(path, "resource is not a collection"));
        };

        let mut body = body;
        let id = match body.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => {
                let id = (items.len() + 1).to_string();
                if let Some(object) = body.as_object_mut() {
                    object.insert("id".to_string(), Value::String(id.clone()));
                }
                id
            }
        };
        items.push(body);
        Ok(json!({ "id": id }))
    }

    /// Store the menu and answer with its ingredient demand.
    fn submit_menu(&self, body: Value) -> Result<Value> {
        let menu: Menu = serde_json::from_value(body.clone())?;
        let recipes: Vec<Recipe> = match self.document(RECIPES_PATH) {
            Some(recipes) => serde_json::from_value(recipes)?,
            None => Vec::new(),
        };

        let demand = aggregate_demand(&menu, &recipes).map_err(|e| PlannerError::Remote {
            path: MENU_PATH.to_string(),
            status: 422,
            message: e.to_string(),
        })?;

        self.set_document(MENU_PATH, body);
        Ok(serde_json::to_value(demand)?)
    }

    fn remove(&self, path: &str) -> Result<()> {
        let (resource, id) = split_path(path);
        let mut documents = self.documents.lock();

        let Some(id) = id else {
            return documents
                .remove(resource)
                .map(|_| ())
                .ok_or_else(|| not_found(path));
        };

        let collection = documents.get_mut(resource).ok_or_else(|| not_found(path))?;
        let position = entity_position(collection, id).ok_or_else(|| not_found(path))?;
        if let Some(items) = collection.as_array_mut() {
            items.remove(position);
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for MockStore {
    async fn get(&self, path: &str) -> Result<Value> {
        self.record(RemoteMethod::Get, path)?;
        self.read(path)
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value> {
        self.record(RemoteMethod::Put, path)?;
        self.replace(path, body)
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.record(RemoteMethod::Post, path)?;
        self.create(path, body)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.record(RemoteMethod::Delete, path)?;
        self.remove(path)
    }
}

/// Index of the element matching `id` by its `id` field, else by `name`.
fn entity_position(collection: &Value, id: &str) -> Option<usize> {
    collection.as_array()?.iter().position(|item| {
        match item.get("id") {
            Some(Value::String(s)) => s == id,
            Some(Value::Number(n)) => n.to_string() == id,
            _ => item.get("name").and_then(Value::as_str) == Some(id),
        }
    })
}

fn not_found(path: &str) -> PlannerError {
    PlannerError::Remote {
        path: path.to_string(),
        status: 404,
        message: "not found".to_string(),
    }
}

fn conflict(path: &str, message: &str) -> PlannerError {
    PlannerError::Remote {
        path: path.to_string(),
        status: 409,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn store() -> MockStore {
        MockStore::new()
            .with_document(
                "products",
                json!([
                    {"id": "1", "name": "Carrot", "unitPriceInPack": 0.17, "batchSize": 1},
                    {"id": 2, "name": "Egg", "unitPriceInPack": 1.8, "batchSize": 6}
                ]),
            )
            .with_document(
                "recipes",
                json!([{"name": "Omelette", "ingredients": [{"name": "Egg", "amount": 2}]}]),
            )
    }

    #[tokio::test]
    async fn test_get_collection_and_entity() {
        let store = store();
        let all = store.get("products").await.unwrap();
        assert_eq!(all.as_array().unwrap().len(), 2);

        let egg = store.get("products/2").await.unwrap();
        assert_eq!(egg["name"], "Egg");

        let err = store.get("products/9").await.unwrap_err();
        assert!(matches!(err, PlannerError::Remote { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_put_entity_replaces_in_place() {
        let store = store();
        store
            .put("products/1", json!({"id": "1", "name": "Carrot", "unitPriceInPack": 0.2}))
            .await
            .unwrap();

        let carrot = store.get("products/1").await.unwrap();
        assert_eq!(carrot["unitPriceInPack"], 0.2);
        assert_eq!(store.get("products").await.unwrap().as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_post_menu_answers_with_demand() {
        let store = store();
        let demand = store
            .post("menu", json!({"entries": [{"day": "Monday", "dish": "Omelette", "amount": 3}]}))
            .await
            .unwrap();

        assert_eq!(demand, json!([{"name": "Egg", "amountNeeded": 6.0}]));
        assert!(store.document("menu").is_some());
    }

    #[tokio::test]
    async fn test_post_menu_with_unknown_dish_is_rejected() {
        let store = store();
        let err = store
            .post("menu", json!({"entries": [{"day": "Monday", "dish": "Paella", "amount": 1}]}))
            .await
            .unwrap_err();
        assert!(matches!(err, PlannerError::Remote { status: 422, .. }));
    }

    #[tokio::test]
    async fn test_post_to_collection_assigns_id() {
        let store = store();
        let answer = store.post("pantry", json!({"name": "Rice", "amountOnHand": 2})).await.unwrap();
        assert_eq!(answer, json!({"id": "1"}));
        assert_eq!(store.get("pantry/1").await.unwrap()["name"], "Rice");
    }

    #[tokio::test]
    async fn test_delete_entity() {
        let store = store();
        store.delete("products/1").await.unwrap();
        assert_eq!(store.get("products").await.unwrap().as_array().unwrap().len(), 1);

        let err = store.delete("products/1").await.unwrap_err();
        assert!(matches!(err, PlannerError::Remote { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_injected_failure_and_call_log() {
        let store = store();
        store.fail_path("products");

        assert!(store.get("products").await.is_err());
        assert!(store.get("products/1").await.is_err());
        assert_eq!(store.calls_to(RemoteMethod::Get, "products"), 1);

        store.heal_path("products");
        assert!(store.get("products").await.is_ok());
        assert_eq!(store.total_calls(), 3);
    }

    #[tokio::test]
    async fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"pantry": [{"name": "Milk", "amountOnHand": 1}]}"#)
            .unwrap();

        let store = MockStore::from_json_file(file.path()).unwrap();
        let pantry = store.get("pantry").await.unwrap();
        assert_eq!(pantry[0]["name"], "Milk");
    }
}
