use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use models::{item, AttributeUpdate, Item};
use tokio::{fs, sync::RwLock};
use tracing::debug;

use super::{ItemStore, PutCondition, StoreError};

/// JSON file-backed item store.
///
/// Keeps every item in a `HashMap<i64, Item>` and rewrites the file (DynamoDB JSON
/// per item) after each mutation. Mutations and the file write happen under the
/// same write lock, so a conditional put cannot race with another writer. A failed
/// write rolls the in-memory change back, so memory never runs ahead of the file.
pub struct LocalItemStore {
    inner: RwLock<HashMap<i64, Item>>,
    file_path: Option<PathBuf>,
    table_name: String,
}

impl LocalItemStore {
    /// Open the store at `path`, creating the file with an empty map if missing.
    pub async fn open<P: Into<PathBuf>>(path: P, table_name: impl Into<String>) -> Result<Self, StoreError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| StoreError::Unavailable(e.to_string()))?;
        }

        let map: HashMap<i64, Item> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                StoreError::Malformed(format!("{}: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: HashMap<i64, Item> = HashMap::new();
                write_file(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(StoreError::Unavailable(e.to_string())),
        };
        debug!(path = %file_path.display(), items = map.len(), "local item store opened");

        Ok(Self { inner: RwLock::new(map), file_path: Some(file_path), table_name: table_name.into() })
    }

    /// Store without persistence.
    pub fn in_memory(table_name: impl Into<String>) -> Self {
        Self { inner: RwLock::new(HashMap::new()), file_path: None, table_name: table_name.into() }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    async fn save(&self, map: &HashMap<i64, Item>) -> Result<(), StoreError> {
        match &self.file_path {
            Some(path) => write_file(path, map).await,
            None => Ok(()),
        }
    }
}

async fn write_file(path: &Path, map: &HashMap<i64, Item>) -> Result<(), StoreError> {
    let data = serde_json::to_vec(map).map_err(|e| StoreError::Malformed(e.to_string()))?;
    fs::write(path, data).await.map_err(|e| StoreError::Unavailable(e.to_string()))
}

/// Put back the entry a failed write replaced; `None` means the key was absent.
fn restore(map: &mut HashMap<i64, Item>, id: i64, previous: Option<Item>) {
    match previous {
        Some(item) => map.insert(id, item),
        None => map.remove(&id),
    };
}

#[async_trait]
impl ItemStore for LocalItemStore {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn put_item(&self, item: Item, condition: PutCondition) -> Result<(), StoreError> {
        let id = item::key_of(&item).map_err(|e| StoreError::Malformed(e.to_string()))?;
        let mut map = self.inner.write().await;
        if condition == PutCondition::KeyAbsent && map.contains_key(&id) {
            return Err(StoreError::ConditionalCheckFailed);
        }
        let previous = map.insert(id, item);
        if let Err(e) = self.save(&map).await {
            restore(&mut map, id, previous);
            return Err(e);
        }
        Ok(())
    }

    async fn get_item(&self, id: i64) -> Result<Option<Item>, StoreError> {
        let map = self.inner.read().await;
        Ok(map.get(&id).cloned())
    }

    async fn update_item(&self, id: i64, updates: Vec<AttributeUpdate>) -> Result<Item, StoreError> {
        if updates.iter().any(|u| u.name == item::KEY_ATTRIBUTE) {
            return Err(StoreError::Malformed("cannot update the key attribute".into()));
        }
        let mut map = self.inner.write().await;
        let previous = map.get(&id).cloned();
        let entry = map.entry(id).or_insert_with(|| {
            let mut key = Item::new();
            key.insert(item::KEY_ATTRIBUTE.to_string(), models::AttrValue::number(id));
            key
        });
        for update in updates {
            entry.insert(update.name, update.value);
        }
        let updated = entry.clone();
        if let Err(e) = self.save(&map).await {
            restore(&mut map, id, previous);
            return Err(e);
        }
        Ok(updated)
    }

    async fn delete_item(&self, id: i64) -> Result<(), StoreError> {
        let mut map = self.inner.write().await;
        let Some(previous) = map.remove(&id) else {
            return Ok(());
        };
        if let Err(e) = self.save(&map).await {
            map.insert(id, previous);
            return Err(e);
        }
        Ok(())
    }
}
