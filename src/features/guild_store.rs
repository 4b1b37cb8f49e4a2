// Guild Config Store
// Per-guild greeting settings kept in memory and written through to a JSON file

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::models::guild::{FieldUpdate, GuildConfig, DEFAULT_SETTINGS};
use crate::utils::color::parse_hex_color;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access guild config file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize guild config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Guild config file {} is not valid JSON: {}", .path.display(), .source)]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Durable mapping from guild ID to [`GuildConfig`].
///
/// Every mutation rewrites the whole file before returning. The write lock is
/// held across read-modify-persist, so overlapping updates never lose a field
/// and memory never gets ahead of disk.
#[derive(Debug)]
pub struct GuildStore {
    path: PathBuf,
    guilds: RwLock<BTreeMap<String, GuildConfig>>,
}

impl GuildStore {
    /// Empty store backed by `path`. Nothing is read or written yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guilds: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load the store from `path`. A missing file is an empty store.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let guilds = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str::<BTreeMap<String, GuildConfig>>(&content)
                .map_err(|source| StoreError::Corrupt {
                    path: path.clone(),
                    source,
                })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No guild config at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        for (guild_id, config) in &guilds {
            for color in [&config.welcome_color, &config.goodbye_color] {
                if parse_hex_color(color).is_err() {
                    warn!("Guild {} has an unparsable stored color {:?}", guild_id, color);
                }
            }
        }

        info!("Loaded config for {} guild(s) from {}", guilds.len(), path.display());

        Ok(Self {
            path,
            guilds: RwLock::new(guilds),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of guilds with a stored config
    pub async fn len(&self) -> usize {
        self.guilds.read().await.len()
    }

    /// Snapshot of a guild's config without creating one
    pub async fn get(&self, guild_id: u64) -> Option<GuildConfig> {
        self.guilds.read().await.get(&guild_id.to_string()).cloned()
    }

    /// Return the guild's config, creating and persisting the defaults on first contact.
    pub async fn get_or_create(&self, guild_id: u64) -> Result<GuildConfig, StoreError> {
        if let Some(config) = self.get(guild_id).await {
            return Ok(config);
        }

        let mut guilds = self.guilds.write().await;
        let key = guild_id.to_string();

        // Someone else may have created it while we waited for the lock
        if let Some(config) = guilds.get(&key) {
            return Ok(config.clone());
        }

        guilds.insert(key.clone(), DEFAULT_SETTINGS.clone());
        if let Err(e) = self.write_file(&guilds).await {
            guilds.remove(&key);
            error!("Failed to persist default config for guild {}: {}", guild_id, e);
            return Err(e);
        }

        info!("Initialized default config for guild {}", guild_id);
        Ok(DEFAULT_SETTINGS.clone())
    }

    /// Apply a field update and persist. On failure the guild's record is
    /// restored to what it was before the call.
    pub async fn update(
        &self,
        guild_id: u64,
        update: FieldUpdate,
    ) -> Result<GuildConfig, StoreError> {
        let mut guilds = self.guilds.write().await;
        let key = guild_id.to_string();
        let field = update.field_name();

        let previous = guilds.get(&key).cloned();
        let config = guilds
            .entry(key.clone())
            .or_insert_with(|| DEFAULT_SETTINGS.clone());
        update.apply(config);
        let updated = config.clone();

        if let Err(e) = self.write_file(&guilds).await {
            match previous {
                Some(old) => {
                    guilds.insert(key, old);
                }
                None => {
                    guilds.remove(&key);
                }
            }
            error!("Failed to persist {} for guild {}: {}", field, guild_id, e);
            return Err(e);
        }

        info!("Updated {} for guild {}", field, guild_id);
        Ok(updated)
    }

    /// Rewrite the backing file from the in-memory state
    pub async fn persist(&self) -> Result<(), StoreError> {
        let guilds = self.guilds.write().await;
        self.write_file(&guilds).await
    }

    async fn write_file(&self, guilds: &BTreeMap<String, GuildConfig>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(guilds)?;

        // Write beside the target and rename over it so readers never see a partial file
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, json)
            .await
            .map_err(|source| StoreError::Io {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;

        debug!("Saved {} guild config(s) to {}", guilds.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, GuildStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = GuildStore::new(dir.path().join("config.json"));
        (dir, store)
    }

    #[tokio::test]
    async fn test_get_or_create_defaults_and_persists() {
        let (_dir, store) = temp_store();
        assert!(store.get(1).await.is_none());

        let first = store.get_or_create(1).await.unwrap();
        assert_eq!(first, *DEFAULT_SETTINGS);
        let second = store.get_or_create(1).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(store.len().await, 1);

        let reloaded = GuildStore::load(store.path()).await.unwrap();
        assert_eq!(reloaded.get(1).await, Some(DEFAULT_SETTINGS.clone()));
    }

    #[tokio::test]
    async fn test_update_creates_record_and_round_trips_color() {
        let (_dir, store) = temp_store();

        store
            .update(9, FieldUpdate::WelcomeColor("1a2b3c".into()))
            .await
            .unwrap();

        let config = store.get_or_create(9).await.unwrap();
        assert_eq!(config.welcome_color, "1a2b3c");
        assert_eq!(parse_hex_color(&config.welcome_color), Ok(0x1a2b3c));
        assert_eq!(config.goodbye_color, DEFAULT_SETTINGS.goodbye_color);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = GuildStore::load(dir.path().join("nope.json")).await.unwrap();
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_load_corrupt_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = GuildStore::load(&path).await;
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }

    #[tokio::test]
    async fn test_load_reads_existing_file_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r##"{
    "123": {
        "welcome_channel_id": 555,
        "goodbye_channel_id": null,
        "welcome_message": "Hey {mention}",
        "goodbye_message": "Bye {name}",
        "welcome_image_url": "https://img/w.png",
        "goodbye_image_url": "https://img/g.png",
        "welcome_color": "#abcdef",
        "goodbye_color": "FF0000"
    }
}"##,
        )
        .unwrap();

        let store = GuildStore::load(&path).await.unwrap();
        let config = store.get(123).await.unwrap();
        assert_eq!(config.welcome_channel_id, Some(555));
        assert_eq!(config.goodbye_channel_id, None);
        assert_eq!(config.welcome_message, "Hey {mention}");
    }

    #[tokio::test]
    async fn test_concurrent_updates_keep_both_fields() {
        let (_dir, store) = temp_store();
        let store = Arc::new(store);

        let a = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .update(5, FieldUpdate::WelcomeMessage("Hi {mention}".into()))
                    .await
            })
        };
        let b = {
            let store = store.clone();
            tokio::spawn(async move { store.update(5, FieldUpdate::GoodbyeChannel(77)).await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let reloaded = GuildStore::load(store.path()).await.unwrap();
        let config = reloaded.get(5).await.unwrap();
        assert_eq!(config.welcome_message, "Hi {mention}");
        assert_eq!(config.goodbye_channel_id, Some(77));
    }

    #[tokio::test]
    async fn test_restart_preserves_every_field() {
        let (_dir, store) = temp_store();

        store.update(1, FieldUpdate::WelcomeChannel(10)).await.unwrap();
        store.update(1, FieldUpdate::GoodbyeChannel(11)).await.unwrap();
        store.update(1, FieldUpdate::WelcomeMessage("W {mention}".into())).await.unwrap();
        store.update(1, FieldUpdate::GoodbyeMessage("G {name}".into())).await.unwrap();
        store.update(1, FieldUpdate::WelcomeImage("https://a/w.png".into())).await.unwrap();
        store.update(1, FieldUpdate::GoodbyeImage("https://a/g.png".into())).await.unwrap();
        store.update(1, FieldUpdate::WelcomeColor("123456".into())).await.unwrap();
        store.update(1, FieldUpdate::GoodbyeColor("abcdef".into())).await.unwrap();
        store.get_or_create(2).await.unwrap();

        let reloaded = GuildStore::load(store.path()).await.unwrap();
        assert_eq!(reloaded.len().await, 2);
        assert_eq!(reloaded.get(1).await, store.get(1).await);
        assert_eq!(reloaded.get(2).await, Some(DEFAULT_SETTINGS.clone()));
    }

    #[tokio::test]
    async fn test_failed_write_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        std::fs::create_dir(&data_dir).unwrap();
        let store = GuildStore::new(data_dir.join("config.json"));

        store.update(3, FieldUpdate::WelcomeColor("00ff00".into())).await.unwrap();

        // Pull the directory out from under the store so the next write fails
        std::fs::remove_dir_all(&data_dir).unwrap();

        let result = store.update(3, FieldUpdate::WelcomeColor("123456".into())).await;
        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert_eq!(store.get(3).await.unwrap().welcome_color, "00ff00");

        let result = store.update(4, FieldUpdate::GoodbyeChannel(1)).await;
        assert!(result.is_err());
        assert!(store.get(4).await.is_none());

        assert!(store.get_or_create(8).await.is_err());
        assert!(store.get(8).await.is_none());
    }
}
