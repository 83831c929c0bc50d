use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::warn;

use super::{CredentialRecord, CredentialStore};
use crate::Result;

const CREDENTIALS_FILE: &str = "credentials.json";

/// A default credential store implementation that persists the record as a
/// JSON file in the given directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a `JsonStore` inside the given directory, creating the
    /// directory if it doesn't exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        std::fs::create_dir_all(&path)?;

        Ok(Self { path })
    }

    fn credentials_path(&self) -> PathBuf {
        self.path.join(CREDENTIALS_FILE)
    }
}

#[async_trait]
impl CredentialStore for JsonStore {
    async fn load(&self) -> Result<Option<CredentialRecord>> {
        let path = self.credentials_path();

        if !path.exists() {
            return Ok(None);
        }

        let mut file = fs::File::open(&path).await?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).await?;

        match serde_json::from_str(&contents) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                // A record that can't be parsed is treated the same as a
                // missing one so a corrupted file can't wedge the client.
                warn!("Removing unreadable credential record: {}", e);
                self.clear().await?;
                Ok(None)
            }
        }
    }

    async fn save(&self, record: &CredentialRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.credentials_path())
            .await?;

        file.write_all(json.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let path = self.credentials_path();

        if path.exists() {
            fs::remove_file(&path).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use tempfile::tempdir;
    use tokio::io::AsyncWriteExt;

    use super::{JsonStore, CREDENTIALS_FILE};
    use crate::{
        session::User,
        store::{CredentialRecord, CredentialStore},
    };

    fn record() -> CredentialRecord {
        CredentialRecord {
            token: "1234".to_owned(),
            user: User {
                id: 1,
                name: "Example User".to_owned(),
                email: "example@localhost".to_owned(),
                role: Some("client".to_owned()),
            },
        }
    }

    #[tokio::test]
    async fn save_and_load() {
        let dir = tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();

        assert!(store.load().await.unwrap().is_none());

        store.save(&record()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(record()));
    }

    #[tokio::test]
    async fn save_replaces_previous_record() {
        let dir = tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();

        store.save(&record()).await.unwrap();

        let mut updated = record();
        updated.token = "4321".to_owned();
        store.save(&updated).await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn clear_removes_record() {
        let dir = tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();

        store.save(&record()).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());

        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn corrupted_record_is_cleared() {
        let dir = tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();

        let mut file = tokio::fs::File::create(dir.path().join(CREDENTIALS_FILE))
            .await
            .unwrap();
        file.write_all(b"{\"token\": \"1234\"").await.unwrap();
        file.flush().await.unwrap();

        assert!(store.load().await.unwrap().is_none());
        assert!(!dir.path().join(CREDENTIALS_FILE).exists());
    }
}
