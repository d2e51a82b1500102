use crate::adapters::table::CustomerTable;
use crate::domain::model::{Customer, CustomerId};
use crate::domain::ports::CustomerRepository;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Customer store kept as one JSON document on disk.
///
/// Operations are serialized within one process and every operation re-reads
/// the file, so stale updates from this process fail the version check in
/// `CustomerTable`. There is no cross-process lock: two processes writing at
/// the same moment can still lose one of the writes.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<CustomerTable> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(CustomerTable::new()),
            Ok(bytes) => {
                let table: CustomerTable = serde_json::from_slice(&bytes)?;
                table.check_unique_ids()?;
                Ok(table)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No data file at {}, starting empty", self.path.display());
                Ok(CustomerTable::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, table: &CustomerTable) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let data = serde_json::to_vec_pretty(table)?;
        let tmp = self
            .path
            .with_extension(format!("json.{}.tmp", std::process::id()));
        tokio::fs::write(&tmp, &data).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(
            "Wrote {} customers ({} bytes) to {}",
            table.len(),
            data.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[async_trait]
impl CustomerRepository for JsonFileRepository {
    async fn get_all(&self) -> Result<Vec<Customer>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.all().to_vec())
    }

    async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.get(id).cloned())
    }

    async fn add(&self, customer: Customer) -> Result<CustomerId> {
        let _guard = self.lock.lock().await;
        let mut table = self.load().await?;
        let id = table.add(customer)?;
        self.save(&table).await?;
        Ok(id)
    }

    async fn update(&self, customer: Customer) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut table = self.load().await?;
        table.update(customer)?;
        self.save(&table).await
    }

    async fn remove(&self, id: CustomerId) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut table = self.load().await?;
        table.remove(id)?;
        self.save(&table).await
    }
}
