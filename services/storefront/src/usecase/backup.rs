use std::path::Path;

use tracing::{info, warn};

use windowshop_domain::entity::EntityKind;

use crate::domain::repository::BackupRepository;
use crate::domain::types::{Backup, ImportSummary, MAX_ORDER_QUANTITY};
use crate::error::StorefrontError;

// ── ExportAll ────────────────────────────────────────────────────────────────

pub struct ExportAllUseCase<R: BackupRepository> {
    pub repo: R,
}

impl<R: BackupRepository> ExportAllUseCase<R> {
    pub async fn execute(&self) -> Result<Backup, StorefrontError> {
        self.repo.export_all().await
    }
}

// ── ImportAll ────────────────────────────────────────────────────────────────

pub struct ImportAllUseCase<R: BackupRepository> {
    pub repo: R,
}

impl<R: BackupRepository> ImportAllUseCase<R> {
    /// Parse an uploaded bundle and upsert every collection it carries.
    pub async fn execute(&self, body: &[u8]) -> Result<ImportSummary, StorefrontError> {
        let backup: Backup = serde_json::from_slice(body)
            .map_err(|e| StorefrontError::InvalidImport(e.to_string()))?;
        check_quantities(&backup)?;
        let summary = self.repo.import_all(&backup).await?;
        info!(?summary, "import finished");
        Ok(summary)
    }
}

fn check_quantities(backup: &Backup) -> Result<(), StorefrontError> {
    let oversized = backup
        .orders
        .iter()
        .flatten()
        .find(|o| o.quantity > MAX_ORDER_QUANTITY);
    match oversized {
        Some(order) => Err(StorefrontError::InvalidImport(format!(
            "order {} quantity {} exceeds {MAX_ORDER_QUANTITY}",
            order.key, order.quantity
        ))),
        None => Ok(()),
    }
}

// ── SeedFromFile ─────────────────────────────────────────────────────────────

pub struct SeedFromFileUseCase<R: BackupRepository> {
    pub repo: R,
}

impl<R: BackupRepository> SeedFromFileUseCase<R> {
    /// Import the bundle at `path` into collections that are still empty.
    ///
    /// An unreadable or malformed file is logged and skipped; startup goes on.
    pub async fn execute(&self, path: &Path) -> Result<ImportSummary, StorefrontError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(b) => b,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "seed file unreadable");
                return Ok(ImportSummary::default());
            }
        };
        let mut backup: Backup = match serde_json::from_slice(&bytes) {
            Ok(b) => b,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "seed file malformed");
                return Ok(ImportSummary::default());
            }
        };
        if let Err(e) = check_quantities(&backup) {
            warn!(path = %path.display(), error = %e, "seed file malformed");
            return Ok(ImportSummary::default());
        }

        for kind in EntityKind::ALL {
            if self.repo.count_documents(kind).await? == 0 {
                continue;
            }
            info!(collection = %kind, "collection not empty, seed skipped");
            match kind {
                EntityKind::Users => backup.users = None,
                EntityKind::Products => backup.products = None,
                EntityKind::Orders => backup.orders = None,
                EntityKind::Measurements => backup.measurements = None,
                EntityKind::Photos => backup.photos = None,
            }
        }

        let summary = self.repo.import_all(&backup).await?;
        info!(path = %path.display(), ?summary, "seed data imported");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::types::{Product, User};

    #[derive(Default)]
    struct MockBackupRepo {
        stored: Mutex<Backup>,
    }

    fn len<T>(v: &Option<Vec<T>>) -> u64 {
        v.as_ref().map_or(0, |v| v.len() as u64)
    }

    fn upsert<T: Clone>(target: &mut Option<Vec<T>>, incoming: &Option<Vec<T>>) -> usize {
        let Some(incoming) = incoming else { return 0 };
        target.get_or_insert_with(Vec::new).extend(incoming.iter().cloned());
        incoming.len()
    }

    impl BackupRepository for MockBackupRepo {
        async fn export_all(&self) -> Result<Backup, StorefrontError> {
            Ok(self.stored.lock().unwrap().clone())
        }
        async fn import_all(&self, backup: &Backup) -> Result<ImportSummary, StorefrontError> {
            let mut stored = self.stored.lock().unwrap();
            Ok(ImportSummary {
                products: upsert(&mut stored.products, &backup.products),
                orders: upsert(&mut stored.orders, &backup.orders),
                users: upsert(&mut stored.users, &backup.users),
                measurements: upsert(&mut stored.measurements, &backup.measurements),
                photos: upsert(&mut stored.photos, &backup.photos),
            })
        }
        async fn count_documents(&self, kind: EntityKind) -> Result<u64, StorefrontError> {
            let stored = self.stored.lock().unwrap();
            Ok(match kind {
                EntityKind::Users => len(&stored.users),
                EntityKind::Products => len(&stored.products),
                EntityKind::Orders => len(&stored.orders),
                EntityKind::Measurements => len(&stored.measurements),
                EntityKind::Photos => len(&stored.photos),
            })
        }
        async fn ping(&self) -> bool {
            true
        }
    }

    fn bundle() -> serde_json::Value {
        serde_json::json!({
            "products": [
                {"_key": "prod1", "name": "Окно ПВХ Стандарт", "width": 1.2, "height": 1.5, "price": 12500.0}
            ],
            "users": [
                {"_key": "customer1", "username": "customer1", "password_hash": "x", "role": "customer", "phone_number": "+79110000001"}
            ]
        })
    }

    fn temp_seed(name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{name}-{}.json", uuid::Uuid::now_v7()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn should_reject_malformed_import_body() {
        let uc = ImportAllUseCase {
            repo: MockBackupRepo::default(),
        };
        let result = uc.execute(b"{\"products\": 42}").await;
        assert!(matches!(result, Err(StorefrontError::InvalidImport(_))));
    }

    #[tokio::test]
    async fn should_reject_order_quantity_beyond_column_range() {
        let uc = ImportAllUseCase {
            repo: MockBackupRepo::default(),
        };
        let body = serde_json::json!({
            "orders": [{
                "_key": "o1", "customer_id": "customer1", "product_id": "prod1",
                "product_price": 1.0, "quantity": 3_000_000_000u64, "address": "Москва",
                "total_price": 3_000_000_000.0
            }]
        });
        let result = uc.execute(&serde_json::to_vec(&body).unwrap()).await;
        assert!(matches!(result, Err(StorefrontError::InvalidImport(msg)) if msg.contains("o1")));
        assert!(uc.repo.stored.lock().unwrap().orders.is_none());
    }

    #[tokio::test]
    async fn should_import_only_collections_present() {
        let uc = ImportAllUseCase {
            repo: MockBackupRepo::default(),
        };
        let body = serde_json::to_vec(&bundle()).unwrap();
        let summary = uc.execute(&body).await.unwrap();
        assert_eq!(summary.products, 1);
        assert_eq!(summary.users, 1);
        assert_eq!(summary.orders, 0);
        assert!(uc.repo.stored.lock().unwrap().orders.is_none());
    }

    #[tokio::test]
    async fn should_seed_only_empty_collections() {
        let existing = User {
            key: "admin".into(),
            username: "admin".into(),
            password_hash: "x".into(),
            role: windowshop_domain::role::Role::Admin,
            first_name: String::new(),
            last_name: String::new(),
            phone_number: "+79110000009".into(),
            is_active: true,
            created_at: chrono::Utc::now(),
        };
        let repo = MockBackupRepo {
            stored: Mutex::new(Backup {
                users: Some(vec![existing]),
                ..Default::default()
            }),
        };
        let path = temp_seed("seed", &serde_json::to_vec(&bundle()).unwrap());
        let uc = SeedFromFileUseCase { repo };
        let summary = uc.execute(&path).await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(summary.products, 1);
        assert_eq!(summary.users, 0);
        let stored = uc.repo.stored.lock().unwrap();
        assert_eq!(stored.users.as_ref().unwrap().len(), 1);
        let products: &Vec<Product> = stored.products.as_ref().unwrap();
        assert_eq!(products[0].key, "prod1");
    }

    #[tokio::test]
    async fn should_ignore_missing_or_malformed_seed_file() {
        let uc = SeedFromFileUseCase {
            repo: MockBackupRepo::default(),
        };
        let missing = std::env::temp_dir().join("windowshop-no-such-seed.json");
        assert_eq!(uc.execute(&missing).await.unwrap(), ImportSummary::default());

        let path = temp_seed("broken", b"not json");
        assert_eq!(uc.execute(&path).await.unwrap(), ImportSummary::default());
        std::fs::remove_file(&path).ok();
    }
}
