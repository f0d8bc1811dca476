use windowshop_domain::entity::EntityKind;

use crate::domain::repository::BackupRepository;
use crate::domain::types::CollectionCounts;
use crate::error::StorefrontError;

pub struct CountCollectionsUseCase<R: BackupRepository> {
    pub repo: R,
}

impl<R: BackupRepository> CountCollectionsUseCase<R> {
    pub async fn execute(&self) -> Result<CollectionCounts, StorefrontError> {
        Ok(CollectionCounts {
            products: self.repo.count_documents(EntityKind::Products).await?,
            orders: self.repo.count_documents(EntityKind::Orders).await?,
            users: self.repo.count_documents(EntityKind::Users).await?,
        })
    }
}
