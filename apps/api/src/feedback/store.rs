use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::feedback::models::ResumeRecord;

/// In-memory résumé store. Records are immutable once inserted.
#[derive(Clone, Default)]
pub struct ResumeStore {
    records: Arc<RwLock<HashMap<Uuid, Arc<ResumeRecord>>>>,
}

impl ResumeStore {
    pub async fn insert(&self, record: ResumeRecord) -> Uuid {
        let id = record.id;
        self.records.write().await.insert(id, Arc::new(record));
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<ResumeRecord>> {
        self.records.read().await.get(&id).cloned()
    }

    /// Like `get`, but maps a miss to the 404 the feedback page expects.
    pub async fn require(&self, id: Uuid) -> Result<Arc<ResumeRecord>, AppError> {
        self.get(id)
            .await
            .ok_or_else(|| AppError::NotFound("Feedback not found for this resume.".to_string()))
    }
}
