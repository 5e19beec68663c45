use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::jobs::models::Job;

#[derive(Default)]
struct BoardInner {
    jobs: Vec<Job>,
    by_id: HashMap<u64, usize>,
}

/// In-memory job board. Keeps insertion order and holds each job id once.
#[derive(Clone, Default)]
pub struct JobBoard {
    inner: Arc<RwLock<BoardInner>>,
}

impl JobBoard {
    /// Adds jobs whose ids are not on the board yet. Returns how many were added.
    pub async fn add_all(&self, jobs: impl IntoIterator<Item = Job>) -> usize {
        let mut inner = self.inner.write().await;
        let mut added = 0;
        for job in jobs {
            if inner.by_id.contains_key(&job.id) {
                continue;
            }
            let index = inner.jobs.len();
            inner.by_id.insert(job.id, index);
            inner.jobs.push(job);
            added += 1;
        }
        added
    }

    pub async fn list(&self) -> Vec<Job> {
        self.inner.read().await.jobs.clone()
    }

    pub async fn get(&self, id: u64) -> Option<Job> {
        let inner = self.inner.read().await;
        inner.by_id.get(&id).map(|&i| inner.jobs[i].clone())
    }

    /// Ids already on the board, so a source can skip fetching them again.
    pub async fn seen_ids(&self) -> HashSet<u64> {
        self.inner.read().await.by_id.keys().copied().collect()
    }
}
