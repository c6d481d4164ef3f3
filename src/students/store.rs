//! In-memory record store guarded by a single async mutex.

use crate::students::types::{NewStudent, StoreError, Student, StudentId, StudentPatch};
use std::collections::BTreeMap;
use tokio::sync::Mutex;

/// Mapping from identifier to student record.
///
/// Every operation holds the lock only for its own in-memory work. Identifiers come from a
/// monotonically increasing counter, so a deleted identifier is never handed out again.
#[derive(Default)]
pub struct StudentStore {
    inner: Mutex<StoreState>,
}

#[derive(Default)]
struct StoreState {
    records: BTreeMap<StudentId, Student>,
    last_id: StudentId,
}

impl StudentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new record and return it with its assigned identifier.
    pub async fn insert(&self, new_student: NewStudent) -> Student {
        let mut state = self.inner.lock().await;
        state.last_id += 1;
        let student = new_student.into_student(state.last_id);
        state.records.insert(student.id, student.clone());
        student
    }

    /// Snapshot every stored record in ascending identifier order.
    pub async fn all(&self) -> Vec<Student> {
        self.inner.lock().await.records.values().cloned().collect()
    }

    /// Fetch a single record.
    pub async fn get(&self, id: StudentId) -> Result<Student, StoreError> {
        self.inner
            .lock()
            .await
            .records
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Merge `patch` into an existing record and return the result.
    pub async fn update(&self, id: StudentId, patch: StudentPatch) -> Result<Student, StoreError> {
        let mut state = self.inner.lock().await;
        let student = state.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        patch.apply_to(student);
        Ok(student.clone())
    }

    /// Remove a record. Remaining identifiers are left as they are.
    pub async fn delete(&self, id: StudentId) -> Result<(), StoreError> {
        self.inner
            .lock()
            .await
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
