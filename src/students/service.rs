//! Student service coordinating the record store and the summary upstream.

use crate::{
    config::Config,
    students::{
        store::StudentStore,
        types::{NewStudent, Student, StudentError, StudentId, StudentPatch},
    },
    summary::{HttpSummaryClient, SummaryClient, SummaryError, SummaryRequest},
};
use async_trait::async_trait;

/// Owns the record store and the summary client for the lifetime of the process.
///
/// Construct the service once near process start and share it through an `Arc`.
pub struct StudentService {
    store: StudentStore,
    summary_client: Box<dyn SummaryClient>,
    summary_model: String,
}

/// Abstraction over student operations used by the HTTP surface.
#[async_trait]
pub trait StudentApi: Send + Sync {
    /// Validate and store a new record.
    async fn create_student(&self, new_student: NewStudent) -> Result<Student, StudentError>;

    /// List every stored record.
    async fn list_students(&self) -> Vec<Student>;

    /// Fetch a record by identifier.
    async fn get_student(&self, id: StudentId) -> Result<Student, StudentError>;

    /// Merge a partial update into an existing record.
    async fn update_student(
        &self,
        id: StudentId,
        patch: StudentPatch,
    ) -> Result<Student, StudentError>;

    /// Remove a record.
    async fn delete_student(&self, id: StudentId) -> Result<(), StudentError>;

    /// Ask the upstream service to summarize a record and return its raw response body.
    async fn summarize_student(&self, id: StudentId) -> Result<Vec<u8>, StudentError>;
}

impl StudentService {
    /// Build a service with an empty store around an existing summary client.
    pub fn new(summary_client: Box<dyn SummaryClient>, summary_model: impl Into<String>) -> Self {
        Self {
            store: StudentStore::new(),
            summary_client,
            summary_model: summary_model.into(),
        }
    }

    /// Build a service talking to the upstream described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, SummaryError> {
        let client = HttpSummaryClient::new(config.summary_url.clone(), config.summary_timeout)?;
        tracing::debug!(
            endpoint = client.endpoint(),
            model = %config.summary_model,
            timeout = ?config.summary_timeout,
            "Initialized summary client"
        );
        Ok(Self::new(Box::new(client), config.summary_model.clone()))
    }
}

#[async_trait]
impl StudentApi for StudentService {
    async fn create_student(&self, new_student: NewStudent) -> Result<Student, StudentError> {
        new_student.validate()?;
        let student = self.store.insert(new_student).await;
        tracing::info!(id = student.id, "Student created");
        Ok(student)
    }

    async fn list_students(&self) -> Vec<Student> {
        self.store.all().await
    }

    async fn get_student(&self, id: StudentId) -> Result<Student, StudentError> {
        Ok(self.store.get(id).await?)
    }

    async fn update_student(
        &self,
        id: StudentId,
        patch: StudentPatch,
    ) -> Result<Student, StudentError> {
        let student = self.store.update(id, patch).await?;
        tracing::info!(id, "Student updated");
        Ok(student)
    }

    async fn delete_student(&self, id: StudentId) -> Result<(), StudentError> {
        self.store.delete(id).await?;
        tracing::info!(id, "Student deleted");
        Ok(())
    }

    async fn summarize_student(&self, id: StudentId) -> Result<Vec<u8>, StudentError> {
        // The store lock is released before the outbound call starts.
        let student = self.store.get(id).await?;
        let request = SummaryRequest::for_student(&student, self.summary_model.as_str());
        let body = self.summary_client.generate(request).await.map_err(|error| {
            tracing::warn!(id, %error, "Summary generation failed");
            error
        })?;
        tracing::info!(id, bytes = body.len(), "Summary relayed");
        Ok(body)
    }
}
