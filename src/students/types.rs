//! Record shapes and error definitions for the student service.

use crate::summary::SummaryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier assigned to a stored student record.
pub type StudentId = u64;

/// A stored student record as exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Identifier assigned by the store; immutable after creation.
    pub id: StudentId,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: i64,
    /// Contact email; no format validation is applied.
    pub email: String,
}

/// Body of a create request. Missing fields decode to their empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewStudent {
    /// Display name; must be non-empty.
    pub name: String,
    /// Age in years; must be greater than zero.
    pub age: i64,
    /// Contact email; must be non-empty.
    pub email: String,
}

impl NewStudent {
    /// Apply the presence checks required before a record is stored.
    pub fn validate(&self) -> Result<(), StudentError> {
        if self.name.is_empty() || self.age <= 0 || self.email.is_empty() {
            return Err(StudentError::InvalidData);
        }
        Ok(())
    }

    pub(crate) fn into_student(self, id: StudentId) -> Student {
        Student {
            id,
            name: self.name,
            age: self.age,
            email: self.email,
        }
    }
}

/// Body of an update request.
///
/// Absent, empty, and non-positive fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StudentPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement age.
    pub age: Option<i64>,
    /// Replacement email.
    pub email: Option<String>,
}

impl StudentPatch {
    /// Merge the non-empty fields of this patch into `student`.
    pub fn apply_to(self, student: &mut Student) {
        if let Some(name) = self.name.filter(|name| !name.is_empty()) {
            student.name = name;
        }
        if let Some(age) = self.age.filter(|age| *age > 0) {
            student.age = age;
        }
        if let Some(email) = self.email.filter(|email| !email.is_empty()) {
            student.email = email;
        }
    }
}

/// Errors emitted by the in-memory record store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No record exists for the identifier.
    #[error("no student with id {0}")]
    NotFound(StudentId),
}

/// Errors surfaced by student operations.
#[derive(Debug, Error)]
pub enum StudentError {
    /// Request body could not be decoded.
    #[error("Invalid input")]
    InvalidInput,
    /// Request body decoded but failed the presence checks.
    #[error("Invalid student data")]
    InvalidData,
    /// No record exists for the identifier.
    #[error("Student not found")]
    NotFound(StudentId),
    /// Upstream summary generation failed.
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

impl From<StoreError> for StudentError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => Self::NotFound(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bob() -> Student {
        Student {
            id: 2,
            name: "Bob".into(),
            age: 22,
            email: "b@x.com".into(),
        }
    }

    #[test]
    fn validate_requires_every_field() {
        let complete = NewStudent {
            name: "Alice".into(),
            age: 20,
            email: "a@x.com".into(),
        };
        assert!(complete.validate().is_ok());

        for incomplete in [
            NewStudent {
                name: String::new(),
                ..complete.clone()
            },
            NewStudent {
                age: 0,
                ..complete.clone()
            },
            NewStudent {
                age: -1,
                ..complete.clone()
            },
            NewStudent {
                email: String::new(),
                ..complete.clone()
            },
        ] {
            assert!(matches!(
                incomplete.validate(),
                Err(StudentError::InvalidData)
            ));
        }
    }

    #[test]
    fn missing_create_fields_decode_to_empty_values() {
        let parsed: NewStudent = serde_json::from_str(r#"{"name":"Alice"}"#).expect("decode");
        assert_eq!(parsed.age, 0);
        assert!(parsed.email.is_empty());
        assert!(parsed.validate().is_err());
    }

    #[test]
    fn client_supplied_id_is_ignored() {
        let parsed: NewStudent =
            serde_json::from_str(r#"{"id":42,"name":"Alice","age":20,"email":"a@x.com"}"#)
                .expect("decode");
        assert_eq!(parsed.into_student(1).id, 1);
    }

    #[test]
    fn patch_changes_only_targeted_field() {
        let mut student = bob();
        let patch: StudentPatch = serde_json::from_str(r#"{"age":23}"#).expect("decode");
        patch.apply_to(&mut student);

        assert_eq!(
            student,
            Student {
                age: 23,
                ..bob()
            }
        );
    }

    #[test]
    fn patch_ignores_empty_and_zero_values() {
        let mut student = bob();
        let patch: StudentPatch =
            serde_json::from_str(r#"{"name":"","age":0,"email":"","id":7}"#).expect("decode");
        patch.apply_to(&mut student);

        assert_eq!(student, bob());
    }

    #[test]
    fn negative_create_age_decodes_and_fails_validation() {
        let parsed: NewStudent =
            serde_json::from_str(r#"{"name":"C","age":-1,"email":"c"}"#).expect("decode");
        assert!(matches!(parsed.validate(), Err(StudentError::InvalidData)));
    }

    #[test]
    fn patch_ignores_negative_age() {
        let mut student = bob();
        let patch: StudentPatch = serde_json::from_str(r#"{"age":-5}"#).expect("decode");
        patch.apply_to(&mut student);

        assert_eq!(student, bob());
    }
}
