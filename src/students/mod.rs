//! Student records: data model, in-memory store, and the service used by the HTTP surface.

mod service;
pub mod store;
pub mod types;

pub use service::{StudentApi, StudentService};
pub use store::StudentStore;
pub use types::{NewStudent, StoreError, Student, StudentError, StudentId, StudentPatch};
