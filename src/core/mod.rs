pub mod codegen;
pub mod coordinator;
pub mod schedule;
pub mod validator;

pub use crate::domain::model::{Course, Enrollment, EnrollmentView, Teacher};
pub use crate::domain::ports::{CatalogReader, EnrollmentStore};
pub use crate::utils::error::Result;
