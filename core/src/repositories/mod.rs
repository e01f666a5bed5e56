//! Repository interfaces implemented by the infrastructure layer.

pub mod context;
pub mod subject;

pub use context::ContextRepository;
pub use subject::SubjectRepository;

#[cfg(test)]
pub use context::MockContextRepository;
#[cfg(test)]
pub use subject::MockSubjectRepository;
