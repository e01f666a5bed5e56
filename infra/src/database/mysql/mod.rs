//! MySQL repository implementations

mod context_repository_impl;
mod subject_repository_impl;

pub use context_repository_impl::MySqlContextRepository;
pub use subject_repository_impl::MySqlSubjectRepository;
