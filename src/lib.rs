pub mod generator;
pub mod llm;
pub mod policy;
pub mod prompt;
pub mod translate;
pub mod version;

pub use generator::{generate_branch_name, BranchNameGenerator, GenerateError};
pub use llm::CompletionError;
pub use policy::{check_branch_name, validate_branch_name, BranchPrefix, Rejection};
pub use version::extract_release_version;
