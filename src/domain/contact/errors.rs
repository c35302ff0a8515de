/// The first unmet requirement of a submission. Rules are checked in the
/// order the variants are declared and evaluation stops at the first failure.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    MissingName,
    #[error("Valid email is required")]
    InvalidEmail,
    #[error("Service is required")]
    MissingService,
    #[error("Message is required")]
    MissingMessage,
}
