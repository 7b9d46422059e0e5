pub type SceneResult<T> = Result<T, SceneError>;

/// Failure kinds of the animation core.
///
/// None of these are fatal: tangent degeneracy is absorbed by the drivers,
/// bad deltas are clamped by the clock and teardown failures are logged by
/// the registry. Only construction surfaces them to the caller.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("resource teardown failed: {0}")]
    ResourceTeardown(String),
}

impl SceneError {
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateInput(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn teardown(msg: impl Into<String>) -> Self {
        Self::ResourceTeardown(msg.into())
    }
}
