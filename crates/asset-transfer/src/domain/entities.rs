//! # Core Domain Entities

use serde::{Deserialize, Serialize};

/// One request to execute a named operation, as returned by the host's
/// `get_function_and_parameters`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Function name.
    pub function: String,
    /// Ordered string parameters.
    pub params: Vec<String>,
}

impl InvocationRequest {
    /// Creates a request.
    pub fn new<F, I, P>(function: F, params: I) -> Self
    where
        F: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            function: function.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }
}
