use crate::descriptor::MethodId;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum MemoError {
    #[error("cannot construct `{source_type}`: {cause}")]
    Construction {
        source_type: &'static str,
        #[source]
        cause: BoxError,
    },

    #[error("method `{method}` of `{source_type}` is selected for memoization but cannot be overridden")]
    NotOverridable { source_type: &'static str, method: MethodId },

    #[error("return type `{returns}` of `{method}` on `{source_type}` cannot be stored in a cache")]
    UnrepresentableReturn { source_type: &'static str, method: MethodId, returns: &'static str },

    #[error("method `{method}` is registered more than once for `{source_type}`")]
    DuplicateMethod { source_type: &'static str, method: MethodId },
}
