//! Errors raised at the crate boundary.
//!
//! The resolvers themselves never fail: missing data is `None`. Only
//! decoding input, encoding output, and JNI marshalling can go wrong.

/// Failure while crossing the crate boundary.
#[derive(Debug, thiserror::Error)]
pub enum GuidanceError {
    /// Input JSON could not be decoded into `what`.
    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Output could not be encoded as JSON.
    #[error("failed to encode JSON: {0}")]
    Encode(#[from] serde_json::Error),

    /// A JNI call failed.
    #[error("JNI error: {0}")]
    Jni(#[from] jni::errors::Error),
}

impl GuidanceError {
    pub(crate) fn decode(what: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| Self::Decode { what, source }
    }
}
