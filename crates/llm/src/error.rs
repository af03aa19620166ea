/// Errors from the generative provider HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Provider API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response decoded but carried no generated text.
    #[error("Provider returned an empty response")]
    EmptyResponse,

    /// The response body did not have the expected shape.
    #[error("Malformed provider response: {0}")]
    Malformed(String),
}

impl LlmError {
    /// Ensure the response has a success status code.
    ///
    /// Returns the response unchanged on success, or an [`LlmError::ApiError`]
    /// carrying the status and body text on failure.
    pub(crate) async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, LlmError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
