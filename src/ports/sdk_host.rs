//! SDK host port - the page environment the tokenization SDK loads into.

/// Port for checking and loading the tokenization SDK.
pub trait SdkHost: Send + Sync {
    /// True once the tokenization client is globally available.
    fn client_available(&self) -> bool;

    /// Starts an asynchronous load of the SDK script from `src`.
    fn inject_script(&self, src: &str);

    /// True once the document has become interactive.
    fn is_document_ready(&self) -> bool;
}
