/// Reasons the platform rejects a credential ceremony, named after the `DOMException`s
/// browsers reject `navigator.credentials` calls with.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The user cancelled, the prompt timed out or no suitable credential was found.
    #[error("The operation either timed out or was not allowed.")]
    NotAllowed,
    /// The authenticator already contains one of the excluded credentials.
    #[error("The authenticator was previously registered.")]
    InvalidState,
    /// None of the requested algorithms or options are supported.
    #[error("The requested operation is not supported: {0}")]
    NotSupported(String),
    /// The context isn't secure or the relying party id isn't valid for the origin.
    #[error("The operation is insecure.")]
    Security,
    #[error("The platform failed to complete the operation: {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::PlatformError;

    #[test]
    fn display() {
        assert_eq!(
            PlatformError::NotAllowed.to_string(),
            "The operation either timed out or was not allowed."
        );
        assert_eq!(
            PlatformError::NotSupported("RS256".to_string()).to_string(),
            "The requested operation is not supported: RS256"
        );
    }
}
