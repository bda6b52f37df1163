/// Describes the kinds of failures a ceremony can end with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A "begin" call didn't complete or returned an unusable response.
    Network,
    /// The platform credential ceremony was rejected (cancelled, timed out, excluded, etc.).
    Ceremony,
    /// A "finish" call failed after the platform ceremony already succeeded, so the server may
    /// or may not have committed the result.
    Indeterminate,
    /// Unknown error.
    Unknown,
}
