use facear_tracking::SessionError;

/// An error type for the view crate.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ViewError {
    /// No GPU device is available to create a renderer.
    #[error("No render device is available")]
    NoRenderDevice,

    /// The tracking session rejected a request.
    #[error(transparent)]
    Session(#[from] SessionError),
}
