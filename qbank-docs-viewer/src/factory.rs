//! Seam between the initializer and whatever builds the viewer

use crate::config::ViewerConfiguration;

/// Builds a viewer instance from a configuration.
///
/// The configuration is moved in; a factory reports its own failures
/// through the handle it returns, never back to the caller.
pub trait ViewerFactory: Send + Sync {
    /// Opaque value representing the running viewer
    type Handle: Send + Sync + 'static;

    fn create(&self, configuration: ViewerConfiguration) -> Self::Handle;
}

impl<F, H> ViewerFactory for F
where
    F: Fn(ViewerConfiguration) -> H + Send + Sync,
    H: Send + Sync + 'static,
{
    type Handle = H;

    fn create(&self, configuration: ViewerConfiguration) -> H {
        self(configuration)
    }
}
