use crate::di::Container;
use crate::error::Result;

/// Types that can build themselves from collaborators held in a [`Container`].
///
/// Controllers implement this so the module can wire them, while still
/// exposing plain constructors for callers that hold their dependencies
/// directly.
pub trait Injectable: Sized + Send + Sync + 'static {
    /// # Errors
    /// Returns an error if any required dependency is not registered.
    fn inject(container: &Container) -> Result<Self>;
}
