pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{DirectoryError, DirectoryProvider, SearchQuery};
pub use providers::HttpDirectoryProvider;
pub use types::{DEFAULT_VIEWPORT_SPAN, Dev, DevRecord, GeoJsonPoint, Position, Viewport};
