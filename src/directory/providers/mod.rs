pub mod http;

pub use http::HttpDirectoryProvider;
