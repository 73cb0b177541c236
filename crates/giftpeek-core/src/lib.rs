pub mod config;
pub mod logging;

pub mod cache;
pub mod decode;
pub mod extract;
pub mod fetch;
pub mod image;
pub mod preview;
pub mod resolver;
pub mod suggestion;

pub use cache::PreviewCache;
pub use preview::{ImageResource, PreviewResult};
pub use resolver::LinkPreviewResolver;
