//! IO modules - side effects (network, filesystem)

pub mod download;
pub mod extract;

pub use download::{DownloadError, HttpTransport, Transport};
pub use extract::{Archiver, ExtractError, ZipArchiver};
