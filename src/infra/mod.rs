pub mod fs_cache;
pub mod html_file_source;
pub mod memory_cache;
pub mod workbook_file_source;

pub use fs_cache::FsCacheStore;
pub use html_file_source::HtmlFileSource;
pub use memory_cache::InMemoryCacheStore;
pub use workbook_file_source::WorkbookFileSource;
