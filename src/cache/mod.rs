mod file;

pub use file::ResultCache;
