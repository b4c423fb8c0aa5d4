pub mod file;

pub use file::JsonFileRowSource;
