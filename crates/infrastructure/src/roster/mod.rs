pub mod file_source;
pub mod static_source;

pub use file_source::FileRosterSource;
pub use static_source::StaticRosterSource;
