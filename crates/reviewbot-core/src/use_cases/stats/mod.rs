pub(crate) mod get_statistics;

pub use get_statistics::GetStatistics;
