pub mod catalog;
pub mod providers;
pub mod query_builder;
pub mod recommendations;

pub use providers::{MetadataProvider, TmdbProvider};
pub use query_builder::{build_discover_query, DiscoverQuery, RecommendationQuery};
pub use recommendations::{assemble, Assembled, AssemblyRequest, AssemblySettings};
