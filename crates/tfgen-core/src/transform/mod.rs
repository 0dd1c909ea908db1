pub mod document;
pub mod name_normalizer;
pub mod path_resolver;
pub mod schema_resolver;
pub mod state_mapper;

pub use document::Document;
pub use path_resolver::PathResolver;
pub use schema_resolver::SchemaResolver;
