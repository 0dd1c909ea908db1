pub mod emitters;
pub mod generator;
pub mod type_mapper;

pub use emitters::data_source::DataSourceOptions;
pub use generator::TerraformGenerator;
