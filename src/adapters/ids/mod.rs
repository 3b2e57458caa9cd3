pub mod uuid_generator;
