pub mod labs;
pub mod paths;
pub mod profile;
