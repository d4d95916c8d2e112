pub mod category;
pub mod file_formats;
pub mod finance;
pub mod lenient;
pub mod logistics;
pub mod model;
pub mod opex;
pub mod process;
pub mod project;
pub mod rampup;
pub mod rubric;
pub mod scenario;
pub mod settings;
