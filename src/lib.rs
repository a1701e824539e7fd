pub mod adf;
pub mod html;
pub mod importer;
pub mod utils;
