pub mod admin;
pub mod analytics;
pub mod leads;
pub mod pages;
pub mod progress;
pub mod seo;
