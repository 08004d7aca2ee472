//! One adapter per job source. Each owns its endpoint constants, selector
//! sets and response types, and exposes `fetch(keywords, location)` that
//! never errors outward — failure of any kind is an empty batch.

pub mod arbeitnow;
pub mod catho;
pub mod google;
pub mod jooble;
pub mod jsearch;
pub mod linkedin;
pub mod remotive;
pub mod websearch;

pub use arbeitnow::ArbeitnowSource;
pub use catho::CathoSource;
pub use google::GoogleJobsSource;
pub use jooble::JoobleSource;
pub use jsearch::JSearchSource;
pub use linkedin::LinkedInSource;
pub use remotive::RemotiveSource;
pub use websearch::WebSearchSource;
