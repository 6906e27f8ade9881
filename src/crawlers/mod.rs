pub mod site;

pub use site::Crawler;
