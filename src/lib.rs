pub mod addons;
pub mod ingest;
pub mod pricing;
pub mod tariff;
