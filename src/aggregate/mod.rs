//! Incident aggregation across documents.

mod store;
mod tables;

pub use store::{ActorGroup, AggregateStore};
pub use tables::{
    build_report_tables, category_table, country_table, incident_cell, UNKNOWN_COUNTRY,
};
