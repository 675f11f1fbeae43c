pub mod connection;
pub mod reports;
pub mod results;
pub mod schema;

pub use connection::ReportStore;
