pub mod message;
pub mod report;
pub mod request;

pub use message::{DeliveryTask, TaskMessage};
pub use report::{AnalysisKind, Report, ReportStatus, SubResult};
pub use request::AnalysisRequest;
