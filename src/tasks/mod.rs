pub mod delivery;
pub mod detector;
pub mod dispatcher;
pub mod queue;
pub mod worker;

pub use delivery::spawn_delivery_consumer;
pub use dispatcher::dispatch_report;
pub use queue::{Analyzers, TaskPublisher, TaskQueue};
