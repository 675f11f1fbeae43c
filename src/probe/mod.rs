pub mod pagespeed;
pub mod structure;

pub use pagespeed::{MetricsProvider, PageSpeedClient};
pub use structure::{HttpStructureProbe, StructureProbe, StructureReport};
