use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::{resolve_api_key, SitescopeConfig};
use crate::errors::SitescopeError;
use crate::llm::ProviderRegistry;
use crate::models::{DeliveryTask, TaskMessage};
use crate::probe::{HttpStructureProbe, MetricsProvider, PageSpeedClient, StructureProbe};
use crate::store::ReportStore;

use super::worker;

/// The analysis capabilities a worker can invoke, behind trait seams so
/// tests can substitute mocks for every external call.
#[derive(Clone)]
pub struct Analyzers {
    pub ai: ProviderRegistry,
    pub pagespeed: Arc<dyn MetricsProvider>,
    pub structure: Arc<dyn StructureProbe>,
}

impl Analyzers {
    pub fn from_config(config: &SitescopeConfig) -> Result<Self, SitescopeError> {
        let ai = ProviderRegistry::from_config(config.providers.as_ref())?;
        let pagespeed_key = resolve_api_key(
            config.pagespeed.as_ref().and_then(|p| p.api_key.as_deref()),
            "PAGESPEED_API_KEY",
        );
        Ok(Self {
            ai,
            pagespeed: Arc::new(PageSpeedClient::new(pagespeed_key)),
            structure: Arc::new(HttpStructureProbe::new()),
        })
    }
}

/// Publishes one task message as one independent unit of work.
///
/// The dispatcher only depends on this seam, so tests can record messages
/// instead of running workers.
pub trait TaskPublisher: Send + Sync {
    fn publish(&self, msg: TaskMessage);
}

struct QueueInner {
    store: ReportStore,
    analyzers: Analyzers,
    delivery_tx: mpsc::UnboundedSender<DeliveryTask>,
    in_flight: DashMap<String, usize>,
}

/// In-process task transport: publishing a message spawns its worker as a
/// detached task. Workers never message each other; all coordination goes
/// through the report store.
#[derive(Clone)]
pub struct TaskQueue {
    inner: Arc<QueueInner>,
}

impl TaskQueue {
    pub fn new(
        store: ReportStore,
        analyzers: Analyzers,
    ) -> (Self, mpsc::UnboundedReceiver<DeliveryTask>) {
        let (delivery_tx, delivery_rx) = mpsc::unbounded_channel();
        let queue = Self {
            inner: Arc::new(QueueInner {
                store,
                analyzers,
                delivery_tx,
                in_flight: DashMap::new(),
            }),
        };
        (queue, delivery_rx)
    }

    pub fn store(&self) -> &ReportStore {
        &self.inner.store
    }

    pub fn analyzers(&self) -> &Analyzers {
        &self.inner.analyzers
    }

    /// Outstanding worker invocations for a report.
    pub fn pending(&self, report_id: &str) -> usize {
        self.inner.in_flight.get(report_id).map(|c| *c).unwrap_or(0)
    }

    pub fn publish_delivery(&self, task: DeliveryTask) {
        info!(document_id = %task.document_id, "Enqueueing delivery task");
        // Receiver dropped means delivery is disabled; completion stands.
        let _ = self.inner.delivery_tx.send(task);
    }

    fn task_finished(&self, report_id: &str) {
        if let Some(mut count) = self.inner.in_flight.get_mut(report_id) {
            *count = count.saturating_sub(1);
        }
        self.inner.in_flight.remove_if(report_id, |_, count| *count == 0);
    }
}

impl TaskPublisher for TaskQueue {
    fn publish(&self, msg: TaskMessage) {
        *self.inner.in_flight.entry(msg.report_id.clone()).or_insert(0) += 1;
        debug!(report_id = %msg.report_id, analysis = %msg.analysis_type, "Publishing task");

        let queue = self.clone();
        tokio::spawn(async move {
            let report_id = msg.report_id.clone();
            worker::run_task(&queue, msg).await;
            queue.task_finished(&report_id);
        });
    }
}
