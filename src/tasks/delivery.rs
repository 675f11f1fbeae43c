use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::models::DeliveryTask;

/// Drains the delivery queue. PDF rendering and email sending are handled
/// by an external collaborator; this consumer only acknowledges the task.
pub fn spawn_delivery_consumer(mut rx: mpsc::UnboundedReceiver<DeliveryTask>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(task) = rx.recv().await {
            info!(
                document_id = %task.document_id,
                recipient = %task.recipient_email,
                "Delivery task acknowledged (rendering and email are external)"
            );
        }
    })
}
