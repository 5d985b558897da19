use crate::clients::{DoctorClient, ProductClient};
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::{doctor_store, product_store};
use tracing::{error, info, warn};

/// Runs the two collections and the dashboard wired to them.
///
/// # Example
///
/// ```rust
/// use admin_panel::config::Config;
/// use admin_panel::lifecycle::DashboardSystem;
///
/// #[tokio::main]
/// async fn main() -> Result<(), String> {
///     let system = DashboardSystem::start(&Config::default()).await;
///     assert!(system.dashboard.products().is_empty());
///     system.shutdown().await
/// }
/// ```
pub struct DashboardSystem {
    pub dashboard: Dashboard,

    /// Task handles of the collections (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl DashboardSystem {
    /// Spawns the Products and Doctors collections and builds a dashboard on top of them.
    ///
    /// Nothing is seeded or fetched; call [`Dashboard::load`] or use [`DashboardSystem::start`].
    pub fn new(config: &Config) -> Self {
        let (product_client, doctor_client, handles) = spawn_collections(config);
        Self {
            dashboard: Dashboard::new(product_client, doctor_client),
            handles,
        }
    }

    /// Spawns the collections, inserts the seed products and performs the initial load.
    ///
    /// A seed row the collection rejects is logged and skipped. A failed initial load is
    /// left on the dashboard's feedback line.
    pub async fn start(config: &Config) -> Self {
        let (product_client, doctor_client, handles) = spawn_collections(config);

        for params in &config.seed.products {
            if let Err(e) = product_client.insert_product(params.clone()).await {
                warn!(name = %params.name, error = %e, "Seed product rejected");
            }
        }

        let dashboard = Dashboard::new(product_client, doctor_client);
        match dashboard.load().await {
            Ok(size) => info!(size, "Dashboard ready"),
            Err(e) => warn!(error = %e, "Initial product fetch failed"),
        }
        Self { dashboard, handles }
    }

    /// Gracefully shuts down both collections.
    ///
    /// Dropping the dashboard drops the last clients, which closes the channels. Each
    /// collection then leaves its loop and the task completes.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.dashboard);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Collection task failed: {:?}", e);
                return Err(format!("Collection task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

fn spawn_collections(
    config: &Config,
) -> (ProductClient, DoctorClient, Vec<tokio::task::JoinHandle<()>>) {
    let capacity = config.gateway.channel_capacity;
    let (products, product_client) = product_store::new(capacity);
    let (doctors, doctor_client) = doctor_store::new(capacity);

    let product_handle = tokio::spawn(products.run());
    let doctor_handle = tokio::spawn(doctors.run());

    (
        product_client,
        doctor_client,
        vec![product_handle, doctor_handle],
    )
}
