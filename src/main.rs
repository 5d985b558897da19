//! Walks the dashboard through one of each operation against in-process collections.

use admin_panel::config::Config;
use admin_panel::dashboard::{Dispatch, ViewMode};
use admin_panel::lifecycle::{setup_tracing, DashboardSystem};
use rust_decimal::Decimal;
use tracing::{error, info, Instrument};

fn report(step: &str, outcome: Dispatch) {
    match outcome {
        Dispatch::Completed(feedback) if feedback.is_error() => {
            error!(step, feedback = %feedback.text, "Operation failed")
        }
        Dispatch::Completed(feedback) => info!(step, feedback = %feedback.text, "Operation done"),
        Dispatch::Busy(action) => info!(step, ?action, "Action already in flight"),
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = Config::load().map_err(|e| e.to_string())?;
    setup_tracing(&config.logging);

    info!("Starting admin panel demo");
    let system = DashboardSystem::start(&config).await;
    let dashboard = &system.dashboard;

    // Add a product through the form buffer
    dashboard.edit_product_draft(|draft| {
        draft.name = "Sterile Gauze".to_string();
        draft.price = Decimal::new(550, 2);
        draft.description = "10cm x 10cm pads".to_string();
        draft.quantity = 40;
        draft.product_image = "https://example.com/gauze.png".to_string();
    });
    report(
        "add_product",
        dashboard
            .add_product()
            .instrument(tracing::info_span!("add_product"))
            .await,
    );

    // Select the new row, change it and write it back
    if let Some(product) = dashboard.products().last().cloned() {
        dashboard.begin_edit(&product);
        info!(session = ?dashboard.edit_session(), "Row selected");
        dashboard.edit_product_draft(|draft| draft.quantity = 35);
        report("update_product", dashboard.update_product().await);

        report("delete_product", dashboard.delete_product(product.id).await);
    }

    // Switch to the doctor form and add a doctor
    dashboard.select_view(ViewMode::Doctors);
    dashboard.edit_doctor_draft(|draft| {
        draft.name = "Dr. Ada Park".to_string();
        draft.specialization = "Cardiology".to_string();
        draft.email = "ada.park@clinic.example".to_string();
        draft.password = "change-me".to_string();
        draft.telephone = "555-0100".to_string();
    });
    report("add_doctor", dashboard.add_doctor().await);

    info!(products = dashboard.products().len(), "Demo finished");
    system.shutdown().await?;
    Ok(())
}
