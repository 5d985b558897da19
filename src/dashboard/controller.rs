use super::{Action, Dispatch, EditSession, Feedback, ViewMode};
use crate::clients::{DoctorClient, ProductClient};
use crate::model::{DoctorDraft, Product, ProductDraft, ProductId};
use crate::product_store::ProductError;
use parking_lot::Mutex;
use record_gateway::CollectionClient;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

pub const DOCTOR_ADDED: &str = "Doctor added successfully!";
pub const PRODUCT_ADDED: &str = "Product added successfully!";
pub const PRODUCT_UPDATED: &str = "Product updated successfully!";
pub const PRODUCT_DELETED: &str = "Product deleted successfully!";
pub const PRODUCT_MISSING: &str = "Product does not exist.";
pub const NO_PRODUCT_SELECTED: &str = "No product selected for editing.";

#[derive(Default)]
struct DashboardState {
    cache: Vec<Product>,
    product_draft: ProductDraft,
    doctor_draft: DoctorDraft,
    view: ViewMode,
    feedback: Option<Feedback>,
    in_flight: HashSet<Action>,
}

/// The admin panel controller.
///
/// All operations take `&self`. Wrap the dashboard in an `Arc` to drive it from several
/// tasks, or `tokio::join!` its futures on one task.
pub struct Dashboard {
    products: ProductClient,
    doctors: DoctorClient,
    state: Mutex<DashboardState>,
}

/// Holds an action's in-flight flag and releases it on drop, including when the owning
/// future is dropped mid-await.
struct InFlight<'a> {
    state: &'a Mutex<DashboardState>,
    action: Action,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state.lock().in_flight.remove(&self.action);
    }
}

impl Dashboard {
    pub fn new(products: ProductClient, doctors: DoctorClient) -> Self {
        Self {
            products,
            doctors,
            state: Mutex::new(DashboardState::default()),
        }
    }

    // =========================================================================
    // Product list
    // =========================================================================

    /// Initial fetch of the product list. A failure is written to the feedback line.
    pub async fn load(&self) -> Result<usize, ProductError> {
        self.refresh().await.inspect_err(|e| {
            self.state.lock().feedback = Some(Feedback::failure(e));
        })
    }

    /// Replaces the cached list with the gateway's, keeping gateway order.
    ///
    /// On failure the cache is left as it was. If the product under edit is no longer
    /// listed, the edit session ends.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<usize, ProductError> {
        let products = match self.products.list_all().await {
            Ok(products) => products,
            Err(e) => {
                warn!(error = %e, "Product list fetch failed, keeping cached list");
                return Err(e);
            }
        };

        let mut state = self.state.lock();
        state.cache = products;
        if let Some(id) = state.product_draft.id {
            if !state.cache.iter().any(|p| p.id == id) {
                info!(product_id = %id, "Edited product no longer listed, ending edit session");
                state.product_draft = ProductDraft::default();
            }
        }
        info!(size = state.cache.len(), "Product list refreshed");
        Ok(state.cache.len())
    }

    // Post-mutation refresh. Failures were already logged by `refresh`.
    async fn resync(&self) {
        let _ = self.refresh().await;
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn add_doctor(&self) -> Dispatch {
        let Some(_flag) = self.claim(Action::AddDoctor) else {
            return Dispatch::Busy(Action::AddDoctor);
        };
        let draft = self.state.lock().doctor_draft.clone();

        let feedback = match self.doctors.insert_doctor(draft).await {
            Ok(doctor) => {
                info!(doctor_id = %doctor.id, "Doctor added");
                self.state.lock().doctor_draft = DoctorDraft::default();
                Feedback::success(DOCTOR_ADDED)
            }
            Err(e) => {
                warn!(error = %e, "Doctor insert failed");
                Feedback::failure(&e)
            }
        };
        self.complete(feedback)
    }

    /// Inserts the product buffer as a new row. Any id in the buffer is left out of the
    /// payload, so adding while editing creates a copy rather than touching the original.
    #[instrument(skip(self))]
    pub async fn add_product(&self) -> Dispatch {
        let Some(_flag) = self.claim(Action::AddProduct) else {
            return Dispatch::Busy(Action::AddProduct);
        };
        let (selected, insert) = {
            let state = self.state.lock();
            (state.product_draft.id, state.product_draft.to_insert())
        };

        let feedback = match self.products.insert_product(insert).await {
            Ok(product) => {
                info!(product_id = %product.id, "Product added");
                self.reset_product_draft(selected);
                self.resync().await;
                Feedback::success(PRODUCT_ADDED)
            }
            Err(e) => {
                warn!(error = %e, "Product insert failed");
                Feedback::failure(&e)
            }
        };
        self.complete(feedback)
    }

    /// Writes the product buffer back to the row it was loaded from.
    ///
    /// Checks that the row still exists first. The update itself is conditional, so a row
    /// deleted between the check and the write is reported the same way.
    #[instrument(skip(self))]
    pub async fn update_product(&self) -> Dispatch {
        let Some(_flag) = self.claim(Action::UpdateProduct) else {
            return Dispatch::Busy(Action::UpdateProduct);
        };
        let draft = self.state.lock().product_draft.clone();
        let Some(id) = draft.id else {
            warn!("Update requested with no product selected");
            return self.complete(Feedback::error(NO_PRODUCT_SELECTED));
        };

        match self.products.get_by_key(id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                warn!(product_id = %id, "Product missing before update");
                return self.complete(Feedback::error(PRODUCT_MISSING));
            }
            Err(e) => {
                warn!(product_id = %id, error = %e, "Existence check failed");
                return self.complete(Feedback::failure(&e));
            }
        }

        let feedback = match self.products.update_product(id, draft.to_patch()).await {
            Ok(Some(product)) => {
                info!(product_id = %product.id, "Product updated");
                self.reset_product_draft(Some(id));
                self.resync().await;
                Feedback::success(PRODUCT_UPDATED)
            }
            Ok(None) => {
                warn!(product_id = %id, "Product vanished before update was applied");
                Feedback::error(PRODUCT_MISSING)
            }
            Err(e) => {
                warn!(product_id = %id, error = %e, "Product update failed");
                Feedback::failure(&e)
            }
        };
        self.complete(feedback)
    }

    /// Deletes a product row. Allowed whether or not an edit session is active.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Dispatch {
        let Some(_flag) = self.claim(Action::DeleteProduct) else {
            return Dispatch::Busy(Action::DeleteProduct);
        };

        let feedback = match self.products.delete_by_key(id).await {
            Ok(count) => {
                info!(product_id = %id, count, "Product deleted");
                self.resync().await;
                Feedback::success(PRODUCT_DELETED)
            }
            Err(e) => {
                warn!(product_id = %id, error = %e, "Product delete failed");
                Feedback::failure(&e)
            }
        };
        self.complete(feedback)
    }

    // =========================================================================
    // View and edit session
    // =========================================================================

    pub fn select_view(&self, view: ViewMode) {
        debug!(?view, "View selected");
        self.state.lock().view = view;
    }

    /// Loads every field of `product`, id included, into the product buffer.
    pub fn begin_edit(&self, product: &Product) {
        info!(product_id = %product.id, "Editing product");
        self.state.lock().product_draft = ProductDraft::editing(product);
    }

    pub fn cancel_edit(&self) {
        let mut state = self.state.lock();
        if let Some(id) = state.product_draft.id {
            info!(product_id = %id, "Edit cancelled");
        }
        state.product_draft = ProductDraft::default();
    }

    /// Edits the product buffer in place. The buffer's id is not editable and is restored
    /// after `edit` runs.
    pub fn edit_product_draft(&self, edit: impl FnOnce(&mut ProductDraft)) {
        let mut state = self.state.lock();
        let id = state.product_draft.id;
        edit(&mut state.product_draft);
        state.product_draft.id = id;
    }

    pub fn edit_doctor_draft(&self, edit: impl FnOnce(&mut DoctorDraft)) {
        edit(&mut self.state.lock().doctor_draft);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn products(&self) -> Vec<Product> {
        self.state.lock().cache.clone()
    }

    pub fn product_draft(&self) -> ProductDraft {
        self.state.lock().product_draft.clone()
    }

    pub fn doctor_draft(&self) -> DoctorDraft {
        self.state.lock().doctor_draft.clone()
    }

    pub fn edit_session(&self) -> EditSession {
        match self.state.lock().product_draft.id {
            Some(id) => EditSession::Active(id),
            None => EditSession::Inactive,
        }
    }

    pub fn view(&self) -> ViewMode {
        self.state.lock().view
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.state.lock().feedback.clone()
    }

    pub fn is_in_flight(&self, action: Action) -> bool {
        self.state.lock().in_flight.contains(&action)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn claim(&self, action: Action) -> Option<InFlight<'_>> {
        let mut state = self.state.lock();
        if !state.in_flight.insert(action) {
            debug!(?action, "Action already in flight");
            return None;
        }
        Some(InFlight {
            state: &self.state,
            action,
        })
    }

    /// Clears the product buffer, unless another row was selected while the call was out.
    fn reset_product_draft(&self, selected: Option<ProductId>) {
        let mut state = self.state.lock();
        if state.product_draft.id != selected {
            debug!(current = ?state.product_draft.id, "Selection changed in flight, keeping buffer");
            return;
        }
        state.product_draft = ProductDraft::default();
    }

    fn complete(&self, feedback: Feedback) -> Dispatch {
        self.state.lock().feedback = Some(feedback.clone());
        Dispatch::Completed(feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::FeedbackKind;
    use crate::model::Doctor;
    use record_gateway::mock::MockGateway;
    use record_gateway::GatewayError;
    use rust_decimal::Decimal;

    fn product(id: u32, name: &str) -> Product {
        Product {
            id: ProductId(id),
            name: name.into(),
            price: Decimal::new(1250, 2),
            description: "boxed".into(),
            quantity: 4,
            product_image: "http://x/img.png".into(),
        }
    }

    fn dashboard(products: &MockGateway<Product>, doctors: &MockGateway<Doctor>) -> Dashboard {
        Dashboard::new(
            ProductClient::new(products.client()),
            DoctorClient::new(doctors.client()),
        )
    }

    #[tokio::test]
    async fn test_update_without_selection_sends_nothing() {
        let products = MockGateway::<Product>::new();
        let doctors = MockGateway::<Doctor>::new();
        let dashboard = dashboard(&products, &doctors);

        let outcome = dashboard.update_product().await;

        assert_eq!(
            outcome,
            Dispatch::Completed(Feedback::error(NO_PRODUCT_SELECTED))
        );
        assert!(products.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_of_missing_product_skips_the_write() {
        let mut products = MockGateway::<Product>::new();
        let doctors = MockGateway::<Doctor>::new();
        products
            .expect_list_all()
            .return_ok(vec![product(1, "Gauze")]);
        products.expect_get_by_key(ProductId(1)).return_ok(None);

        let dashboard = dashboard(&products, &doctors);
        dashboard.load().await.unwrap();
        dashboard.begin_edit(&product(1, "Gauze"));

        let outcome = dashboard.update_product().await;

        assert_eq!(outcome, Dispatch::Completed(Feedback::error(PRODUCT_MISSING)));
        assert_eq!(products.calls(), vec!["list_all", "get_by_key"]);
        assert_eq!(dashboard.products(), vec![product(1, "Gauze")]);
        assert_eq!(dashboard.edit_session(), EditSession::Active(ProductId(1)));
        products.verify();
    }

    #[tokio::test]
    async fn test_conditional_update_miss_reports_missing_product() {
        let mut products = MockGateway::<Product>::new();
        let doctors = MockGateway::<Doctor>::new();
        products
            .expect_get_by_key(ProductId(2))
            .return_ok(Some(product(2, "Tape")));
        products.expect_update_by_key(ProductId(2)).return_ok(None);

        let dashboard = dashboard(&products, &doctors);
        dashboard.begin_edit(&product(2, "Tape"));
        let outcome = dashboard.update_product().await;

        assert_eq!(outcome, Dispatch::Completed(Feedback::error(PRODUCT_MISSING)));
        assert_eq!(dashboard.edit_session(), EditSession::Active(ProductId(2)));
        products.verify();
    }

    #[tokio::test]
    async fn test_successful_update_clears_session_and_refreshes() {
        let mut products = MockGateway::<Product>::new();
        let doctors = MockGateway::<Doctor>::new();
        products
            .expect_get_by_key(ProductId(2))
            .return_ok(Some(product(2, "Tape")));
        products
            .expect_update_by_key(ProductId(2))
            .return_ok(Some(product(2, "Wide tape")));
        products
            .expect_list_all()
            .return_ok(vec![product(2, "Wide tape")]);

        let dashboard = dashboard(&products, &doctors);
        dashboard.begin_edit(&product(2, "Tape"));
        dashboard.edit_product_draft(|draft| draft.name = "Wide tape".into());
        let outcome = dashboard.update_product().await;

        assert_eq!(outcome, Dispatch::Completed(Feedback::success(PRODUCT_UPDATED)));
        assert_eq!(dashboard.edit_session(), EditSession::Inactive);
        assert_eq!(dashboard.product_draft(), ProductDraft::default());
        assert_eq!(dashboard.products()[0].name, "Wide tape");
        assert_eq!(
            products.calls(),
            vec!["get_by_key", "update_by_key", "list_all"]
        );
        products.verify();
    }

    #[tokio::test]
    async fn test_failed_update_keeps_buffer() {
        let mut products = MockGateway::<Product>::new();
        let doctors = MockGateway::<Doctor>::new();
        products
            .expect_get_by_key(ProductId(2))
            .return_ok(Some(product(2, "Tape")));
        products
            .expect_update_by_key(ProductId(2))
            .return_err(GatewayError::Unavailable("timeout".into()));

        let dashboard = dashboard(&products, &doctors);
        dashboard.begin_edit(&product(2, "Tape"));
        let outcome = dashboard.update_product().await;

        let feedback = outcome.feedback().unwrap();
        assert_eq!(feedback.text, "Error: Service unavailable: timeout");
        assert_eq!(feedback.kind, FeedbackKind::Error);
        assert_eq!(dashboard.product_draft().name, "Tape");
        assert_eq!(dashboard.edit_session(), EditSession::Active(ProductId(2)));
    }

    #[tokio::test]
    async fn test_existence_check_failure_aborts_update() {
        let mut products = MockGateway::<Product>::new();
        let doctors = MockGateway::<Doctor>::new();
        products
            .expect_get_by_key(ProductId(2))
            .return_err(GatewayError::Unavailable("down".into()));

        let dashboard = dashboard(&products, &doctors);
        dashboard.begin_edit(&product(2, "Tape"));
        let outcome = dashboard.update_product().await;

        assert_eq!(
            outcome.feedback().map(|f| f.text.as_str()),
            Some("Error: Service unavailable: down")
        );
        assert_eq!(products.calls(), vec!["get_by_key"]);
    }

    #[tokio::test]
    async fn test_add_while_editing_strips_id_and_clears_session() {
        let mut products = MockGateway::<Product>::new();
        let doctors = MockGateway::<Doctor>::new();
        products.expect_insert().return_ok(product(5, "Tape"));
        products
            .expect_list_all()
            .return_ok(vec![product(2, "Tape"), product(5, "Tape")]);

        let dashboard = dashboard(&products, &doctors);
        dashboard.begin_edit(&product(2, "Tape"));
        let outcome = dashboard.add_product().await;

        assert_eq!(outcome, Dispatch::Completed(Feedback::success(PRODUCT_ADDED)));
        assert_eq!(dashboard.edit_session(), EditSession::Inactive);
        assert_eq!(dashboard.products().len(), 2);
        products.verify();
    }

    #[tokio::test]
    async fn test_rejected_add_keeps_buffer_and_skips_refresh() {
        let mut products = MockGateway::<Product>::new();
        let doctors = MockGateway::<Doctor>::new();
        products
            .expect_insert()
            .return_err(GatewayError::rejected("duplicate product name"));

        let dashboard = dashboard(&products, &doctors);
        dashboard.edit_product_draft(|draft| draft.name = "Gauze".into());
        let outcome = dashboard.add_product().await;

        assert_eq!(
            outcome,
            Dispatch::Completed(Feedback::error("Error: duplicate product name"))
        );
        assert_eq!(dashboard.product_draft().name, "Gauze");
        assert_eq!(products.calls(), vec!["insert"]);
        products.verify();
    }

    #[tokio::test]
    async fn test_refresh_failure_after_delete_keeps_success_feedback() {
        let mut products = MockGateway::<Product>::new();
        let doctors = MockGateway::<Doctor>::new();
        products
            .expect_list_all()
            .return_ok(vec![product(1, "Gauze"), product(2, "Tape")]);
        products.expect_delete_by_key(ProductId(1)).return_ok(1);
        products
            .expect_list_all()
            .return_err(GatewayError::Unavailable("timeout".into()));

        let dashboard = dashboard(&products, &doctors);
        dashboard.load().await.unwrap();
        let outcome = dashboard.delete_product(ProductId(1)).await;

        assert_eq!(outcome, Dispatch::Completed(Feedback::success(PRODUCT_DELETED)));
        assert_eq!(dashboard.products().len(), 2);
        products.verify();
    }

    #[tokio::test]
    async fn test_delete_of_missing_key_reports_success() {
        let mut products = MockGateway::<Product>::new();
        let doctors = MockGateway::<Doctor>::new();
        products.expect_delete_by_key(ProductId(9)).return_ok(0);
        products.expect_list_all().return_ok(vec![]);

        let dashboard = dashboard(&products, &doctors);
        let outcome = dashboard.delete_product(ProductId(9)).await;

        assert_eq!(outcome, Dispatch::Completed(Feedback::success(PRODUCT_DELETED)));
        products.verify();
    }

    #[tokio::test]
    async fn test_load_failure_is_surfaced() {
        let mut products = MockGateway::<Product>::new();
        let doctors = MockGateway::<Doctor>::new();
        products
            .expect_list_all()
            .return_err(GatewayError::Unavailable("refused".into()));

        let dashboard = dashboard(&products, &doctors);
        assert!(dashboard.load().await.is_err());

        let feedback = dashboard.feedback().unwrap();
        assert!(feedback.is_error());
        assert_eq!(feedback.text, "Error: Service unavailable: refused");
        assert!(dashboard.products().is_empty());
    }

    #[tokio::test]
    async fn test_doctor_failure_keeps_buffer() {
        let products = MockGateway::<Product>::new();
        let mut doctors = MockGateway::<Doctor>::new();
        doctors
            .expect_insert()
            .return_err(GatewayError::Unavailable("timeout".into()));

        let dashboard = dashboard(&products, &doctors);
        dashboard.edit_doctor_draft(|draft| {
            draft.name = "Dr. Ada".into();
            draft.email = "ada@clinic.test".into();
        });
        let outcome = dashboard.add_doctor().await;

        assert!(outcome.feedback().unwrap().is_error());
        assert_eq!(dashboard.doctor_draft().name, "Dr. Ada");
        assert!(!dashboard.is_in_flight(Action::AddDoctor));
        doctors.verify();
    }

    #[tokio::test]
    async fn test_edit_product_draft_cannot_change_the_id() {
        let products = MockGateway::<Product>::new();
        let doctors = MockGateway::<Doctor>::new();
        let dashboard = dashboard(&products, &doctors);

        dashboard.begin_edit(&product(3, "Gauze"));
        dashboard.edit_product_draft(|draft| {
            draft.id = Some(ProductId(99));
            draft.quantity = 7;
        });

        assert_eq!(dashboard.edit_session(), EditSession::Active(ProductId(3)));
        assert_eq!(dashboard.product_draft().quantity, 7);
    }

    #[tokio::test]
    async fn test_view_change_keeps_edit_session() {
        let products = MockGateway::<Product>::new();
        let doctors = MockGateway::<Doctor>::new();
        let dashboard = dashboard(&products, &doctors);

        assert_eq!(dashboard.view(), ViewMode::Products);
        dashboard.begin_edit(&product(3, "Gauze"));
        dashboard.select_view(ViewMode::Doctors);

        assert_eq!(dashboard.view(), ViewMode::Doctors);
        assert_eq!(dashboard.edit_session(), EditSession::Active(ProductId(3)));

        dashboard.cancel_edit();
        assert!(!dashboard.edit_session().is_active());
        assert_eq!(dashboard.product_draft(), ProductDraft::default());
    }
}
