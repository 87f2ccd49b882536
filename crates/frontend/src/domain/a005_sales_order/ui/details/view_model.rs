//! ViewModel of the sales order form: header fields, the division cascade
//! and the save command. Lines are handled by their own grid.

use super::cascade::{DivisionLoads, HeaderCascade};
use super::model::{saved_message, SalesOrderForm};
use crate::domain::a001_division::api as division_api;
use crate::domain::a002_so_type::api as so_type_api;
use crate::domain::a003_customer::api as customer_api;
use crate::domain::a005_sales_order::api;
use crate::shared::api_utils::{use_api, ApiClient};
use crate::shared::config::AppConfig;
use crate::shared::date_utils::today;
use crate::shared::lifecycle::Liveness;
use crate::shared::notifications::{use_notifications, NotificationService};
use contracts::domain::common::RecordId;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct SalesOrderDetailsVm {
    pub form: RwSignal<SalesOrderForm>,
    pub cascade: RwSignal<HeaderCascade>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    /// Edit mode asked for an id the server does not know
    pub not_found: RwSignal<bool>,
    api: StoredValue<ApiClient>,
    config: StoredValue<AppConfig>,
    alive: StoredValue<Liveness>,
    notify: NotificationService,
}

impl SalesOrderDetailsVm {
    pub fn new() -> Self {
        let config = use_context::<AppConfig>().expect("AppConfig not provided");
        Self {
            form: RwSignal::new(SalesOrderForm::new_order(today())),
            cascade: RwSignal::new(HeaderCascade::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            not_found: RwSignal::new(false),
            api: StoredValue::new(use_api()),
            config: StoredValue::new(config),
            alive: StoredValue::new(Liveness::for_current_owner()),
            notify: use_notifications(),
        }
    }

    /// Id of the stored order, `None` until the first save
    pub fn order_id(&self) -> Memo<Option<RecordId>> {
        let form = self.form;
        Memo::new(move |_| form.with(|f| f.id.non_zero()))
    }

    pub fn is_edit_mode(&self) -> Signal<bool> {
        let form = self.form;
        Signal::derive(move || form.with(|f| !f.is_new()))
    }

    pub fn load_divisions(&self) {
        let Some(ticket) = self.cascade.try_update(|c| c.load_divisions()).flatten() else {
            return;
        };
        let vm = *self;
        let api = self.api.get_value();
        let alive = self.alive.get_value();
        spawn_local(async move {
            let result = division_api::fetch_divisions(&api).await;
            if !alive.is_alive() {
                return;
            }
            match result {
                Ok(rows) => {
                    vm.cascade.update(|c| {
                        c.division.resolve(ticket, rows);
                    });
                }
                Err(e) => {
                    vm.cascade.update(|c| {
                        c.division.fail(ticket);
                    });
                    vm.notify.error(e.user_message("Error fetching divisions"));
                }
            }
        });
    }

    /// Loads a stored order into the form and its dependent options
    pub fn load(&self, id: RecordId) {
        let vm = *self;
        let api = self.api.get_value();
        let alive = self.alive.get_value();
        vm.form.set(SalesOrderForm::for_existing(id, today()));
        vm.loading.set(true);
        spawn_local(async move {
            let result = api::fetch_master(&api, id).await;
            if !alive.is_alive() {
                return;
            }
            vm.loading.set(false);
            match result {
                Ok(Some(master)) => {
                    let form = SalesOrderForm::from_master(&master, today());
                    let loads = vm.cascade.try_update(|c| {
                        c.prime(form.division_id, form.so_type_id, form.customer_id)
                    });
                    vm.form.set(form);
                    if let Some(loads) = loads {
                        vm.run_division_loads(loads);
                    }
                }
                Ok(None) => {
                    vm.not_found.set(true);
                    vm.notify.error("Record not found");
                }
                Err(e) => vm.notify.error(e.user_message("Error fetching sales order")),
            }
        });
    }

    fn run_division_loads(&self, loads: DivisionLoads) {
        let vm = *self;
        if let Some(ticket) = loads.so_types {
            let api = self.api.get_value();
            let alive = self.alive.get_value();
            spawn_local(async move {
                let result = so_type_api::fetch_so_types(&api, Some(*ticket.key())).await;
                if !alive.is_alive() {
                    return;
                }
                match result {
                    Ok(rows) => {
                        vm.cascade.update(|c| {
                            c.so_type.resolve(ticket, rows);
                        });
                    }
                    Err(e) => {
                        if vm.cascade.try_update(|c| c.so_type.fail(ticket)).unwrap_or(false) {
                            vm.notify.error(e.user_message("Error fetching SO types"));
                        }
                    }
                }
            });
        }
        if let Some(ticket) = loads.customers {
            let api = self.api.get_value();
            let alive = self.alive.get_value();
            spawn_local(async move {
                let result = customer_api::fetch_customers(&api, Some(*ticket.key())).await;
                if !alive.is_alive() {
                    return;
                }
                match result {
                    Ok(rows) => {
                        vm.cascade.update(|c| {
                            c.customer.resolve(ticket, rows);
                        });
                    }
                    Err(e) => {
                        if vm.cascade.try_update(|c| c.customer.fail(ticket)).unwrap_or(false) {
                            vm.notify.error(e.user_message("Error fetching customers"));
                        }
                    }
                }
            });
        }
    }

    pub fn set_so_date(&self, value: String) {
        self.form.update(|f| f.so_date = value);
    }

    /// Clears SO type and customer in the same update as the division
    pub fn select_division(&self, id: Option<RecordId>) {
        let Some(loads) = self.cascade.try_update(|c| c.select_division(id)) else {
            return;
        };
        let division_id = self.cascade.with_untracked(|c| c.division.selected());
        self.form.update(|f| {
            f.division_id = division_id;
            f.so_type_id = None;
            f.customer_id = None;
        });
        self.run_division_loads(loads);
    }

    pub fn select_so_type(&self, id: Option<RecordId>) {
        let selected = self
            .cascade
            .try_update(|c| {
                c.select_so_type(id);
                c.so_type.selected()
            })
            .flatten();
        self.form.update(|f| f.so_type_id = selected);
    }

    pub fn select_customer(&self, id: Option<RecordId>) {
        let selected = self
            .cascade
            .try_update(|c| {
                c.select_customer(id);
                c.customer.selected()
            })
            .flatten();
        self.form.update(|f| f.customer_id = selected);
    }

    pub fn save(&self) {
        if self.saving.get_untracked() {
            return;
        }
        let form = self.form.get_untracked();
        let header = form.to_header();
        if let Err(e) = header.validate() {
            self.notify.error(e.to_string());
            return;
        }

        let vm = *self;
        let api = self.api.get_value();
        let alive = self.alive.get_value();
        let session = self.config.with_value(|c| c.session_ids());
        vm.saving.set(true);
        spawn_local(async move {
            let result = api::save_master(&api, &header, session).await;
            if !alive.is_alive() {
                return;
            }
            vm.saving.set(false);
            match result {
                Ok(saved) => {
                    vm.form.update(|f| f.apply_saved(&saved));
                    let so_no = vm.form.with_untracked(|f| f.so_no.clone());
                    log::info!("sales order {} saved as #{}", saved.id, so_no);
                    vm.notify.success(saved_message(&so_no, form.is_new()));
                }
                Err(e) => vm.notify.error(e.user_message(api::SAVE_FALLBACK)),
            }
        });
    }
}
