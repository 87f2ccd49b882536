use super::cascade::{ItemCascade, ItemLoad};
use crate::domain::a004_item_catalog::api as catalog_api;
use crate::domain::a006_sales_order_line::api;
use crate::shared::api_utils::{use_api, ApiClient};
use crate::shared::cascade::LoadTicket;
use crate::shared::lifecycle::Liveness;
use crate::shared::notifications::{use_notifications, NotificationService};
use crate::shared::row_editor::{CommitStart, DraftEditor, DraftRow};
use contracts::domain::a006_sales_order_line::{total_amount, SalesOrderLine};
use contracts::domain::common::RecordId;
use leptos::prelude::*;
use leptos::task::spawn_local;

impl DraftRow for SalesOrderLine {
    type Id = RecordId;

    fn blank() -> Self {
        SalesOrderLine::blank()
    }

    fn draft_id(&self) -> RecordId {
        self.id
    }
}

/// State of the line grid of one sales order
#[derive(Clone, Copy)]
pub struct LinesGridVm {
    pub so_id: RecordId,
    pub editable: bool,
    pub lines: RwSignal<Vec<SalesOrderLine>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub editor: RwSignal<DraftEditor<SalesOrderLine>>,
    pub cascade: RwSignal<ItemCascade>,
    /// Line waiting for delete confirmation
    pub delete_target: RwSignal<Option<SalesOrderLine>>,
    pub deleting: RwSignal<bool>,
    load_generation: StoredValue<u64>,
    api: StoredValue<ApiClient>,
    alive: StoredValue<Liveness>,
    notify: NotificationService,
}

impl LinesGridVm {
    pub fn new(so_id: RecordId, editable: bool) -> Self {
        let vm = Self {
            so_id,
            editable,
            lines: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            editor: RwSignal::new(DraftEditor::new()),
            cascade: RwSignal::new(ItemCascade::new()),
            delete_target: RwSignal::new(None),
            deleting: RwSignal::new(false),
            load_generation: StoredValue::new(0),
            api: StoredValue::new(use_api()),
            alive: StoredValue::new(Liveness::for_current_owner()),
            notify: use_notifications(),
        };

        vm.refresh();
        if editable {
            vm.load_main_groups();
        }
        vm
    }

    pub fn total(&self) -> Signal<f64> {
        let lines = self.lines;
        Signal::derive(move || lines.with(|l| total_amount(l)))
    }

    pub fn can_add(&self) -> bool {
        self.editable && self.editor.with(|e| e.can_add())
    }

    pub fn is_saving(&self) -> bool {
        self.editor.with(|e| e.is_saving())
    }

    /// Refetches the lines; an older refetch still in flight is ignored
    pub fn refresh(&self) {
        let generation = self.load_generation.get_value() + 1;
        self.load_generation.set_value(generation);

        let vm = *self;
        let api = self.api.get_value();
        let alive = self.alive.get_value();
        vm.loading.set(true);
        vm.error.set(None);

        spawn_local(async move {
            let result = api::fetch_lines(&api, vm.so_id).await;
            if !alive.is_alive() || vm.load_generation.get_value() != generation {
                log::debug!("dropping stale lines of order {}", vm.so_id);
                return;
            }
            match result {
                Ok(lines) => vm.lines.set(lines),
                Err(e) => {
                    let message = e.user_message("Error fetching order details");
                    vm.lines.set(Vec::new());
                    vm.error.set(Some(message.clone()));
                    vm.notify.error(message);
                }
            }
            vm.loading.set(false);
        });
    }

    fn load_main_groups(&self) {
        let Some(ticket) = self.cascade.try_update(|c| c.load_main_groups()).flatten() else {
            return;
        };
        let vm = *self;
        let api = self.api.get_value();
        let alive = self.alive.get_value();
        spawn_local(async move {
            let result = catalog_api::fetch_main_groups(&api).await;
            if alive.is_alive() {
                vm.finish_load(ticket, result, "Error fetching main groups", |c| &mut c.main_group);
            }
        });
    }

    fn run_load(&self, load: ItemLoad) {
        let vm = *self;
        let api = self.api.get_value();
        let alive = self.alive.get_value();
        spawn_local(async move {
            match load {
                ItemLoad::SubMainGroups(ticket) => {
                    let result = catalog_api::fetch_sub_main_groups(&api, Some(*ticket.key())).await;
                    if alive.is_alive() {
                        vm.finish_load(ticket, result, "Error fetching sub main groups", |c| {
                            &mut c.sub_main_group
                        });
                    }
                }
                ItemLoad::Items(ticket) => {
                    let (main, sub) = *ticket.key();
                    let result = catalog_api::fetch_items(&api, Some(main), Some(sub)).await;
                    if alive.is_alive() {
                        vm.finish_load(ticket, result, "Error fetching items", |c| &mut c.item);
                    }
                }
                ItemLoad::Units(ticket) => {
                    let result = catalog_api::fetch_units(&api, Some(*ticket.key())).await;
                    if alive.is_alive() {
                        vm.finish_load(ticket, result, "Error fetching units", |c| &mut c.unit);
                    }
                }
            }
        });
    }

    /// Feeds a fetch outcome into one link of the cascade
    fn finish_load<K, T>(
        &self,
        ticket: LoadTicket<K>,
        result: Result<Vec<T>, contracts::shared::api::ApiError>,
        action: &str,
        link: impl FnOnce(&mut ItemCascade) -> &mut crate::shared::cascade::CascadeLink<K, T>,
    ) where
        K: Eq + std::hash::Hash + Clone + std::fmt::Debug,
        T: contracts::domain::common::SelectOption,
    {
        match result {
            Ok(rows) => {
                self.cascade.update(|c| {
                    link(c).resolve(ticket, rows);
                });
            }
            Err(e) => {
                let current = self.cascade.try_update(|c| link(c).fail(ticket)).unwrap_or(false);
                if current {
                    self.notify.error(e.user_message(action));
                }
            }
        }
    }

    pub fn start_new(&self) {
        if !self.editable {
            return;
        }
        let started = self.editor.try_update(|e| e.start_new()).unwrap_or(false);
        if started {
            self.cascade.update(|c| c.clear());
        }
    }

    pub fn start_edit(&self, line: SalesOrderLine) {
        if !self.editable {
            return;
        }
        let started = self.editor.try_update(|e| e.start_edit(&line)).unwrap_or(false);
        if !started {
            return;
        }
        let loads = self.cascade.try_update(|c| c.preload(&line)).unwrap_or_default();
        for load in loads {
            self.run_load(load);
        }
    }

    fn sync_draft(&self) {
        let editor = self.editor;
        self.cascade.with_untracked(|c| {
            editor.update(|e| {
                e.edit(|row| c.apply_to(row));
            });
        });
    }

    fn change_level(&self, change: impl FnOnce(&mut ItemCascade) -> Option<ItemLoad>) {
        if !self.editor.with_untracked(|e| e.can_cancel()) {
            return;
        }
        let load = self.cascade.try_update(change).flatten();
        self.sync_draft();
        if let Some(load) = load {
            self.run_load(load);
        }
    }

    pub fn select_main_group(&self, id: Option<RecordId>) {
        self.change_level(|c| c.select_main_group(id));
    }

    pub fn select_sub_main_group(&self, id: Option<RecordId>) {
        self.change_level(|c| c.select_sub_main_group(id));
    }

    pub fn select_item(&self, id: Option<RecordId>) {
        self.change_level(|c| c.select_item(id));
    }

    pub fn select_unit(&self, id: Option<RecordId>) {
        self.change_level(|c| {
            c.select_unit(id);
            None
        });
    }

    pub fn set_qty(&self, qty: f64) {
        self.editor.update(|e| {
            e.edit(|row| row.set_qty(qty));
        });
    }

    pub fn set_rate(&self, rate: f64) {
        self.editor.update(|e| {
            e.edit(|row| row.set_rate(rate));
        });
    }

    /// Validates against the loaded siblings, then saves. Nothing is sent
    /// when validation fails; a failed save keeps the draft as typed.
    pub fn commit(&self) {
        let siblings = self.lines.get_untracked();
        let outcome = self
            .editor
            .try_update(|e| e.try_commit(|row| row.validate_against(&siblings)));

        let row = match outcome {
            Some(CommitStart::Started(row)) => row,
            Some(CommitStart::Rejected(e)) => {
                self.notify.error(e.to_string());
                return;
            }
            Some(CommitStart::NotDrafting) | None => return,
        };

        let vm = *self;
        let api = self.api.get_value();
        let alive = self.alive.get_value();
        spawn_local(async move {
            let result = api::save_line(&api, &row, vm.so_id).await;
            if !alive.is_alive() {
                return;
            }
            match result {
                Ok(()) => {
                    vm.notify.success(if row.id.is_new() {
                        "Item added successfully!"
                    } else {
                        "Record saved successfully!"
                    });
                    vm.editor.update(|e| e.commit_succeeded());
                    vm.cascade.update(|c| c.clear());
                    vm.refresh();
                }
                Err(e) => {
                    vm.editor.update(|ed| ed.commit_failed());
                    vm.notify.error(e.user_message(api::SAVE_FALLBACK));
                }
            }
        });
    }

    pub fn cancel(&self) {
        let cancelled = self.editor.try_update(|e| e.cancel()).unwrap_or(false);
        if cancelled {
            self.cascade.update(|c| c.clear());
        }
    }

    pub fn request_delete(&self, line: SalesOrderLine) {
        if self.editable && !self.deleting.get_untracked() {
            self.delete_target.set(Some(line));
        }
    }

    pub fn cancel_delete(&self) {
        if !self.deleting.get_untracked() {
            self.delete_target.set(None);
        }
    }

    pub fn confirm_delete(&self) {
        if self.deleting.get_untracked() {
            return;
        }
        let Some(line) = self.delete_target.get_untracked() else {
            return;
        };

        let vm = *self;
        let api = self.api.get_value();
        let alive = self.alive.get_value();
        vm.deleting.set(true);
        spawn_local(async move {
            let result = api::delete_line(&api, line.id).await;
            if !alive.is_alive() {
                return;
            }
            vm.deleting.set(false);
            match result {
                Ok(()) => {
                    vm.delete_target.set(None);
                    vm.notify.success("Item deleted successfully!");
                    vm.refresh();
                }
                Err(e) => vm.notify.error(e.user_message(api::DELETE_FALLBACK)),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a006_sales_order_line::LineValidationError;

    fn stored_line() -> SalesOrderLine {
        let mut line = SalesOrderLine {
            id: RecordId(11),
            main_group_id: Some(RecordId(1)),
            sub_main_group_id: Some(RecordId(2)),
            item_id: Some(RecordId(5)),
            unit_id: Some(RecordId(9)),
            ..SalesOrderLine::blank()
        };
        line.set_qty(3.0);
        line.set_rate(10.5);
        line
    }

    #[test]
    fn test_editing_a_line_draft_keeps_amount_current() {
        let mut editor: DraftEditor<SalesOrderLine> = DraftEditor::new();
        editor.start_edit(&stored_line());
        assert!(editor.is_editing(&RecordId(11)));

        editor.edit(|row| row.set_qty(4.0));
        assert_eq!(editor.draft().map(|r| r.amount), Some(42.0));
    }

    #[test]
    fn test_blank_line_draft_is_rejected() {
        let mut editor: DraftEditor<SalesOrderLine> = DraftEditor::new();
        editor.start_new();
        assert_eq!(editor.mode(), Some(&crate::shared::row_editor::DraftMode::New));
        assert_eq!(
            editor.try_commit(SalesOrderLine::validate),
            CommitStart::Rejected(LineValidationError::MissingFields)
        );
        assert!(editor.can_cancel());
    }
}
