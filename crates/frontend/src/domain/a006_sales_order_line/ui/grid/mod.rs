pub mod cascade;
pub mod view_model;

use crate::shared::components::table::{format_money, format_plain, TableCellMoney};
use crate::shared::components::ui::{select_options, NumberInput, Select};
use crate::shared::icons::icon;
use crate::shared::modal::ConfirmDialog;
use crate::shared::row_editor::DraftMode;
use contracts::domain::a006_sales_order_line::SalesOrderLine;
use contracts::domain::common::RecordId;
use leptos::prelude::*;
use thaw::*;
pub use view_model::LinesGridVm;

/// Lines of one sales order. Read-only grids show the stored lines and
/// the total; editable grids add inline add/edit/delete.
#[component]
pub fn LinesGrid(so_id: RecordId, #[prop(optional)] editable: bool) -> impl IntoView {
    let vm = LinesGridVm::new(so_id, editable);
    let total = vm.total();

    let new_row_open = move || vm.editor.with(|e| matches!(e.mode(), Some(DraftMode::New)));
    let has_rows = move || !vm.lines.with(|l| l.is_empty()) || new_row_open();

    view! {
        <div class="lines-grid">
            <div class="lines-grid__toolbar">
                <h3 class="lines-grid__title">"Items"</h3>
                <Show when=move || editable>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || !vm.can_add())
                        on_click=move |_| vm.start_new()
                    >
                        {icon("plus")}
                        " Add Item"
                    </Button>
                </Show>
                <Show when=move || vm.loading.get()>
                    <Spinner size=SpinnerSize::Tiny />
                </Show>
            </div>

            {move || vm.error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Table attr:class="lines-grid__table">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Main Group"</TableHeaderCell>
                        <TableHeaderCell>"Sub Main Group"</TableHeaderCell>
                        <TableHeaderCell>"Item"</TableHeaderCell>
                        <TableHeaderCell>"Unit"</TableHeaderCell>
                        <TableHeaderCell class="text-right">"Qty"</TableHeaderCell>
                        <TableHeaderCell class="text-right">"Rate"</TableHeaderCell>
                        <TableHeaderCell class="text-right">"Amount"</TableHeaderCell>
                        {editable.then(|| view! { <TableHeaderCell>"Actions"</TableHeaderCell> })}
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <Show when=new_row_open>
                        <DraftRowEditor vm=vm />
                    </Show>
                    // rebuilt on every refetch: a saved line keeps its id but not its values
                    {move || vm.lines.get().into_iter().map(|line| {
                        let id = line.id;
                        let editing = move || vm.editor.with(|e| e.is_editing(&id));
                        view! {
                            <Show
                                when=editing
                                fallback=move || view! { <StoredRow vm=vm line=line.clone() /> }
                            >
                                <DraftRowEditor vm=vm />
                            </Show>
                        }
                    }).collect_view()}
                    <Show when=move || !has_rows() && !vm.loading.get()>
                        <TableRow>
                            <TableCell attr:colspan=if editable { "8" } else { "7" }>
                                <span class="lines-grid__empty">"No items"</span>
                            </TableCell>
                        </TableRow>
                    </Show>
                    <TableRow class="lines-grid__total">
                        <TableCell attr:colspan="6">
                            <b>"Total"</b>
                        </TableCell>
                        <TableCellMoney value=Signal::derive(move || Some(total.get())) bold=true />
                        {editable.then(|| view! { <TableCell>""</TableCell> })}
                    </TableRow>
                </TableBody>
            </Table>

            <Show when=move || vm.delete_target.with(|t| t.is_some())>
                <ConfirmDialog
                    title="Delete Item"
                    message=vm
                        .delete_target
                        .with_untracked(|t| {
                            t.as_ref()
                                .map(|l| format!("Delete \"{}\" from this order?", l.item_name))
                                .unwrap_or_default()
                        })
                    busy=vm.deleting
                    on_confirm=Callback::new(move |_| vm.confirm_delete())
                    on_cancel=Callback::new(move |_| vm.cancel_delete())
                />
            </Show>
        </div>
    }
}

#[component]
fn StoredRow(vm: LinesGridVm, line: SalesOrderLine) -> impl IntoView {
    let idle = move || vm.editor.with(|e| e.is_idle()) && !vm.deleting.get();
    let for_edit = line.clone();
    let for_delete = line.clone();

    view! {
        <TableRow>
            <TableCell>{line.main_group.clone()}</TableCell>
            <TableCell>{line.sub_main_group.clone()}</TableCell>
            <TableCell>{line.item_name.clone()}</TableCell>
            <TableCell>{line.unit.clone()}</TableCell>
            <TableCell class="text-right">{format_plain(line.qty)}</TableCell>
            <TableCell class="text-right">{format_money(line.rate)}</TableCell>
            <TableCellMoney value=Some(line.amount) />
            {vm.editable.then(|| view! {
                <TableCell>
                    <div class="lines-grid__actions">
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            disabled=Signal::derive(move || !idle())
                            on_click=move |_| vm.start_edit(for_edit.clone())
                        >
                            {icon("edit")}
                        </Button>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            disabled=Signal::derive(move || !idle())
                            on_click=move |_| vm.request_delete(for_delete.clone())
                        >
                            {icon("trash")}
                        </Button>
                    </div>
                </TableCell>
            })}
        </TableRow>
    }
}

/// Inline editor for the open draft, new or existing
#[component]
fn DraftRowEditor(vm: LinesGridVm) -> impl IntoView {
    let saving = Signal::derive(move || vm.is_saving());
    let draft_value = move |f: fn(&SalesOrderLine) -> f64| {
        vm.editor.with(|e| e.draft().map(f).unwrap_or_default())
    };

    let main_opts = Signal::derive(move || vm.cascade.with(|c| select_options(c.main_group.options())));
    let sub_opts =
        Signal::derive(move || vm.cascade.with(|c| select_options(c.sub_main_group.options())));
    let item_opts = Signal::derive(move || vm.cascade.with(|c| select_options(c.item.options())));
    let unit_opts = Signal::derive(move || vm.cascade.with(|c| select_options(c.unit.options())));

    view! {
        <TableRow class="lines-grid__draft">
            <TableCell>
                <Select
                    value=Signal::derive(move || vm.cascade.with(|c| c.main_group.selected()))
                    options=main_opts
                    on_change=Callback::new(move |id| vm.select_main_group(id))
                    placeholder="Select main group"
                    loading=Signal::derive(move || vm.cascade.with(|c| c.main_group.is_loading()))
                    disabled=Signal::derive(move || {
                        saving.get() || vm.cascade.with(|c| c.main_group.is_disabled())
                    })
                />
            </TableCell>
            <TableCell>
                <Select
                    value=Signal::derive(move || vm.cascade.with(|c| c.sub_main_group.selected()))
                    options=sub_opts
                    on_change=Callback::new(move |id| vm.select_sub_main_group(id))
                    placeholder="Select sub main group"
                    loading=Signal::derive(move || vm.cascade.with(|c| c.sub_main_group.is_loading()))
                    disabled=Signal::derive(move || {
                        saving.get() || vm.cascade.with(|c| c.sub_main_group.is_disabled())
                    })
                />
            </TableCell>
            <TableCell>
                <Select
                    value=Signal::derive(move || vm.cascade.with(|c| c.item.selected()))
                    options=item_opts
                    on_change=Callback::new(move |id| vm.select_item(id))
                    placeholder="Select item"
                    loading=Signal::derive(move || vm.cascade.with(|c| c.item.is_loading()))
                    disabled=Signal::derive(move || {
                        saving.get() || vm.cascade.with(|c| c.item.is_disabled())
                    })
                />
            </TableCell>
            <TableCell>
                <Select
                    value=Signal::derive(move || vm.cascade.with(|c| c.unit.selected()))
                    options=unit_opts
                    on_change=Callback::new(move |id| vm.select_unit(id))
                    placeholder="Select unit"
                    loading=Signal::derive(move || vm.cascade.with(|c| c.unit.is_loading()))
                    disabled=Signal::derive(move || {
                        saving.get() || vm.cascade.with(|c| c.unit.is_disabled())
                    })
                />
            </TableCell>
            <TableCell>
                <NumberInput
                    value=Signal::derive(move || draft_value(|l| l.qty))
                    on_change=Callback::new(move |v| vm.set_qty(v))
                    disabled=saving
                />
            </TableCell>
            <TableCell>
                <NumberInput
                    value=Signal::derive(move || draft_value(|l| l.rate))
                    on_change=Callback::new(move |v| vm.set_rate(v))
                    disabled=saving
                    step="0.01"
                />
            </TableCell>
            <TableCellMoney value=Signal::derive(move || Some(draft_value(|l| l.amount))) />
            <TableCell>
                <div class="lines-grid__actions">
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Primary
                        disabled=saving
                        on_click=move |_| vm.commit()
                    >
                        {icon("save")}
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        disabled=saving
                        on_click=move |_| vm.cancel()
                    >
                        {icon("x")}
                    </Button>
                </div>
            </TableCell>
        </TableRow>
    }
}
