use super::view_model::SalesOrderDetailsVm;
use crate::domain::a006_sales_order_line::ui::grid::LinesGrid;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::ui::{select_options, Input, Select};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DETAIL};
use contracts::domain::common::RecordId;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::*;

/// Create (`id = None`) or edit form of one sales order with its lines
#[component]
pub fn SalesOrderDetails(id: Option<RecordId>) -> impl IntoView {
    let vm = SalesOrderDetailsVm::new();
    vm.load_divisions();
    if let Some(id) = id {
        vm.load(id);
    }

    let order_id = vm.order_id();
    let is_edit = vm.is_edit_mode();
    let title = Signal::derive(move || {
        if is_edit.get() {
            "Edit Sales Order".to_string()
        } else {
            "New Sales Order".to_string()
        }
    });

    view! {
        <PageFrame page_id="a005_sales_order--detail" category=PAGE_CAT_DETAIL>
            <Header vm=vm title=title />

            <Show
                when=move || !vm.not_found.get()
                fallback=|| view! {
                    <MessageBar intent=MessageBarIntent::Error>"Record not found"</MessageBar>
                }
            >
                <Show when=move || vm.loading.get()>
                    <div class="page__loading">
                        <Spinner label="Loading sales order..." />
                    </div>
                </Show>

                <HeaderForm vm=vm />

                {move || match order_id.get() {
                    Some(so_id) => view! { <LinesGrid so_id=so_id editable=true /> }.into_any(),
                    None => view! {
                        <div class="lines-grid__hint">"Save the order to add items."</div>
                    }
                    .into_any(),
                }}
            </Show>
        </PageFrame>
    }
}

#[component]
fn Header(vm: SalesOrderDetailsVm, title: Signal<String>) -> impl IntoView {
    let navigate = use_navigate();

    view! {
        <PageHeader title=title>
            <Button
                appearance=ButtonAppearance::Primary
                disabled=Signal::derive(move || vm.saving.get() || vm.loading.get() || vm.not_found.get())
                on_click=move |_| vm.save()
            >
                {icon("save")}
                {move || if vm.saving.get() { " Saving..." } else { " Save" }}
            </Button>
            <Button
                appearance=ButtonAppearance::Secondary
                on_click=move |_| navigate("/", Default::default())
            >
                {icon("arrow-left")}
                " Back"
            </Button>
        </PageHeader>
    }
}

#[component]
fn HeaderForm(vm: SalesOrderDetailsVm) -> impl IntoView {
    let busy = Signal::derive(move || vm.saving.get() || vm.loading.get());

    let division_options =
        Signal::derive(move || vm.cascade.with(|c| select_options(c.division.options())));
    let so_type_options =
        Signal::derive(move || vm.cascade.with(|c| select_options(c.so_type.options())));
    let customer_options =
        Signal::derive(move || vm.cascade.with(|c| select_options(c.customer.options())));

    view! {
        <div class="form form--grid">
            <Input
                label="SO Number"
                value=Signal::derive(move || vm.form.with(|f| f.so_no_display()))
                readonly=true
            />
            <Input
                label="SO Date"
                input_type="date"
                required=true
                value=Signal::derive(move || vm.form.with(|f| f.so_date.clone()))
                on_input=Callback::new(move |v: String| vm.set_so_date(v))
                disabled=busy
            />
            <Select
                label="Division"
                required=true
                placeholder="Select division"
                value=Signal::derive(move || vm.form.with(|f| f.division_id))
                options=division_options
                on_change=Callback::new(move |id| vm.select_division(id))
                loading=Signal::derive(move || vm.cascade.with(|c| c.division.is_loading()))
                disabled=Signal::derive(move || {
                    busy.get() || vm.cascade.with(|c| c.division.is_disabled())
                })
            />
            <Select
                label="SO Type"
                required=true
                placeholder="Select SO type"
                value=Signal::derive(move || vm.form.with(|f| f.so_type_id))
                options=so_type_options
                on_change=Callback::new(move |id| vm.select_so_type(id))
                loading=Signal::derive(move || vm.cascade.with(|c| c.so_type.is_loading()))
                disabled=Signal::derive(move || {
                    busy.get() || vm.cascade.with(|c| c.so_type.is_disabled())
                })
            />
            <Select
                label="Customer"
                required=true
                placeholder="Select customer"
                value=Signal::derive(move || vm.form.with(|f| f.customer_id))
                options=customer_options
                on_change=Callback::new(move |id| vm.select_customer(id))
                loading=Signal::derive(move || vm.cascade.with(|c| c.customer.is_loading()))
                disabled=Signal::derive(move || {
                    busy.get() || vm.cascade.with(|c| c.customer.is_disabled())
                })
            />
        </div>
    }
}
