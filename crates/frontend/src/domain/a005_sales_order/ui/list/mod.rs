pub mod filters;
pub mod state;

use self::filters::{DateColumnFilter, NumberRangeFilter, TextColumnFilter};
use self::state::{create_state, COL_CUSTOMER, COL_ID, COL_SO_DATE, COL_SO_NO, COL_SO_TYPE};
use crate::domain::a005_sales_order::api;
use crate::domain::a006_sales_order_line::ui::grid::LinesGrid;
use crate::shared::api_utils::use_api;
use crate::shared::components::filter_panel::{FilterPanel, FilterTag};
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::config::AppConfig;
use crate::shared::date_utils::{format_date, to_input_value};
use crate::shared::icons::icon;
use crate::shared::lifecycle::Liveness;
use crate::shared::modal::ConfirmDialog;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use contracts::domain::a005_sales_order::{so_date_from_wire, SalesOrderMaster};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use std::sync::Arc;
use thaw::*;

const COLUMN_COUNT: &str = "7";

fn column_label(column: &str) -> &'static str {
    match column {
        COL_ID => "ID",
        COL_SO_NO => "SO No",
        COL_SO_DATE => "SO Date",
        COL_SO_TYPE => "SO Type",
        COL_CUSTOMER => "Customer",
        _ => "Column",
    }
}

/// `1/15/2024` from the server shown as `15.01.2024`
fn display_so_date(raw: &str) -> String {
    so_date_from_wire(raw)
        .map(|d| format_date(&to_input_value(d)))
        .unwrap_or_else(|| raw.to_string())
}

#[component]
pub fn SalesOrderList() -> impl IntoView {
    let config = use_context::<AppConfig>().expect("AppConfig not provided");
    let autocomplete_limit = config.ui.autocomplete_limit;
    let api = StoredValue::new(use_api());
    let notify = use_notifications();
    let alive = StoredValue::new(Liveness::for_current_owner());
    let navigate = use_navigate();

    let state = create_state();
    let masters = RwSignal::new(Vec::<SalesOrderMaster>::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let delete_target = RwSignal::new(None::<SalesOrderMaster>);
    let deleting = RwSignal::new(false);

    let fetch = move || {
        let api = api.get_value();
        let alive = alive.get_value();
        loading.set(true);
        spawn_local(async move {
            let result = api::fetch_masters(&api).await;
            if !alive.is_alive() {
                return;
            }
            loading.set(false);
            match result {
                Ok(rows) => {
                    log::debug!("loaded {} sales orders", rows.len());
                    masters.set(rows);
                    error.set(None);
                }
                Err(e) => {
                    let message = e.user_message("Error fetching sales orders");
                    masters.set(Vec::new());
                    error.set(Some(message.clone()));
                    notify.error(message);
                }
            }
        });
    };

    let confirm_delete = move || {
        if deleting.get_untracked() {
            return;
        }
        let Some(master) = delete_target.get_untracked() else {
            return;
        };
        let api = api.get_value();
        let alive = alive.get_value();
        deleting.set(true);
        spawn_local(async move {
            let result = api::delete_master(&api, master.id).await;
            if !alive.is_alive() {
                return;
            }
            deleting.set(false);
            match result {
                Ok(()) => {
                    delete_target.set(None);
                    state.expanded.update(|set| {
                        set.remove(&master.id);
                    });
                    notify.success("Sales order deleted successfully");
                    fetch();
                }
                Err(e) => notify.error(e.user_message(api::DELETE_FALLBACK)),
            }
        });
    };

    fetch();

    let page = Memo::new(move |_| state.query.with(|q| masters.with(|m| q.run(m))));
    let sort_field = Signal::derive(move || state.query.with(|q| q.sort_field.clone()));
    let sort_ascending = Signal::derive(move || state.query.with(|q| q.sort_ascending));
    let on_sort = Callback::new(move |column: String| state.query.update(|q| q.sort_by(&column)));

    let active_filters_count = Signal::derive(move || state.query.with(|q| q.filters.active_count()));

    let pagination: ChildrenFn = Arc::new(move || {
        view! {
            <PaginationControls
                current_page=Signal::derive(move || page.with(|p| p.page))
                total_pages=Signal::derive(move || page.with(|p| p.total_pages))
                total_count=Signal::derive(move || page.with(|p| p.total_count))
                page_size=Signal::derive(move || state.query.with(|q| q.page_size))
                on_page_change=Callback::new(move |p| state.query.update(|q| q.page = p))
                on_page_size_change=Callback::new(move |size| {
                    state.query.update(|q| q.set_page_size(size))
                })
            />
        }
        .into_any()
    });

    let filter_content: ChildrenFn = Arc::new(move || {
        view! {
            <div class="filter-panel__grid">
                <NumberRangeFilter label="ID" column=COL_ID state=state />
                <NumberRangeFilter label="SO No" column=COL_SO_NO state=state />
                <DateColumnFilter state=state />
                <TextColumnFilter
                    label="SO Type"
                    column=COL_SO_TYPE
                    state=state
                    masters=masters
                    limit=autocomplete_limit
                />
                <TextColumnFilter
                    label="Customer"
                    column=COL_CUSTOMER
                    state=state
                    masters=masters
                    limit=autocomplete_limit
                />
            </div>
        }
        .into_any()
    });

    let filter_tags: ChildrenFn = Arc::new(move || {
        view! {
            {move || {
                state
                    .query
                    .with(|q| {
                        q.filters
                            .iter()
                            .map(|(column, filter)| (column.clone(), filter.describe()))
                            .collect::<Vec<_>>()
                    })
                    .into_iter()
                    .map(|(column, text)| {
                        let label = format!("{}: {}", column_label(&column), text);
                        view! {
                            <FilterTag
                                label=label
                                on_remove=Callback::new(move |_| {
                                    state.query.update(|q| q.clear_filter(&column))
                                })
                            />
                        }
                    })
                    .collect_view()
            }}
        }
        .into_any()
    });

    let navigate_new = navigate.clone();

    view! {
        <PageFrame page_id="a005_sales_order--list" category=PAGE_CAT_LIST>
            <PageHeader title="Sales Orders">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| navigate_new("/new", Default::default())
                >
                    {icon("plus")}
                    " New"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=loading
                    on_click=move |_| fetch()
                >
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </PageHeader>

            <FilterPanel
                is_expanded=state.filters_expanded
                active_filters_count=active_filters_count
                pagination_controls=pagination
                filter_content=filter_content
                filter_tags=filter_tags
            />

            {move || error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
            })}

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=40.0>""</TableHeaderCell>
                            <SortableHeaderCell label="ID" sort_field=COL_ID current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort min_width=70.0 />
                            <SortableHeaderCell label="SO No" sort_field=COL_SO_NO current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                            <SortableHeaderCell label="SO Date" sort_field=COL_SO_DATE current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort />
                            <SortableHeaderCell label="SO Type" sort_field=COL_SO_TYPE current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort min_width=140.0 />
                            <SortableHeaderCell label="Customer" sort_field=COL_CUSTOMER current_sort_field=sort_field sort_ascending=sort_ascending on_sort=on_sort min_width=200.0 />
                            <TableHeaderCell min_width=100.0>"Actions"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let rows = page.with(|p| p.rows.clone());
                            if rows.is_empty() && !loading.get() {
                                return view! {
                                    <TableRow>
                                        <TableCell attr:colspan=COLUMN_COUNT>"No sales orders"</TableCell>
                                    </TableRow>
                                }
                                .into_any();
                            }
                            rows.into_iter()
                                .map(|master| {
                                    let id = master.id;
                                    let is_expanded = move || state.expanded.with(|set| set.contains(&id));
                                    let navigate = navigate.clone();
                                    let for_delete = master.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <span
                                                    class="table__expander"
                                                    on:click=move |_| state.toggle_expanded(id)
                                                >
                                                    {move || if is_expanded() { icon("chevron-down") } else { icon("chevron-right") }}
                                                </span>
                                            </TableCell>
                                            <TableCell>{id.value()}</TableCell>
                                            <TableCell>{master.so_no.clone()}</TableCell>
                                            <TableCell>{display_so_date(&master.so_date)}</TableCell>
                                            <TableCell>{master.so_type.clone()}</TableCell>
                                            <TableCell>{master.customer_name.clone()}</TableCell>
                                            <TableCell>
                                                <div class="table__actions">
                                                    <Button
                                                        size=ButtonSize::Small
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| navigate(&format!("/edit/{}", id), Default::default())
                                                    >
                                                        {icon("edit")}
                                                    </Button>
                                                    <Button
                                                        size=ButtonSize::Small
                                                        appearance=ButtonAppearance::Subtle
                                                        disabled=deleting
                                                        on_click=move |_| delete_target.set(Some(for_delete.clone()))
                                                    >
                                                        {icon("trash")}
                                                    </Button>
                                                </div>
                                            </TableCell>
                                        </TableRow>
                                        <Show when=is_expanded>
                                            <TableRow class="table__row--detail">
                                                <TableCell attr:colspan=COLUMN_COUNT>
                                                    <LinesGrid so_id=id />
                                                </TableCell>
                                            </TableRow>
                                        </Show>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </TableBody>
                </Table>
            </div>

            <Show when=move || loading.get()>
                <div class="page__loading">
                    <Spinner label="Loading sales orders..." />
                </div>
            </Show>

            <Show when=move || delete_target.with(|t| t.is_some())>
                <ConfirmDialog
                    title="Delete Sales Order"
                    message=delete_target.with_untracked(|t| {
                        t.as_ref()
                            .map(|m| format!("Delete sales order {}? This cannot be undone.", m.so_no))
                            .unwrap_or_default()
                    })
                    busy=deleting
                    on_confirm=Callback::new(move |_| confirm_delete())
                    on_cancel=Callback::new(move |_| {
                        if !deleting.get_untracked() {
                            delete_target.set(None);
                        }
                    })
                />
            </Show>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_date_is_shown_day_first() {
        assert_eq!(display_so_date("1/15/2024 12:00:00 AM"), "15.01.2024");
        assert_eq!(display_so_date("garbage"), "garbage");
    }
}
