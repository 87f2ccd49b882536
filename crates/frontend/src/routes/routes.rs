use crate::domain::a005_sales_order::ui::details::SalesOrderDetails;
use crate::domain::a005_sales_order::ui::list::SalesOrderList;
use contracts::domain::common::RecordId;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::hooks::use_params_map;
use leptos_router::path;
use thaw::*;

#[component]
fn NewSalesOrderPage() -> impl IntoView {
    view! { <SalesOrderDetails id=None /> }
}

/// `/edit/:id`; an id that is not a positive number is reported as missing
#[component]
fn EditSalesOrderPage() -> impl IntoView {
    let params = use_params_map();
    let id = Memo::new(move |_| {
        params.with(|p| {
            p.get("id")
                .and_then(|raw| RecordId::from_string(&raw).ok())
                .and_then(RecordId::non_zero)
        })
    });

    move || match id.get() {
        Some(id) => view! { <SalesOrderDetails id=Some(id) /> }.into_any(),
        None => view! {
            <MessageBar intent=MessageBarIntent::Error>"Record not found"</MessageBar>
        }
        .into_any(),
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page">
            <h1 class="page__title">"Page not found"</h1>
            <A href="/">"Back to sales orders"</A>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <main class="app-main">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=SalesOrderList />
                    <Route path=path!("/new") view=NewSalesOrderPage />
                    <Route path=path!("/edit/:id") view=EditSalesOrderPage />
                </Routes>
            </main>
        </Router>
    }
}
