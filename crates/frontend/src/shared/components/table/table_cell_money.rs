use super::number_format::format_money;
use leptos::prelude::*;
use thaw::*;

/// Right-aligned money cell; `None` renders a dash
#[component]
pub fn TableCellMoney(
    #[prop(into)]
    value: Signal<Option<f64>>,

    #[prop(optional, default = false)]
    bold: bool,
) -> impl IntoView {
    let text = move || match value.get() {
        Some(v) => format_money(v),
        None => "—".to_string(),
    };
    let style = if bold { "font-weight: 600" } else { "" };

    view! {
        <TableCell class="text-right">
            <span style=style>{text}</span>
        </TableCell>
    }
}
