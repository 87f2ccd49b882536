use super::state::{
    text_filter_kind, SalesOrderListState, TextFilterKind, COL_SO_DATE,
};
use crate::shared::column_filter::{distinct_values, ColumnFilter};
use crate::shared::date_utils::{from_input_value, to_input_value, today, DatePreset};
use contracts::domain::a005_sales_order::SalesOrderMaster;
use leptos::prelude::*;
use std::collections::BTreeSet;

/// Blank means "no bound"; garbage is treated as blank
pub fn parse_bound(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Replaces one side of a number range, keeping the other
pub fn with_number_bound(current: Option<&ColumnFilter>, lower: bool, value: Option<f64>) -> ColumnFilter {
    let (from, to) = match current {
        Some(ColumnFilter::NumberRange { from, to }) => (*from, *to),
        _ => (None, None),
    };
    if lower {
        ColumnFilter::NumberRange { from: value, to }
    } else {
        ColumnFilter::NumberRange { from, to: value }
    }
}

/// Adds `value` to a multi-select, or removes it when already chosen
pub fn toggle_choice(current: Option<&ColumnFilter>, value: &str) -> ColumnFilter {
    let mut chosen = match current {
        Some(ColumnFilter::MultiSelect(values)) => values.clone(),
        _ => BTreeSet::new(),
    };
    if !chosen.remove(value) {
        chosen.insert(value.to_string());
    }
    ColumnFilter::MultiSelect(chosen)
}

fn bound_text(filter: Option<&ColumnFilter>, lower: bool) -> String {
    match filter {
        Some(ColumnFilter::NumberRange { from, to }) => {
            let bound = if lower { from } else { to };
            bound.map(|b| b.to_string()).unwrap_or_default()
        }
        _ => String::new(),
    }
}

/// From/to inputs of a numeric column
#[component]
pub fn NumberRangeFilter(
    label: &'static str,
    column: &'static str,
    state: SalesOrderListState,
) -> impl IntoView {
    let set_bound = move |lower: bool, raw: String| {
        state.query.update(|q| {
            let filter = with_number_bound(q.filters.get(column), lower, parse_bound(&raw));
            q.set_filter(column, filter);
        });
    };

    view! {
        <div class="filter-field">
            <label class="form__label">{label}</label>
            <div class="filter-field__range">
                <input
                    class="form__input"
                    type="number"
                    placeholder="From"
                    prop:value=move || state.query.with(|q| bound_text(q.filters.get(column), true))
                    on:change=move |ev| set_bound(true, event_target_value(&ev))
                />
                <input
                    class="form__input"
                    type="number"
                    placeholder="To"
                    prop:value=move || state.query.with(|q| bound_text(q.filters.get(column), false))
                    on:change=move |ev| set_bound(false, event_target_value(&ev))
                />
            </div>
        </div>
    }
}

/// Checkbox list over the distinct values of a text column, or a
/// substring search when there are more values than `limit`
#[component]
pub fn TextColumnFilter(
    label: &'static str,
    column: &'static str,
    state: SalesOrderListState,
    masters: RwSignal<Vec<SalesOrderMaster>>,
    limit: usize,
) -> impl IntoView {
    let values = Memo::new(move |_| masters.with(|m| distinct_values(m, column)));
    let kind = Memo::new(move |_| text_filter_kind(values.with(Vec::len), limit));

    let is_chosen = move |value: &str| {
        state.query.with(|q| match q.filters.get(column) {
            Some(ColumnFilter::MultiSelect(chosen)) => chosen.contains(value),
            _ => false,
        })
    };
    let needle = move || {
        state.query.with(|q| match q.filters.get(column) {
            Some(ColumnFilter::Contains(text)) => text.clone(),
            _ => String::new(),
        })
    };

    view! {
        <div class="filter-field">
            <label class="form__label">{label}</label>
            {move || match kind.get() {
                TextFilterKind::MultiSelect => view! {
                    <div class="filter-field__choices">
                        <For
                            each=move || values.get()
                            key=|value| value.clone()
                            children=move |value: String| {
                                let for_check = value.clone();
                                let for_toggle = value.clone();
                                view! {
                                    <label class="filter-field__choice">
                                        <input
                                            type="checkbox"
                                            prop:checked=move || is_chosen(&for_check)
                                            on:change=move |_| {
                                                state.query.update(|q| {
                                                    let filter = toggle_choice(q.filters.get(column), &for_toggle);
                                                    q.set_filter(column, filter);
                                                });
                                            }
                                        />
                                        <span>{value}</span>
                                    </label>
                                }
                            }
                        />
                    </div>
                }
                .into_any(),
                TextFilterKind::Contains => view! {
                    <input
                        class="form__input"
                        type="text"
                        placeholder="Contains..."
                        prop:value=needle
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            state.query.update(|q| q.set_filter(column, ColumnFilter::Contains(text)));
                        }
                    />
                }
                .into_any(),
            }}
        </div>
    }
}

/// Preset list plus custom from/to for the SO date column
#[component]
pub fn DateColumnFilter(state: SalesOrderListState) -> impl IntoView {
    let custom_from = RwSignal::new(String::new());
    let custom_to = RwSignal::new(String::new());

    let apply = move |preset: DatePreset| {
        state.date_preset.set(preset);
        let custom = (
            from_input_value(&custom_from.get_untracked()),
            from_input_value(&custom_to.get_untracked()),
        );
        let filter = match preset.range(today(), custom) {
            Some((from, to)) => ColumnFilter::DateRange {
                from: Some(from),
                to: Some(to),
            },
            None => ColumnFilter::DateRange { from: None, to: None },
        };
        state.query.update(|q| q.set_filter(COL_SO_DATE, filter));
    };

    // a cleared chip puts the preset back to "All"
    Effect::new(move |_| {
        let cleared = state.query.with(|q| q.filters.get(COL_SO_DATE).is_none());
        if cleared && state.date_preset.get_untracked() != DatePreset::Custom {
            state.date_preset.set(DatePreset::All);
        }
    });

    view! {
        <div class="filter-field">
            <label class="form__label">"SO Date"</label>
            <select
                class="form__select"
                prop:value=move || state.date_preset.get().key()
                on:change=move |ev| apply(DatePreset::from_key(&event_target_value(&ev)))
            >
                {DatePreset::ALL
                    .into_iter()
                    .map(|p| view! { <option value=p.key()>{p.label()}</option> })
                    .collect_view()}
            </select>
            <Show when=move || state.date_preset.get() == DatePreset::Custom>
                <div class="filter-field__range">
                    <input
                        class="form__input"
                        type="date"
                        prop:value=move || custom_from.get()
                        on:change=move |ev| {
                            custom_from.set(event_target_value(&ev));
                            apply(DatePreset::Custom);
                        }
                    />
                    <input
                        class="form__input"
                        type="date"
                        prop:value=move || custom_to.get()
                        on:change=move |ev| {
                            custom_to.set(event_target_value(&ev));
                            apply(DatePreset::Custom);
                        }
                    />
                </div>
            </Show>
            <Show when=move || state.date_preset.get() != DatePreset::All>
                <div class="filter-field__hint">
                    {move || state.query.with(|q| match q.filters.get(COL_SO_DATE) {
                        Some(ColumnFilter::DateRange { from: Some(f), to: Some(t) }) => {
                            format!("{} to {}", to_input_value(*f), to_input_value(*t))
                        }
                        _ => String::new(),
                    })}
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_bound_is_open() {
        assert_eq!(parse_bound("  "), None);
        assert_eq!(parse_bound("abc"), None);
        assert_eq!(parse_bound("12.5"), Some(12.5));
    }

    #[test]
    fn test_setting_one_bound_keeps_the_other() {
        let lower = with_number_bound(None, true, Some(5.0));
        let both = with_number_bound(Some(&lower), false, Some(9.0));
        assert_eq!(both, ColumnFilter::NumberRange { from: Some(5.0), to: Some(9.0) });

        let upper_only = with_number_bound(Some(&both), true, None);
        assert_eq!(upper_only, ColumnFilter::NumberRange { from: None, to: Some(9.0) });
    }

    #[test]
    fn test_toggle_choice_adds_then_removes() {
        let once = toggle_choice(None, "Local");
        assert!(once.is_active());
        let twice = toggle_choice(Some(&once), "Local");
        assert!(!twice.is_active());
    }
}
