use contracts::domain::common::{RecordId, SelectOption};
use leptos::prelude::*;

/// `(value, label)` pairs for [`Select`], value being the id as text
pub fn select_options<T: SelectOption>(options: &[T]) -> Vec<(String, String)> {
    options
        .iter()
        .map(|o| (o.option_id().as_string(), o.option_label()))
        .collect()
}

/// Dropdown bound to an optional id. The empty first entry means "none".
#[component]
pub fn Select(
    #[prop(optional, into)]
    label: MaybeProp<String>,
    #[prop(into)]
    value: Signal<Option<RecordId>>,
    on_change: Callback<Option<RecordId>>,
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
    /// Text of the empty entry
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
    #[prop(optional)]
    required: bool,
    /// Spinner next to the label while the options load
    #[prop(optional, into)]
    loading: Signal<bool>,
) -> impl IntoView {
    let current = move || value.get().map(|id| id.as_string()).unwrap_or_default();

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label">
                    {l}
                    {required.then_some(" *")}
                    <Show when=move || loading.get()>
                        <span class="form__label-hint">" (loading…)"</span>
                    </Show>
                </label>
            })}
            <select
                class="form__select"
                disabled=move || disabled.get()
                required=required
                prop:value=current
                on:change=move |ev| {
                    let raw = event_target_value(&ev);
                    let id = RecordId::from_string(&raw).ok().and_then(RecordId::non_zero);
                    on_change.run(id);
                }
            >
                <option value="" selected=move || value.get().is_none()>
                    {move || placeholder.get().unwrap_or_default()}
                </option>
                <For
                    each=move || options.get()
                    key=|(val, _)| val.clone()
                    children=move |(val, label)| {
                        let val_clone = val.clone();
                        let is_selected = move || current() == val_clone;
                        view! {
                            <option value=val selected=is_selected>
                                {label}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_division::Division;

    #[test]
    fn test_select_options_use_id_text() {
        let divisions = vec![Division {
            division_id: RecordId(3),
            division_name: "North".into(),
        }];
        assert_eq!(
            select_options(&divisions),
            vec![("3".to_string(), "North".to_string())]
        );
    }
}
