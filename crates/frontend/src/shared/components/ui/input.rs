use crate::shared::components::table::format_plain;
use leptos::prelude::*;

/// Labelled text or date input
#[component]
pub fn Input(
    #[prop(optional, into)]
    label: MaybeProp<String>,
    #[prop(into)]
    value: Signal<String>,
    #[prop(optional)]
    on_input: Option<Callback<String>>,
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    /// "text" (default), "date", ...
    #[prop(optional, into)]
    input_type: MaybeProp<String>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
    #[prop(optional)]
    readonly: bool,
    #[prop(optional)]
    required: bool,
) -> impl IntoView {
    let input_t = move || input_type.get().unwrap_or_else(|| "text".to_string());

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label">{l}{required.then_some(" *")}</label>
            })}
            <input
                class="form__input"
                type=input_t
                prop:value=move || value.get()
                placeholder=move || placeholder.get().unwrap_or_default()
                disabled=move || disabled.get()
                readonly=readonly
                required=required
                on:input=move |ev| {
                    if let Some(handler) = on_input {
                        handler.run(event_target_value(&ev));
                    }
                }
            />
        </div>
    }
}

/// Parses what the user typed into a number input; blank and garbage are 0
pub fn parse_number_input(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Bare numeric input for grid cells
#[component]
pub fn NumberInput(
    #[prop(into)]
    value: Signal<f64>,
    on_change: Callback<f64>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
    #[prop(optional, into)]
    step: MaybeProp<String>,
) -> impl IntoView {
    // Keeps partial input such as "10." intact while the parsed value matches
    let text = RwSignal::new(format_plain(value.get_untracked()));
    Effect::new(move |_| {
        let current = value.get();
        if parse_number_input(&text.get_untracked()) != current {
            text.set(format_plain(current));
        }
    });

    view! {
        <input
            class="form__input form__input--number"
            type="number"
            min="0"
            step=move || step.get().unwrap_or_else(|| "any".to_string())
            prop:value=move || text.get()
            disabled=move || disabled.get()
            on:input=move |ev| {
                let raw = event_target_value(&ev);
                let parsed = parse_number_input(&raw);
                text.set(raw);
                on_change.run(parsed);
            }
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_input() {
        assert_eq!(parse_number_input("3"), 3.0);
        assert_eq!(parse_number_input(" 10.5 "), 10.5);
        assert_eq!(parse_number_input(""), 0.0);
        assert_eq!(parse_number_input("abc"), 0.0);
        assert_eq!(parse_number_input("NaN"), 0.0);
    }
}
