//! One HTML control per field type.

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use common::form::CHECKED;
use common::locale::Locale;
use common::model::field::{Field, FieldType};

/// Label, control and error line of one field. `on_change` receives
/// `(field id, new value)`.
pub fn field_control(
    field: &Field,
    value: &str,
    error: Option<String>,
    locale: Locale,
    on_change: &Callback<(String, String)>,
) -> Html {
    let label = locale.pick(&field.label, &field.label_ar).to_string();
    let placeholder = locale.pick(&field.placeholder, &field.placeholder_ar).to_string();
    let input_id = format!("field-{}", field.id);
    let invalid = error.is_some();

    let control = match field.field_type {
        FieldType::Text | FieldType::Email | FieldType::Tel | FieldType::Date => {
            let id = field.id.clone();
            let on_change = on_change.clone();
            html! {
                <input
                    id={input_id.clone()}
                    type={field.field_type.as_str()}
                    value={value.to_string()}
                    placeholder={placeholder}
                    oninput={Callback::from(move |e: InputEvent| {
                        let input = e.target_unchecked_into::<HtmlInputElement>();
                        on_change.emit((id.clone(), input.value()));
                    })}
                />
            }
        }
        FieldType::Textarea => {
            let id = field.id.clone();
            let on_change = on_change.clone();
            html! {
                <textarea
                    id={input_id.clone()}
                    rows={4}
                    value={value.to_string()}
                    placeholder={placeholder}
                    oninput={Callback::from(move |e: InputEvent| {
                        let input = e.target_unchecked_into::<HtmlTextAreaElement>();
                        on_change.emit((id.clone(), input.value()));
                    })}
                />
            }
        }
        FieldType::Select => {
            let id = field.id.clone();
            let on_change = on_change.clone();
            html! {
                <select
                    id={input_id.clone()}
                    onchange={Callback::from(move |e: Event| {
                        let select = e.target_unchecked_into::<HtmlSelectElement>();
                        on_change.emit((id.clone(), select.value()));
                    })}
                >
                    <option value="" selected={value.is_empty()}>
                        { if placeholder.is_empty() { "—".to_string() } else { placeholder } }
                    </option>
                    { for field.options.iter().map(|option| html! {
                        <option value={option.value.clone()} selected={option.value == value}>
                            { locale.pick(&option.label, &option.label_ar) }
                        </option>
                    }) }
                </select>
            }
        }
        FieldType::Checkbox => {
            let id = field.id.clone();
            let on_change = on_change.clone();
            html! {
                <label>
                    <input
                        id={input_id.clone()}
                        type="checkbox"
                        checked={value == CHECKED}
                        onchange={Callback::from(move |e: Event| {
                            let input = e.target_unchecked_into::<HtmlInputElement>();
                            let value = if input.checked() { CHECKED.to_string() } else { String::new() };
                            on_change.emit((id.clone(), value));
                        })}
                    />
                    { " " }{ placeholder }
                </label>
            }
        }
        FieldType::Radio => html! {
            <div id={input_id.clone()}>
                { for field.options.iter().map(|option| {
                    let id = field.id.clone();
                    let choice = option.value.clone();
                    let on_change = on_change.clone();
                    html! {
                        <label style="margin-inline-end: 12px;">
                            <input
                                type="radio"
                                name={field.id.clone()}
                                value={option.value.clone()}
                                checked={option.value == value}
                                onchange={Callback::from(move |_: Event| on_change.emit((id.clone(), choice.clone())))}
                            />
                            { " " }{ locale.pick(&option.label, &option.label_ar) }
                        </label>
                    }
                }) }
            </div>
        },
    };

    html! {
        <div class={classes!("form-field", invalid.then_some("invalid"))}>
            <label for={input_id}>
                { label }
                { if field.required { html! { <span class="field-error">{ " *" }</span> } } else { html! {} } }
            </label>
            { control }
            {
                match error {
                    Some(message) => html! { <span class="field-error">{ message }</span> },
                    None => html! {},
                }
            }
        </div>
    }
}
