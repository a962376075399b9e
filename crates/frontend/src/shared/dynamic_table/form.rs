//! DynamicForm - форма просмотра/редактирования записи по схеме `FormDescriptor`.
//!
//! В режиме просмотра все поля только для чтения. В режиме редактирования,
//! если передан `on_submit`, форма показывает кнопку "Сохранить" и отдаёт
//! изменённые значения.

use contracts::shared::form::{FieldKind, FormDescriptor, FormElement, FormLayout, FormValues};
use contracts::shared::table::column::is_active_flag;
use leptos::prelude::*;
use thaw::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    View,
    Edit,
}

impl FormMode {
    pub fn title(&self) -> &'static str {
        match self {
            FormMode::View => "Просмотр записи",
            FormMode::Edit => "Редактирование записи",
        }
    }

    pub fn read_only(&self) -> bool {
        *self == FormMode::View
    }
}

/// Labels of required elements left empty.
pub fn missing_required(descriptor: &FormDescriptor, values: &FormValues) -> Vec<String> {
    descriptor
        .elements()
        .filter(|e| e.required && e.kind != FieldKind::Checkbox)
        .filter(|e| values.text(&e.field_id).trim().is_empty())
        .map(|e| e.label.clone())
        .collect()
}

fn grid_style(layout: FormLayout, columns: usize) -> String {
    match layout {
        FormLayout::Inline => "display: flex; flex-wrap: wrap; gap: 12px;".to_string(),
        _ => format!(
            "display: grid; grid-template-columns: repeat({}, minmax(0, 1fr)); gap: 12px 16px; margin-bottom: 12px;",
            columns.max(1)
        ),
    }
}

fn group_style(layout: FormLayout) -> &'static str {
    match layout {
        FormLayout::Horizontal => "display: flex; align-items: center; gap: 8px;",
        FormLayout::Inline => "display: inline-flex; align-items: center; gap: 6px;",
        FormLayout::Vertical => "display: flex; flex-direction: column; gap: 4px;",
    }
}

fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Number => "number",
        FieldKind::Date => "date",
        _ => "text",
    }
}

/// Одно поле формы, значение берётся из `values` по `field_id`.
#[component]
fn FormField(
    element: FormElement,
    values: RwSignal<FormValues>,
    layout: FormLayout,
    read_only: bool,
) -> impl IntoView {
    let FormElement {
        kind,
        col,
        label,
        field_id,
        required,
        placeholder,
        ..
    } = element;

    let input_id = format!("dynamic-form-{}", field_id);
    let field = StoredValue::new(field_id);
    let text = move || values.with(|v| v.text(&field.get_value()));
    let on_input = move |input: String| {
        values.update(|v| v.set_input(&field.get_value(), kind, &input));
    };
    let placeholder = placeholder.unwrap_or_default();

    let control = match kind {
        FieldKind::Checkbox => view! {
            <input
                id=input_id.clone()
                type="checkbox"
                class="form__checkbox"
                prop:checked=move || values.with(|v| is_active_flag(v.get(&field.get_value())))
                disabled=read_only
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    on_input(checked.to_string());
                }
            />
        }
        .into_any(),
        FieldKind::Textarea => view! {
            <textarea
                id=input_id.clone()
                class="form__textarea"
                placeholder=placeholder
                readonly=read_only
                required=required
                rows=3
                prop:value=text
                on:input=move |ev| on_input(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        _ => view! {
            <input
                id=input_id.clone()
                class="form__input"
                type=input_type(kind)
                placeholder=placeholder
                readonly=read_only
                required=required
                prop:value=text
                on:input=move |ev| on_input(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <div class="form__group" style=format!("{} grid-column: {};", group_style(layout), col + 1)>
            <label class="form__label" for=input_id>
                {label}
                {(required && !read_only).then(|| view! { <span style="color: #ff4d4f;">" *"</span> })}
            </label>
            {control}
        </div>
    }
}

#[component]
pub fn DynamicForm(
    descriptor: FormDescriptor,
    initial: FormValues,
    mode: FormMode,
    #[prop(optional_no_strip)]
    on_submit: Option<Callback<FormValues>>,
) -> impl IntoView {
    let values = RwSignal::new(initial);
    let (error, set_error) = signal(None::<String>);
    let read_only = mode.read_only();
    let layout = descriptor.layout;
    let schema = StoredValue::new(descriptor.clone());

    let handle_submit = move || {
        let Some(on_submit) = on_submit else {
            return;
        };
        let current = values.get_untracked();
        let missing = schema.with_value(|d| missing_required(d, &current));
        if missing.is_empty() {
            set_error.set(None);
            on_submit.run(current);
        } else {
            set_error.set(Some(format!("Заполните обязательные поля: {}", missing.join(", "))));
        }
    };

    let sections = descriptor
        .sections
        .into_iter()
        .map(|section| {
            let grid_rows = section
                .grid_rows()
                .into_iter()
                .map(|(_, elements)| {
                    let columns = elements.iter().map(|e| e.col + 1).max().unwrap_or(1);
                    let fields = elements
                        .into_iter()
                        .cloned()
                        .map(|element| {
                            view! {
                                <FormField
                                    element=element
                                    values=values
                                    layout=layout
                                    read_only=read_only
                                />
                            }
                        })
                        .collect_view();
                    view! { <div style=grid_style(layout, columns)>{fields}</div> }
                })
                .collect_view();

            view! {
                <fieldset style="border: none; padding: 0; margin: 0 0 16px 0;">
                    <legend style="font-weight: 600; margin-bottom: 4px;">{section.name.clone()}</legend>
                    {(!section.description.is_empty()).then(|| view! {
                        <p style="color: #8c8c8c; margin: 0 0 12px 0;">{section.description.clone()}</p>
                    })}
                    {grid_rows}
                </fieldset>
            }
        })
        .collect_view();

    view! {
        <form
            class="dynamic-form"
            on:submit=move |ev| {
                ev.prevent_default();
                if !read_only {
                    handle_submit();
                }
            }
        >
            {(!schema.with_value(|d| d.description.is_empty())).then(|| view! {
                <p style="color: #595959; margin-top: 0;">{schema.with_value(|d| d.description.clone())}</p>
            })}
            {sections}
            {move || error.get().map(|msg| view! {
                <MessageBar intent=MessageBarIntent::Error>
                    {msg}
                </MessageBar>
            })}
            {(!read_only && on_submit.is_some()).then(|| view! {
                <div style="display: flex; justify-content: flex-end; margin-top: 16px;">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| handle_submit()>
                        "Сохранить"
                    </Button>
                </div>
            })}
        </form>
    }
}
