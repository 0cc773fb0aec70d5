//! Markup for rendered forms.
//!
//! Values, labels and help texts come from the schema and are escaped by
//! `maud`; nothing is written through unescaped.

use super::{FieldDescriptor, FieldKind};
use crate::core::resolver::MultiValuePolicy;
use maud::{html, Markup, DOCTYPE};
use serde_json::Value;

/// Render the form body: one card per top-level section.
///
/// `policy` is the multi-value policy the submission will be resolved with;
/// it decides where each checkbox's empty fallback input goes.
pub fn render_form_fragment(fields: &[FieldDescriptor], policy: MultiValuePolicy) -> String {
    form_fragment(fields, policy).into_string()
}

/// Render a full page with the form posting back to `action`.
pub fn render_page(
    title: &str,
    action: &str,
    fields: &[FieldDescriptor],
    policy: MultiValuePolicy,
) -> String {
    page(
        title,
        html! {
            form method="post" action=(action) {
                (form_fragment(fields, policy))
                button.btn.btn-primary type="submit" { "Launch" }
            }
        },
    )
    .into_string()
}

/// Page shown after a submission was resolved and its params file written.
pub fn render_submission_page(params_file: &str, command_line: &[String]) -> String {
    page(
        "Parameters accepted",
        html! {
            p { "Parameters written to " code { (params_file) } }
            pre { (command_line.join(" ")) }
        },
    )
    .into_string()
}

/// Page shown when a submission was rejected.
pub fn render_error_page(message: &str) -> String {
    page(
        "Parameters rejected",
        html! {
            div.alert.alert-danger { (message) }
            a href="./" { "Back to the form" }
        },
    )
    .into_string()
}

fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (title) }
            }
            body {
                h1 { (title) }
                (body)
            }
        }
    }
}

fn form_fragment(fields: &[FieldDescriptor], policy: MultiValuePolicy) -> Markup {
    html! {
        @for field in fields {
            @if let FieldKind::Group { title, fields } = &field.kind {
                div.card {
                    div.card-header { (title) " options" }
                    div.card-body {
                        @for inner in fields { (field_markup(inner, policy)) }
                    }
                }
            } @else {
                (field_markup(field, policy))
            }
        }
    }
}

fn field_markup(field: &FieldDescriptor, policy: MultiValuePolicy) -> Markup {
    if let FieldKind::Group { title, fields } = &field.kind {
        return html! {
            fieldset.form-group {
                legend { (title) }
                @for inner in fields { (field_markup(inner, policy)) }
            }
        };
    }
    html! {
        div.form-group {
            @if let Some(label) = &field.label {
                label for=(field.name) { (label) }
            }
            (input_markup(field, policy))
            @if let Some(help) = &field.help_text {
                small.form-text.text-muted { (help) }
            }
        }
    }
}

fn input_markup(field: &FieldDescriptor, policy: MultiValuePolicy) -> Markup {
    let value = field.display_value();
    match &field.kind {
        FieldKind::Select { options } => html! {
            select name=(field.name) id=(field.name) class="form-control" {
                @for choice in options {
                    option value=(choice) selected[*choice == value] { (choice) }
                }
            }
        },
        FieldKind::Number => html! {
            input name=(field.name) id=(field.name) class="form-control" type="number" step="any" value=(value);
        },
        FieldKind::Text => html! {
            input name=(field.name) id=(field.name) class="form-control" type="text" value=(value);
        },
        // The hidden input submits "" (false) when the box is unchecked. It
        // sits on the side the policy discards when the box is checked.
        FieldKind::Checkbox => {
            let checked = matches!(field.value, Some(Value::Bool(true)));
            let fallback = checkbox_fallback(policy);
            html! {
                @if fallback == Some(Fallback::Before) {
                    input name=(field.name) type="hidden" value="";
                }
                input name=(field.name) id=(field.name) class="form-check-input" type="checkbox" value="true" checked[checked];
                @if fallback == Some(Fallback::After) {
                    input name=(field.name) type="hidden" value="";
                }
            }
        }
        FieldKind::Group { .. } => field_markup(field, policy),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fallback {
    Before,
    After,
}

/// `reject` refuses repeated names, so no fallback is rendered for it.
fn checkbox_fallback(policy: MultiValuePolicy) -> Option<Fallback> {
    match policy {
        MultiValuePolicy::First => Some(Fallback::After),
        MultiValuePolicy::Last => Some(Fallback::Before),
        MultiValuePolicy::Reject => None,
    }
}
