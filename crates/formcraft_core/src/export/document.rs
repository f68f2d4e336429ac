//! Standalone HTML document export.
//!
//! # Responsibility
//! - Render a self-contained page (inline style and script) with one block
//!   per field.
//!
//! # Invariants
//! - Element ids derive from field ids: `field_<id>` for the control,
//!   `group_<id>` for its block and `field_<id>_help` for help text.
//! - The embedded script only checks `required` controls for non-blank
//!   content. Length, range, pattern, format and conditional checks are
//!   not part of the rendered document.
//! - All user-entered text is HTML-escaped.

use crate::config::ExportConfig;
use crate::model::field::{Field, FieldBody, FieldOption};
use crate::model::form::FormMeta;

const STYLE: &str = r#"    *, *::before, *::after { box-sizing: border-box; margin: 0; padding: 0; }
    body { font-family: system-ui, sans-serif; background: #f5f5f5; min-height: 100vh; display: flex; align-items: flex-start; justify-content: center; padding: 40px 20px; }
    .form-container { background: white; border-radius: 12px; padding: 40px; width: 100%; max-width: 640px; box-shadow: 0 4px 24px rgba(0,0,0,0.08); }
    .form-title { font-size: 24px; font-weight: 700; margin-bottom: 8px; color: #111; }
    .form-description { color: #666; margin-bottom: 32px; line-height: 1.6; }
    .field-group { margin-bottom: 20px; }
    label { display: block; font-size: 13px; font-weight: 600; margin-bottom: 6px; color: #333; }
    .required { color: #ef4444; }
    input, textarea, select { width: 100%; padding: 10px 14px; border: 1.5px solid #e0e0e0; border-radius: 8px; font-size: 14px; outline: none; transition: border-color 150ms; }
    input:focus, textarea:focus, select:focus { border-color: #6366f1; box-shadow: 0 0 0 3px rgba(99,102,241,0.15); }
    input[type="file"] { padding: 8px; cursor: pointer; }
    .option-label { display: flex; align-items: center; gap: 8px; cursor: pointer; margin-bottom: 8px; font-size: 14px; font-weight: 400; color: #333; }
    .option-label input, .toggle-input { width: auto; margin: 0; }
    .help-text { display: block; font-size: 12px; color: #888; margin-top: 4px; }
    .error-msg { display: block; font-size: 12px; color: #ef4444; margin-top: 4px; min-height: 16px; }
    input.error, textarea.error, select.error { border-color: #ef4444; }
    .form-heading { font-size: 20px; font-weight: 700; margin: 24px 0 8px; color: #111; }
    .form-paragraph { color: #555; line-height: 1.7; margin-bottom: 16px; }
    .form-divider { border: none; border-top: 1.5px solid #eee; margin: 24px 0; }
    .submit-btn { background: #6366f1; color: white; border: none; border-radius: 8px; padding: 12px 28px; font-size: 15px; font-weight: 600; cursor: pointer; margin-top: 8px; transition: background 150ms; }
    .submit-btn:hover { background: #4f46e5; }
    .success-msg { display: none; background: #f0fdf4; border: 1.5px solid #86efac; color: #166534; border-radius: 8px; padding: 16px; margin-top: 16px; font-weight: 500; }
"#;

const SCRIPT: &str = r#"    document.getElementById('generatedForm').addEventListener('submit', function (e) {
      e.preventDefault();
      var valid = true;
      this.querySelectorAll('[required]').forEach(function (el) {
        var group = el.closest('.field-group');
        var errMsg = group ? group.querySelector('.error-msg') : null;
        if (!el.value.trim()) {
          valid = false;
          el.classList.add('error');
          if (errMsg) errMsg.textContent = REQUIRED_MESSAGE;
        } else {
          el.classList.remove('error');
          if (errMsg) errMsg.textContent = '';
        }
      });
      if (valid) {
        document.getElementById('successMsg').style.display = 'block';
      }
    });
"#;

/// Renders the standalone document for `meta` and `fields`.
pub fn to_document(meta: &FormMeta, fields: &[Field], config: &ExportConfig) -> String {
    let title = escape(config.display_title(meta));
    let mut out = String::with_capacity(STYLE.len() + SCRIPT.len() + fields.len() * 256);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("  <meta charset=\"UTF-8\" />\n");
    out.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n",
    );
    push_line(&mut out, &format!("  <title>{title}</title>"));
    out.push_str("  <style>\n");
    out.push_str(STYLE);
    out.push_str("  </style>\n</head>\n<body>\n  <div class=\"form-container\">\n");
    push_line(&mut out, &format!("    <h1 class=\"form-title\">{title}</h1>"));
    if !meta.description.trim().is_empty() {
        push_line(
            &mut out,
            &format!(
                "    <p class=\"form-description\">{}</p>",
                escape(&meta.description)
            ),
        );
    }

    out.push_str("    <form id=\"generatedForm\" novalidate>\n");
    for field in fields {
        render_field(&mut out, field);
    }
    push_line(
        &mut out,
        &format!(
            "      <button type=\"submit\" class=\"submit-btn\">{}</button>",
            escape(&config.submit_label)
        ),
    );
    push_line(
        &mut out,
        &format!(
            "      <div class=\"success-msg\" id=\"successMsg\" role=\"status\">{}</div>",
            escape(&config.success_message)
        ),
    );
    out.push_str("    </form>\n  </div>\n  <script>\n");
    push_line(
        &mut out,
        &format!(
            "    var REQUIRED_MESSAGE = {};",
            script_string(&config.required_message)
        ),
    );
    out.push_str(SCRIPT);
    out.push_str("  </script>\n</body>\n</html>\n");

    log::debug!(
        "event=document_export module=export status=ok field_count={} bytes={}",
        fields.len(),
        out.len()
    );
    out
}

fn render_field(out: &mut String, field: &Field) {
    let control = match field.body() {
        FieldBody::Heading(block) => {
            let level = block.level.number();
            push_line(
                out,
                &format!(
                    "      <h{level} class=\"form-heading\">{}</h{level}>",
                    escape(&block.content)
                ),
            );
            return;
        }
        FieldBody::Paragraph(block) => {
            push_line(
                out,
                &format!(
                    "      <p class=\"form-paragraph\">{}</p>",
                    escape(&block.content)
                ),
            );
            return;
        }
        FieldBody::Divider => {
            out.push_str("      <hr class=\"form-divider\" />\n");
            return;
        }
        _ => match field.control() {
            Some(control) => control,
            None => return,
        },
    };

    let name = escape(field.id());
    let dom_id = format!("field_{name}");
    let help_id = format!("{dom_id}_help");
    let required = if control.required { " required" } else { "" };
    let aria = if control.help_text.is_empty() {
        String::new()
    } else {
        format!(" aria-describedby=\"{help_id}\"")
    };

    push_line(out, &format!("      <div class=\"field-group\" id=\"group_{name}\">"));
    let marker = if control.required {
        " <span class=\"required\">*</span>"
    } else {
        ""
    };
    push_line(
        out,
        &format!(
            "        <label for=\"{dom_id}\">{}{marker}</label>",
            escape(&control.label)
        ),
    );

    match field.body() {
        FieldBody::Textarea(input) => {
            push_line(
                out,
                &format!(
                    "        <textarea id=\"{dom_id}\" name=\"{name}\" placeholder=\"{}\" rows=\"{}\"{required}{aria}></textarea>",
                    escape(&input.placeholder),
                    input.rows.max(1)
                ),
            );
        }
        FieldBody::Select(input) => {
            push_line(
                out,
                &format!(
                    "        <select id=\"{dom_id}\" name=\"{name}\"{required}{aria}>"
                ),
            );
            out.push_str("          <option value=\"\">Select an option</option>\n");
            for option in &input.options {
                push_line(
                    out,
                    &format!(
                        "          <option value=\"{}\">{}</option>",
                        escape(&option.value),
                        escape(&option.label)
                    ),
                );
            }
            out.push_str("        </select>\n");
        }
        FieldBody::Radio(input) => {
            render_options(out, "radio", &name, &dom_id, &input.options, control.required)
        }
        FieldBody::Checkbox(input) => {
            render_options(out, "checkbox", &name, &dom_id, &input.options, false)
        }
        FieldBody::File(input) => {
            let multiple = if input.multiple { " multiple" } else { "" };
            let accept = if input.accept.is_empty() {
                String::new()
            } else {
                format!(" accept=\"{}\"", escape(&input.accept))
            };
            push_line(
                out,
                &format!(
                    "        <input type=\"file\" id=\"{dom_id}\" name=\"{name}\"{multiple}{accept}{required}{aria} />"
                ),
            );
        }
        FieldBody::Toggle(input) => {
            let checked = if input.default_value { " checked" } else { "" };
            push_line(
                out,
                &format!(
                    "        <input type=\"checkbox\" class=\"toggle-input\" id=\"{dom_id}\" name=\"{name}\" value=\"true\"{checked}{required}{aria} />"
                ),
            );
        }
        FieldBody::Date(_) => {
            push_line(
                out,
                &format!(
                    "        <input type=\"date\" id=\"{dom_id}\" name=\"{name}\"{required}{aria} />"
                ),
            );
        }
        body => {
            let input_type = match body {
                FieldBody::Email(_) => "email",
                FieldBody::Number(_) => "number",
                FieldBody::Phone(_) => "tel",
                FieldBody::Url(_) => "url",
                FieldBody::Password(_) => "password",
                _ => "text",
            };
            push_line(
                out,
                &format!(
                    "        <input type=\"{input_type}\" id=\"{dom_id}\" name=\"{name}\" placeholder=\"{}\"{required}{aria} />",
                    escape(field.placeholder().unwrap_or_default())
                ),
            );
        }
    }

    if !control.help_text.is_empty() {
        push_line(
            out,
            &format!(
                "        <span class=\"help-text\" id=\"{help_id}\">{}</span>",
                escape(&control.help_text)
            ),
        );
    }
    out.push_str("        <span class=\"error-msg\" role=\"alert\"></span>\n");
    out.push_str("      </div>\n");
}

/// Radio and checkbox groups. Only the first radio carries `required` so
/// the browser treats the group as one control.
fn render_options(
    out: &mut String,
    input_type: &str,
    name: &str,
    dom_id: &str,
    options: &[FieldOption],
    required: bool,
) {
    for (index, option) in options.iter().enumerate() {
        let id_attr = if index == 0 {
            format!(" id=\"{dom_id}\"")
        } else {
            String::new()
        };
        let required = if index == 0 && required { " required" } else { "" };
        out.push_str("        <label class=\"option-label\">\n");
        push_line(
            out,
            &format!(
                "          <input type=\"{input_type}\"{id_attr} name=\"{name}\" value=\"{}\"{required} />",
                escape(&option.value)
            ),
        );
        push_line(out, &format!("          <span>{}</span>", escape(&option.label)));
        out.push_str("        </label>\n");
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Escapes text for element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// JavaScript string literal that cannot close the surrounding script tag.
fn script_string(text: &str) -> String {
    serde_json::Value::String(text.to_string())
        .to_string()
        .replace("</", "<\\/")
}
