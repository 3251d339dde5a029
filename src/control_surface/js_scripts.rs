//! JavaScript snippets evaluated in the listing tab
//!
//! Every dynamic string is embedded as a JSON literal, which is also a valid
//! JavaScript string literal.

pub const BUTTON_ID: &str = "bulkdl-button";
pub const STATUS_ID: &str = "bulkdl-status";

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

/// Installs the trigger button and the hidden status box
///
/// Idempotent, and safe to register as a new-document script: it waits for
/// `document.body` when run early.
#[must_use]
pub fn panel_script(button_text: &str, binding: &str) -> String {
    format!(
        r#"
    (() => {{
        const install = () => {{
            if (document.getElementById({button_id})) return;

            const button = document.createElement('button');
            button.id = {button_id};
            button.textContent = {button_text};
            Object.assign(button.style, {{
                position: 'fixed', top: '100px', right: '20px', zIndex: '9999',
                padding: '10px', backgroundColor: '#4CAF50', color: 'white',
                border: 'none', borderRadius: '5px', cursor: 'pointer', fontWeight: 'bold'
            }});
            button.addEventListener('click', () => {{
                if (typeof window[{binding}] === 'function') window[{binding}]('start');
            }});
            document.body.appendChild(button);

            const status = document.createElement('div');
            status.id = {status_id};
            Object.assign(status.style, {{
                position: 'fixed', top: '150px', right: '20px', zIndex: '9999',
                padding: '10px', border: '1px solid #ddd', borderRadius: '5px',
                backgroundColor: 'white', display: 'none'
            }});
            document.body.appendChild(status);
        }};

        if (document.body) install();
        else document.addEventListener('DOMContentLoaded', install);
    }})()
"#,
        button_id = js_string(BUTTON_ID),
        status_id = js_string(STATUS_ID),
        button_text = js_string(button_text),
        binding = js_string(binding),
    )
}

/// Shows `text` in the status box, or hides the box for `None`
#[must_use]
pub fn status_script(text: Option<&str>) -> String {
    let body = match text {
        Some(text) => format!(
            "status.textContent = {}; status.style.display = 'block';",
            js_string(text)
        ),
        None => "status.style.display = 'none';".to_string(),
    };

    format!(
        r#"(() => {{ const status = document.getElementById({}); if (status) {{ {body} }} }})()"#,
        js_string(STATUS_ID)
    )
}

/// Shows an alert without blocking the evaluation
#[must_use]
pub fn alert_script(message: &str) -> String {
    format!("setTimeout(() => alert({}), 0)", js_string(message))
}

/// Asks for confirmation and answers through the binding (`confirm` / `cancel`)
#[must_use]
pub fn confirm_script(message: &str, binding: &str) -> String {
    format!(
        "setTimeout(() => window[{binding}](confirm({message}) ? 'confirm' : 'cancel'), 0)",
        binding = js_string(binding),
        message = js_string(message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_embedded_as_string_literals() {
        let script = alert_script(r#"Error: "quoted" </script>"#);
        assert_eq!(
            script,
            r#"setTimeout(() => alert("Error: \"quoted\" </script>"), 0)"#
        );
    }

    #[test]
    fn confirm_answers_through_binding() {
        let script = confirm_script("Found 3 mods. Start downloading?", "__sig");
        assert!(script.contains(r#"window["__sig"](confirm("Found 3 mods. Start downloading?")"#));
        assert!(script.contains("'confirm' : 'cancel'"));
    }

    #[test]
    fn status_script_hides_without_text() {
        assert!(status_script(None).contains("display = 'none'"));
        assert!(status_script(Some("Progress: 1/3")).contains(r#""Progress: 1/3""#));
    }

    #[test]
    fn panel_script_carries_label_and_binding() {
        let script = panel_script("Alle Mods herunterladen", "__sig");
        assert!(script.contains(r#""Alle Mods herunterladen""#));
        assert!(script.contains(r#"window["__sig"]('start')"#));
        assert!(script.contains(r#""bulkdl-status""#));
    }
}
