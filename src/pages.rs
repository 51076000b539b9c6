//! HTML for the upload and result pages.

use std::fmt::Write;

use crate::{APP_NAME_PRETTY, LanguageOption, ResultDisplay};

/// Route the upload form posts to.
pub const SUBMIT_PATH: &str = "/submit";

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #f9fafb; color: #1f2937; }
.page { min-height: 100vh; display: flex; align-items: center; justify-content: center; padding: 1rem; }
.card { width: 100%; max-width: 28rem; background: #fff; border-radius: 0.75rem; box-shadow: 0 10px 15px rgba(0, 0, 0, 0.1); padding: 1.5rem; }
.header { text-align: center; padding-bottom: 1rem; border-bottom: 1px solid #e5e7eb; margin-bottom: 1.5rem; }
.header h2 { font-size: 1.875rem; margin: 0 0 0.5rem; }
.header p { color: #4b5563; margin: 0; }
label { display: block; font-size: 0.875rem; font-weight: 500; color: #374151; margin-bottom: 0.5rem; }
.field { margin-bottom: 1.5rem; }
.drop { display: flex; flex-direction: column; align-items: center; justify-content: center; height: 8rem; border: 2px dashed #d1d5db; border-radius: 0.5rem; background: #f9fafb; cursor: pointer; }
.drop:hover { background: #f3f4f6; }
.drop p { margin: 0.25rem 0; font-size: 0.875rem; color: #6b7280; }
.drop .hint { font-size: 0.75rem; color: #9ca3af; }
.drop input { display: none; }
select { display: block; width: 100%; padding: 0.5rem 0.75rem; border: 1px solid #d1d5db; border-radius: 0.375rem; background: #fff; }
button { width: 100%; display: flex; align-items: center; justify-content: center; padding: 0.5rem 1rem; background: #2563eb; color: #fff; font-weight: 600; border: 0; border-radius: 0.375rem; cursor: pointer; }
button:hover { background: #1d4ed8; }
button:disabled { opacity: 0.7; cursor: wait; }
.spinner { display: none; width: 1.25rem; height: 1.25rem; margin-right: 0.5rem; animation: spin 1s linear infinite; }
button.submitting .spinner { display: inline-block; }
@keyframes spin { to { transform: rotate(360deg); } }
.alert { padding: 0.75rem 1rem; margin-bottom: 1.5rem; border-radius: 0.375rem; background: #fef2f2; color: #b91c1c; border: 1px solid #fecaca; }
.result { min-height: 100vh; display: flex; flex-direction: column; align-items: center; justify-content: center; background: #f3f4f6; text-align: center; padding: 1.5rem; }
.result h1 { font-size: 1.875rem; margin-bottom: 1rem; }
.result .line { font-size: 1.125rem; color: #374151; margin: 0 0 0.5rem; }
.message { font-weight: 500; }
.message.success { color: #16a34a; }
.message.failure { color: #dc2626; }
.transcription { text-align: left; margin-top: 1.5rem; }
.transcription p { color: #374151; white-space: pre-wrap; }
"#;

// Mirrors the server-side checks so the user hears about a wrong file type
// as soon as it is picked, and keeps the button disabled while submitting.
// Pages restored from the back/forward cache come back ready to submit.
const SCRIPT: &str = r#"
const form = document.getElementById("upload-form");
const input = document.getElementById("file-upload");
const label = document.getElementById("file-label");
const button = document.getElementById("submit-button");
document.getElementById("drop-area").addEventListener("click", () => input.click());
input.addEventListener("change", () => {
  const file = input.files && input.files[0];
  if (!file) { label.textContent = label.dataset.placeholder; return; }
  if (file.type !== "video/mp4") {
    alert("Only MP4 video files are allowed. Please select an MP4 file.");
    input.value = "";
    label.textContent = label.dataset.placeholder;
    return;
  }
  label.textContent = file.name;
});
form.addEventListener("submit", (event) => {
  if (!input.files || !input.files[0]) {
    event.preventDefault();
    alert("Please upload a valid MP4 file.");
    return;
  }
  if (!document.getElementById("select-option").value) {
    event.preventDefault();
    alert("Please select a language option.");
    return;
  }
  button.disabled = true;
  button.classList.add("submitting");
  document.getElementById("submit-label").textContent = "Generating...";
});
window.addEventListener("pageshow", () => {
  button.disabled = false;
  button.classList.remove("submitting");
  document.getElementById("submit-label").textContent = "Submit";
});
"#;

const SPINNER: &str = r#"<svg class="spinner" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24"><circle cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4" opacity="0.25"></circle><path fill="currentColor" opacity="0.75" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4z"></path></svg>"#;

const FILE_PLACEHOLDER: &str = "Click to upload .mp4 file or drag and drop";

/// What the upload page needs to know to render.
#[derive(Debug, Clone, Default)]
pub struct UploadView {
    /// Language to keep selected, e.g. after a failed attempt.
    pub language: Option<LanguageOption>,
    /// Problem to show above the form.
    pub alert: Option<String>,
    /// Size hint shown under the drop area.
    pub max_upload_mb: u64,
}

/// Escapes text for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        STYLE,
        body
    )
}

/// Renders the upload form.
pub fn upload_page(view: &UploadView) -> String {
    let mut body = String::new();
    body.push_str("<div class=\"page\"><div class=\"card\">\n");
    let _ = write!(
        body,
        "<div class=\"header\"><h2>{}</h2><p>Upload a file and select an option to proceed.</p></div>\n",
        escape_html(APP_NAME_PRETTY)
    );

    if let Some(alert) = &view.alert {
        let _ = writeln!(
            body,
            "<div class=\"alert\" role=\"alert\">{}</div>",
            escape_html(alert)
        );
    }

    let _ = writeln!(
        body,
        "<form id=\"upload-form\" method=\"POST\" action=\"{SUBMIT_PATH}\" enctype=\"multipart/form-data\">"
    );

    body.push_str("<div class=\"field\">\n<label for=\"file-upload\">Upload your file</label>\n");
    body.push_str("<div id=\"drop-area\" class=\"drop\">\n");
    let _ = writeln!(
        body,
        "<p id=\"file-label\" data-placeholder=\"{0}\">{0}</p>",
        FILE_PLACEHOLDER
    );
    let _ = writeln!(
        body,
        "<p class=\"hint\">Max file size: {}MB</p>",
        view.max_upload_mb
    );
    body.push_str("<input id=\"file-upload\" name=\"file\" type=\"file\">\n</div>\n</div>\n");

    body.push_str("<div class=\"field\">\n<label for=\"select-option\">Choose an option</label>\n");
    body.push_str("<select id=\"select-option\" name=\"option\">\n");
    let placeholder_selected = if view.language.is_none() { " selected" } else { "" };
    let _ = writeln!(
        body,
        "<option value=\"\" disabled{placeholder_selected}>Select a language</option>"
    );
    for option in LanguageOption::ALL {
        let selected = if view.language == Some(option) { " selected" } else { "" };
        let _ = writeln!(
            body,
            "<option value=\"{}\"{}>{}</option>",
            option.code(),
            selected,
            option.label()
        );
    }
    body.push_str("</select>\n</div>\n");

    let _ = writeln!(
        body,
        "<button id=\"submit-button\" type=\"submit\">{SPINNER}<span id=\"submit-label\">Submit</span></button>"
    );
    body.push_str("</form>\n</div></div>\n");
    let _ = writeln!(body, "<script>{SCRIPT}</script>");

    document(APP_NAME_PRETTY, &body)
}

/// Renders the result page.
pub fn result_page(display: &ResultDisplay) -> String {
    let mut body = String::new();
    body.push_str("<div class=\"result\">\n<h1>Upload Result</h1>\n");
    let _ = writeln!(
        body,
        "<p class=\"line\">Filename: {}</p>",
        escape_html(&display.filename)
    );
    let _ = writeln!(
        body,
        "<p class=\"line\">Language: {}</p>",
        display.language_label()
    );
    let _ = writeln!(
        body,
        "<p class=\"line\">Status: {}</p>",
        display.status().label()
    );
    let _ = writeln!(
        body,
        "<p class=\"message {}\">{}</p>",
        display.message_tone().css_class(),
        escape_html(&display.message)
    );
    let _ = writeln!(
        body,
        "<div class=\"transcription\"><h2>Transcription:</h2><p>{}</p></div>",
        escape_html(&display.transcription)
    );
    body.push_str("</div>\n");

    document("Upload Result", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_upload_page_lists_every_option() {
        let html = upload_page(&UploadView {
            max_upload_mb: 500,
            ..Default::default()
        });
        assert!(html.contains("AI Mp4 to Text Translator"));
        assert!(html.contains("<option value=\"\" disabled selected>Select a language</option>"));
        assert!(html.contains("<option value=\"eng\">English</option>"));
        assert!(html.contains("<option value=\"fr\">French</option>"));
        assert!(html.contains("<option value=\"ar\">Arabic</option>"));
        assert!(html.contains("<option value=\"other\">Others</option>"));
        assert!(html.contains("Max file size: 500MB"));
        assert!(html.contains("action=\"/submit\""));
        assert!(html.contains("enctype=\"multipart/form-data\""));
        assert!(!html.contains("role=\"alert\""));
    }

    #[test]
    fn test_submit_button_resets_on_page_restore() {
        let html = upload_page(&UploadView::default());
        let restore = html
            .find("addEventListener(\"pageshow\"")
            .expect("pageshow handler");
        let handler = &html[restore..];
        assert!(handler.contains("button.disabled = false;"));
        assert!(handler.contains("button.classList.remove(\"submitting\");"));
        assert!(handler.contains("textContent = \"Submit\";"));
    }

    #[test]
    fn test_upload_page_has_no_accept_filter() {
        let html = upload_page(&UploadView::default());
        assert!(!html.contains("accept="));
    }

    #[test]
    fn test_upload_page_keeps_language_and_shows_alert() {
        let html = upload_page(&UploadView {
            language: Some(LanguageOption::Ar),
            alert: Some("Failed to upload file: <bad>".to_string()),
            max_upload_mb: 500,
        });
        assert!(html.contains("<option value=\"ar\" selected>Arabic</option>"));
        assert!(html.contains("<option value=\"\" disabled>Select a language</option>"));
        assert!(html.contains("Failed to upload file: &lt;bad&gt;"));
    }

    #[test]
    fn test_result_page_renders_values() {
        let display = ResultDisplay::from_params(
            Some("clip.mp4"),
            Some("ar"),
            Some("Submitted successfully!"),
            Some("line one\nline <two>"),
        );
        let html = result_page(&display);
        assert!(html.contains("Filename: clip.mp4"));
        assert!(html.contains("Language: Arabic"));
        assert!(html.contains("Status: Completed"));
        assert!(html.contains("<p class=\"message success\">Submitted successfully!</p>"));
        assert!(html.contains("line one\nline &lt;two&gt;"));
    }

    #[test]
    fn test_result_page_failure_style() {
        let display = ResultDisplay::from_params(None, Some("other"), Some("Failed: bad codec"), None);
        let html = result_page(&display);
        assert!(html.contains("Language: Others"));
        assert!(html.contains("Status: Processing"));
        assert!(html.contains("<p class=\"message failure\">Failed: bad codec</p>"));
    }

    #[test]
    fn test_result_page_defaults() {
        let html = result_page(&ResultDisplay::default());
        assert!(html.contains("Filename: Unknown file"));
        assert!(html.contains("Language: Not selected"));
        assert!(html.contains("No message available"));
        assert!(html.contains("No transcription available"));
        assert!(!html.contains("undefined"));
    }
}
