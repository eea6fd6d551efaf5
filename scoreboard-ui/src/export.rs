//! CSV Export
//!
//! Builds `student_scores.csv` and hands it to the browser as a download.

use wasm_bindgen::JsCast;

use crate::records::StudentRecord;

pub const EXPORT_FILE_NAME: &str = "student_scores.csv";

const HEADER: [&str; 7] = ["Register Number", "Name", "D", "S", "C", "I", "Assignment"];

/// CSV text for `records`, or `None` when there is nothing to export.
///
/// Fields are joined as-is; the register number is wrapped as `="value"` so
/// spreadsheets keep leading zeros.
pub fn build_csv(records: &[StudentRecord]) -> Option<String> {
    if records.is_empty() {
        return None;
    }

    let mut lines = vec![HEADER.join(",")];
    for record in records {
        let [d, s, c, i] = record.score_cells();
        lines.push(
            [
                format!("=\"{}\"", record.register_number),
                record.name.clone(),
                d,
                s,
                c,
                i,
                record.assignment.clone(),
            ]
            .join(","),
        );
    }
    Some(lines.join("\n"))
}

/// Trigger a browser download of `content` through a Blob object URL
pub fn download_csv(content: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let parts = js_sys::Array::of1(&content.into());
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/csv;charset=utf-8;");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|_| "could not create blob")?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "could not create object URL")?;

    let anchor = document
        .create_element("a")
        .map_err(|_| "could not create link")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "link is not an anchor")?;
    anchor.set_href(&url);
    anchor.set_download(EXPORT_FILE_NAME);

    if let Some(body) = document.body() {
        let _ = body.append_child(&anchor);
        anchor.click();
        let _ = body.remove_child(&anchor);
    } else {
        anchor.click();
    }

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}
