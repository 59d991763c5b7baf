//! Upload controller: drives one file upload per selection event.
//!
//! The request is an XMLHttpRequest so the browser delivers upload progress
//! events while the body is being transmitted. Completion, success or
//! failure, always frees the single upload slot and schedules the status
//! reset; only a successful, decodable response touches the gallery cache.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{File, ProgressEvent, XmlHttpRequest};

use super::App;
use crate::constants::UPLOAD_ENDPOINT;
use crate::error::UploadError;
use crate::model::decode_upload_response;
use crate::status::UploadStatus;

/// React to a file-picker change event. Empty selection is a no-op; a
/// selection while another upload is in flight is rejected.
pub(crate) fn begin_upload(app: &Rc<App>) {
    let Some(file) = app.file_input.files().and_then(|files| files.get(0)) else {
        return;
    };

    if !app.in_flight.try_acquire() {
        log::warn!("Upload already in progress, ignoring selection");
        return;
    }

    if let Err(e) = send_request(app, &file) {
        log::error!("Failed to start upload: {:?}", e);
        app.in_flight.release();
        let failure = UploadError::Request(format!("{:?}", e));
        app.set_status(UploadStatus::Done(Err(failure.user_message())));
        app.schedule_status_reset();
    }
}

fn send_request(app: &Rc<App>, file: &File) -> Result<(), JsValue> {
    let xhr = XmlHttpRequest::new()?;

    let url = format!(
        "{}?filename={}",
        UPLOAD_ENDPOINT,
        js_sys::encode_uri_component(&file.name())
    );
    xhr.open("POST", &url)?;
    xhr.set_request_header("Content-Type", &file.type_())?;

    // Progress while the body is transmitted; once loaded == total the
    // server is processing and nothing more is observable until load.
    let app_progress = app.clone();
    let onprogress = Closure::wrap(Box::new(move |event: ProgressEvent| {
        let loaded = event.loaded() as u64;
        let total = event.total() as u64;
        if loaded == total {
            app_progress.set_status(UploadStatus::AwaitingProcessing);
        } else {
            app_progress.set_status(UploadStatus::Uploading { loaded, total });
        }
    }) as Box<dyn FnMut(ProgressEvent)>);
    xhr.upload()?
        .set_onprogress(Some(onprogress.as_ref().unchecked_ref()));
    onprogress.forget(); // Leak the closure to keep it alive

    // Completion: any HTTP status lands here; the body decides the outcome.
    let app_load = app.clone();
    let xhr_load = xhr.clone();
    let onload = Closure::wrap(Box::new(move |_event: ProgressEvent| {
        app_load.in_flight.release();
        finish_upload(&app_load, &xhr_load);
        app_load.schedule_status_reset();
    }) as Box<dyn FnMut(ProgressEvent)>);
    xhr.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();

    // Transport failure (network error, aborted connection)
    let app_error = app.clone();
    let onerror = Closure::wrap(Box::new(move |_event: ProgressEvent| {
        app_error.in_flight.release();
        log::warn!("Upload request failed at the transport level");
        let failure = UploadError::Request("network error".to_string());
        app_error.set_status(UploadStatus::Done(Err(failure.user_message())));
        app_error.schedule_status_reset();
    }) as Box<dyn FnMut(ProgressEvent)>);
    xhr.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();

    xhr.send_with_opt_blob(Some(file.as_ref()))
}

/// Decode the response and apply its outcome: append + persist + re-render
/// on success, status-only on failure.
fn finish_upload(app: &Rc<App>, xhr: &XmlHttpRequest) {
    let outcome = xhr
        .response_text()
        .ok()
        .flatten()
        .ok_or_else(|| UploadError::Request("empty response body".to_string()))
        .and_then(|body| decode_upload_response(&body));

    match outcome {
        Ok(record) => {
            log::info!("Upload complete: {}/{}", record.hash, record.filename);
            if let Err(e) = app.store.borrow_mut().append(record) {
                log::error!("Failed to persist gallery cache: {}", e);
            }
            app.render_gallery();
            app.file_input.set_value("");
            app.set_status(UploadStatus::Done(Ok(())));
        }
        Err(err) => {
            log::warn!("Upload failed: {}", err);
            app.set_status(UploadStatus::Done(Err(err.user_message())));
        }
    }
}
