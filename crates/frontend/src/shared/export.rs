//! Выгрузка списков: ERP готовит файл, браузер скачивает его через наш прокси

use contracts::shared::api_error::ApiError;
use contracts::shared::endpoint::fetch_data;
use contracts::shared::export::{download_url, ExportEndpoint, ExportFile, ExportFormat};
use contracts::shared::list_query::ListQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

use super::api_client::HttpTransport;
use super::api_utils::api_base;
use super::icons::icon;
use super::notifications::use_notifications;

/// Запрашивает файл выгрузки с текущими фильтрами
pub async fn request_export(
    endpoint: &ExportEndpoint,
    query: &ListQuery,
    format: ExportFormat,
) -> Result<ExportFile, ApiError> {
    let params = endpoint.request_params(query, format);
    fetch_data(&HttpTransport, endpoint.path, &params).await
}

/// Скачивание через временную ссылку
pub fn start_download(url: &str, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;
    anchor.set_href(url);
    anchor.set_download(filename);

    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;
    Ok(())
}

/// Кнопки выгрузки в Excel и CSV
#[component]
pub fn ExportButtons(
    endpoint: &'static ExportEndpoint,
    /// Фильтры списка
    #[prop(into)]
    query: Signal<ListQuery>,
) -> impl IntoView {
    let notify = use_notifications();
    let busy = RwSignal::new(false);

    let export = move |format: ExportFormat| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        let query = query.get_untracked();
        spawn_local(async move {
            match request_export(endpoint, &query, format).await {
                Ok(file) => {
                    let url = download_url(&api_base(), &file);
                    log::info!("export ready: {}", file.file_name);
                    if let Err(e) = start_download(&url, &file.file_name) {
                        notify.error(format!("Download failed: {}", e));
                    }
                }
                Err(err) => notify.api_error(&err),
            }
            let _ = busy.try_set(false);
        });
    };

    [ExportFormat::Xlsx, ExportFormat::Csv]
        .into_iter()
        .map(|format| {
            view! {
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=busy
                    on_click=move |_| export(format)
                >
                    {icon("download")}
                    {format.label()}
                </Button>
            }
        })
        .collect_view()
}
