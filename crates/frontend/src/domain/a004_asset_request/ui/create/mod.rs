//! Форма новой заявки на холодильное оборудование.

use contracts::domain::a004_asset_request::dto::*;
use contracts::shared::endpoint::post_data;
use contracts::shared::reference_cache::ReferenceKind;
use leptos::prelude::*;
use thaw::*;

use crate::layout::global_context::use_app_context;
use crate::layout::tabs::tab_labels::ASSET_REQUESTS;
use crate::shared::api_client::HttpTransport;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_FORM;
use crate::shared::reference_options::use_reference_options;

/// Поля формы как сигналы
#[derive(Clone, Copy)]
struct AssetRequestFormVm {
    outlet_name: RwSignal<String>,
    salesman_id: RwSignal<String>,
    asset_type: RwSignal<String>,
    reason: RwSignal<String>,
}

impl AssetRequestFormVm {
    fn new() -> Self {
        Self {
            outlet_name: RwSignal::new(String::new()),
            salesman_id: RwSignal::new(String::new()),
            asset_type: RwSignal::new(ASSET_TYPES[0].0.to_string()),
            reason: RwSignal::new(String::new()),
        }
    }

    fn to_request(self) -> NewAssetRequest {
        NewAssetRequest {
            outlet_name: self.outlet_name.get_untracked(),
            salesman_id: self.salesman_id.get_untracked(),
            asset_type: self.asset_type.get_untracked(),
            reason: self.reason.get_untracked(),
        }
    }
}

#[component]
pub fn AssetRequestForm(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let tabs_store = use_app_context();
    let notify = use_notifications();
    let salesmen = use_reference_options(ReferenceKind::Salesman).options;

    let vm = AssetRequestFormVm::new();
    let saving = RwSignal::new(false);
    let form_error = RwSignal::new(None::<String>);

    let submit = move |_| {
        if saving.get_untracked() {
            return;
        }
        let request = vm.to_request();
        if let Err(err) = request.validate() {
            form_error.set(Some(err.to_string()));
            return;
        }
        form_error.set(None);
        saving.set(true);

        let request = request.trimmed();
        wasm_bindgen_futures::spawn_local(async move {
            match post_data::<_, CreatedAssetRequest, _>(&HttpTransport, CREATE_PATH, &request).await {
                Ok(created) => {
                    let number = created.request_number.unwrap_or(created.id);
                    log::info!("asset request {} created", number);
                    notify.success(format!("Request {} submitted", number));
                    tabs_store.touch_list(ASSET_REQUESTS);
                    on_close.run(());
                }
                Err(err) => {
                    notify.api_error(&err);
                    let _ = form_error.try_set(Some(err.user_message()));
                }
            }
            let _ = saving.try_set(false);
        });
    };

    view! {
        <PageFrame page_id="a004_asset_request--form" category=PAGE_CAT_FORM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"New Chiller Request"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=submit
                        disabled=saving
                    >
                        {icon("plus")}
                        {move || if saving.get() { "Submitting…" } else { "Submit" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        "Cancel"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || form_error.get().map(|msg| view! {
                    <div class="warning-box warning-box--error">{msg}</div>
                })}

                <div class="form-grid">
                    <div class="form__group">
                        <label class="form__label">"Outlet *"</label>
                        <Input value=vm.outlet_name placeholder="Outlet name" />
                    </div>

                    <div class="form__group">
                        <label class="form__label">"Salesman *"</label>
                        <Select value=vm.salesman_id>
                            <option value="">"Select salesman"</option>
                            {move || {
                                salesmen
                                    .get()
                                    .into_iter()
                                    .map(|o| view! { <option value=o.value>{o.label}</option> })
                                    .collect_view()
                            }}
                        </Select>
                    </div>

                    <div class="form__group">
                        <label class="form__label">"Asset type *"</label>
                        <Select value=vm.asset_type>
                            {ASSET_TYPES
                                .iter()
                                .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                                .collect_view()}
                        </Select>
                    </div>

                    <div class="form__group form__group--wide">
                        <label class="form__label">"Reason *"</label>
                        <Textarea value=vm.reason placeholder="Why the outlet needs the asset" attr:rows=3 />
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}
