//! Форма регистрации обращения в колл-центр.

use contracts::domain::a005_call_center_ticket::dto::*;
use contracts::shared::endpoint::post_data;
use leptos::prelude::*;
use thaw::*;

use crate::layout::global_context::use_app_context;
use crate::layout::tabs::tab_labels::TICKETS;
use crate::shared::api_client::HttpTransport;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_FORM;

const DEFAULT_PRIORITY: &str = "medium";

#[derive(Clone, Copy)]
struct TicketFormVm {
    customer_name: RwSignal<String>,
    phone: RwSignal<String>,
    subject: RwSignal<String>,
    description: RwSignal<String>,
    priority: RwSignal<String>,
}

impl TicketFormVm {
    fn new() -> Self {
        Self {
            customer_name: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            subject: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            priority: RwSignal::new(DEFAULT_PRIORITY.to_string()),
        }
    }

    fn to_request(self) -> NewTicketRequest {
        NewTicketRequest {
            customer_name: self.customer_name.get_untracked(),
            phone: self.phone.get_untracked(),
            subject: self.subject.get_untracked(),
            description: self.description.get_untracked(),
            priority: self.priority.get_untracked(),
        }
    }
}

#[component]
pub fn TicketForm(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let tabs_store = use_app_context();
    let notify = use_notifications();

    let vm = TicketFormVm::new();
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
            match post_data::<_, CreatedTicket, _>(&HttpTransport, CREATE_PATH, &request).await {
                Ok(created) => {
                    let number = created.ticket_number.unwrap_or(created.id);
                    log::info!("ticket {} created", number);
                    notify.success(format!("Ticket {} created", number));
                    tabs_store.touch_list(TICKETS);
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
        <PageFrame page_id="a005_call_center_ticket--form" category=PAGE_CAT_FORM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"New Ticket"</h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=submit disabled=saving>
                        {icon("plus")}
                        {move || if saving.get() { "Saving…" } else { "Create" }}
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
                        <label class="form__label">"Customer name *"</label>
                        <Input value=vm.customer_name placeholder="Outlet or person" />
                    </div>

                    <div class="form__group">
                        <label class="form__label">"Phone *"</label>
                        <Input value=vm.phone placeholder="+971 50 123 4567" />
                    </div>

                    <div class="form__group">
                        <label class="form__label">"Priority"</label>
                        <Select value=vm.priority>
                            {PRIORITIES
                                .iter()
                                .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                                .collect_view()}
                        </Select>
                    </div>

                    <div class="form__group form__group--wide">
                        <label class="form__label">"Subject *"</label>
                        <Input value=vm.subject placeholder="Short summary" />
                    </div>

                    <div class="form__group form__group--wide">
                        <label class="form__label">"Description"</label>
                        <Textarea value=vm.description placeholder="Details of the call" attr:rows=4 />
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::validation::TICKET_PRIORITIES;

    #[test]
    fn default_priority_is_a_valid_code() {
        assert!(TICKET_PRIORITIES.contains(&DEFAULT_PRIORITY));
        assert!(PRIORITIES.iter().any(|(v, _)| *v == DEFAULT_PRIORITY));
    }
}
