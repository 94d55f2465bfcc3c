use crate::layout::center::tabs::Tabs;
use crate::layout::global_context::{use_app_context, AppGlobalContext};
use crate::layout::left::Sidebar;
use crate::layout::Shell;
use crate::shared::notifications::{NotificationService, Snackbar};
use crate::system::session::SessionContext;
use leptos::prelude::*;

#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = use_app_context();

    // Восстанавливает вкладку из URL один раз при создании
    tabs_store.init_router_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <Tabs /> }.into_any()
        />
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());
    provide_context(NotificationService::new());
    provide_context(SessionContext::new());

    view! {
        <MainLayout />
        <Snackbar />
    }
}
