use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardStatus {
    #[default]
    Neutral,
    Good,
    Warning,
    Bad,
}

impl CardStatus {
    fn class(self) -> &'static str {
        match self {
            Self::Good => "stat-card stat-card--success",
            Self::Bad => "stat-card stat-card--error",
            Self::Warning => "stat-card stat-card--warning",
            Self::Neutral => "stat-card",
        }
    }
}

/// Summary number with an icon; `value = None` shows a dash
#[component]
pub fn StatCard(
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    #[prop(into)]
    icon_name: String,
    /// Already formatted value
    #[prop(into)]
    value: Signal<Option<String>>,
    #[prop(into, optional)]
    status: Signal<CardStatus>,
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class=move || status.get().class()>
            <div class="stat-card__icon">{icon(&icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {move || value.get().unwrap_or_else(|| "-".to_string())}
                </div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}
