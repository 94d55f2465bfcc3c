//! Date range filter (`date_from` / `date_to`, yyyy-mm-dd)

use chrono::{Datelike, NaiveDate, Utc};
use contracts::shared::list_query::ListQuery;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct DateRange {
    pub from_key: &'static str,
    pub to_key: &'static str,
    pub from: RwSignal<String>,
    pub to: RwSignal<String>,
}

impl DateRange {
    pub fn empty(from_key: &'static str, to_key: &'static str) -> Self {
        Self {
            from_key,
            to_key,
            from: RwSignal::new(String::new()),
            to: RwSignal::new(String::new()),
        }
    }

    /// С первого числа текущего месяца по сегодня
    pub fn month_to_date(from_key: &'static str, to_key: &'static str) -> Self {
        let (from, to) = month_to_date(Utc::now().date_naive());
        let range = Self::empty(from_key, to_key);
        range.from.set(from);
        range.to.set(to);
        range
    }

    pub fn apply(&self, query: ListQuery) -> ListQuery {
        let (from, to) = ordered(&self.from.get(), &self.to.get());
        query.with_text(self.from_key, &from).with_text(self.to_key, &to)
    }

    pub fn clear(&self) {
        self.from.set(String::new());
        self.to.set(String::new());
    }

    pub fn is_set(&self) -> bool {
        !self.from.with(String::is_empty) || !self.to.with(String::is_empty)
    }
}

fn month_to_date(today: NaiveDate) -> (String, String) {
    let first = today.with_day(1).unwrap_or(today);
    (
        first.format("%Y-%m-%d").to_string(),
        today.format("%Y-%m-%d").to_string(),
    )
}

/// Перепутанные границы меняются местами; пустые остаются пустыми
fn ordered(from: &str, to: &str) -> (String, String) {
    let from = from.trim();
    let to = to.trim();
    if !from.is_empty() && !to.is_empty() && from > to {
        (to.to_string(), from.to_string())
    } else {
        (from.to_string(), to.to_string())
    }
}

#[component]
pub fn DateRangeFilter(range: DateRange, #[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="filter-field">
            <span class="filter-field__label">{label}</span>
            <input
                type="date"
                class="date-input"
                prop:value=move || range.from.get()
                on:input=move |ev| range.from.set(event_target_value(&ev))
            />
            <span class="filter-field__separator">"–"</span>
            <input
                type="date"
                class="date-input"
                prop:value=move || range.to.get()
                on:input=move |ev| range.to.set(event_target_value(&ev))
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_to_date_starts_on_the_first() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        assert_eq!(
            month_to_date(today),
            ("2024-03-01".to_string(), "2024-03-17".to_string())
        );
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        assert_eq!(
            ordered("2024-05-10", "2024-05-01"),
            ("2024-05-01".to_string(), "2024-05-10".to_string())
        );
        assert_eq!(ordered("", "2024-05-01"), (String::new(), "2024-05-01".to_string()));
    }
}
