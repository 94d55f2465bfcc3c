use contracts::domain::a001_sales_order::dto::*;
use contracts::domain::common::code_label;
use contracts::shared::endpoint::fetch_data;
use contracts::shared::table::{format_amount, EMPTY_CELL};
use leptos::prelude::*;
use thaw::*;

use crate::layout::global_context::use_app_context;
use crate::layout::tabs::tab_labels::{detail_tab_label, sales_order_detail_key};
use crate::shared::api_client::HttpTransport;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;

fn or_dash(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(EMPTY_CELL)
        .to_string()
}

/// Расхождение суммы шапки и суммы строк (больше копейки)
fn totals_mismatch(detail: &SalesOrderDetail) -> bool {
    !detail.lines.is_empty() && (detail.lines_total() - detail.total_amount).abs() >= 0.01
}

#[component]
pub fn SalesOrderDetail(id: String, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let tabs_store = use_app_context();
    let notify = use_notifications();

    let (order, set_order) = signal::<Option<SalesOrderDetail>>(None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);

    let tab_key = sales_order_detail_key(&id);
    wasm_bindgen_futures::spawn_local(async move {
        match fetch_data::<SalesOrderDetail, _>(&HttpTransport, &detail_path(&id), &[]).await {
            Ok(detail) => {
                tabs_store.update_tab_title(&tab_key, &detail_tab_label("Order", &detail.order_number));
                let _ = set_order.try_set(Some(detail));
            }
            Err(err) => {
                log::warn!("order {} failed to load: {}", id, err);
                notify.api_error(&err);
                let _ = set_error.try_set(Some(err.user_message()));
            }
        }
        let _ = set_loading.try_set(false);
    });

    view! {
        <PageFrame page_id="a001_sales_order--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">
                        {move || order.with(|o| match o {
                            Some(o) => format!("Order {}", o.order_number),
                            None => "Order".to_string(),
                        })}
                    </h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        {icon("x")}
                        "Close"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || {
                    if loading.get() {
                        return view! {
                            <div class="page__placeholder">
                                <Spinner size=SpinnerSize::Small />
                                " Loading…"
                            </div>
                        }
                        .into_any();
                    }
                    if let Some(err) = error.get() {
                        return view! {
                            <div class="warning-box warning-box--error">
                                <strong>"Error: "</strong>
                                {err}
                            </div>
                        }
                        .into_any();
                    }
                    match order.get() {
                        Some(detail) => view! { <OrderBody detail=detail /> }.into_any(),
                        None => view! { <div class="page__placeholder">"No data"</div> }.into_any(),
                    }
                }}
            </div>
        </PageFrame>
    }
}

#[component]
fn OrderBody(detail: SalesOrderDetail) -> impl IntoView {
    let mismatch = totals_mismatch(&detail);
    let lines_total = detail.lines_total();

    let header_fields = vec![
        ("Date", detail.order_date.clone()),
        ("Status", code_label(STATUSES, &detail.status)),
        ("Customer", or_dash(&detail.customer_name)),
        ("Phone", or_dash(&detail.customer_phone)),
        ("Salesman", or_dash(&detail.salesman_name)),
        ("Warehouse", or_dash(&detail.warehouse_name)),
        ("Notes", or_dash(&detail.notes)),
    ];

    let totals = vec![
        ("Subtotal", detail.subtotal.map(format_amount)),
        ("Tax", detail.tax_amount.map(format_amount)),
        ("Total", Some(format_amount(detail.total_amount))),
    ];

    view! {
        <div class="detail-grid">
            {header_fields
                .into_iter()
                .map(|(label, value)| {
                    view! {
                        <div class="detail-grid__label">{label}</div>
                        <div class="detail-grid__value">{value}</div>
                    }
                })
                .collect_view()}
        </div>

        <h3 class="section-title">"Lines"</h3>
        <Table>
            <TableHeader>
                <TableRow>
                    <TableHeaderCell min_width=100.0>"Code"</TableHeaderCell>
                    <TableHeaderCell min_width=200.0>"Product"</TableHeaderCell>
                    <TableHeaderCell class="cell--right">"Qty"</TableHeaderCell>
                    <TableHeaderCell class="cell--right">"Price"</TableHeaderCell>
                    <TableHeaderCell class="cell--right">"Amount"</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>
                {detail
                    .lines
                    .into_iter()
                    .map(|line| {
                        view! {
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout>{or_dash(&line.product_code)}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout truncate=true>{line.product_name}</TableCellLayout>
                                </TableCell>
                                <TableCell class="cell--right">{line.quantity.to_string()}</TableCell>
                                <TableCell class="cell--right">{format_amount(line.unit_price)}</TableCell>
                                <TableCell class="cell--right">{format_amount(line.line_total)}</TableCell>
                            </TableRow>
                        }
                    })
                    .collect_view()}
            </TableBody>
        </Table>

        <div class="detail-totals">
            {totals
                .into_iter()
                .map(|(label, value)| {
                    view! {
                        <div class="detail-totals__row">
                            <span class="detail-totals__label">{label}</span>
                            <span class="detail-totals__value">
                                {value.unwrap_or_else(|| EMPTY_CELL.to_string())}
                            </span>
                        </div>
                    }
                })
                .collect_view()}
        </div>

        <Show when=move || mismatch>
            <div class="warning-box">
                {format!("Lines add up to {}, which differs from the order total.", format_amount(lines_total))}
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(total: f64, lines: &[f64]) -> SalesOrderDetail {
        SalesOrderDetail {
            id: "1".into(),
            order_number: "SO-1".into(),
            order_date: "2024-05-02".into(),
            customer_name: None,
            customer_phone: None,
            salesman_name: None,
            warehouse_name: None,
            status: "pending".into(),
            subtotal: None,
            tax_amount: None,
            total_amount: total,
            notes: None,
            lines: lines
                .iter()
                .map(|&t| SalesOrderLine {
                    product_code: None,
                    product_name: "Item".into(),
                    quantity: 1.0,
                    unit_price: t,
                    line_total: t,
                })
                .collect(),
        }
    }

    #[test]
    fn mismatch_is_reported_only_for_real_differences() {
        assert!(!totals_mismatch(&detail(30.0, &[15.0, 15.0])));
        assert!(!totals_mismatch(&detail(30.0, &[])));
        assert!(totals_mismatch(&detail(31.0, &[15.0, 15.0])));
    }

    #[test]
    fn blank_optional_fields_show_dash() {
        assert_eq!(or_dash(&None), "-");
        assert_eq!(or_dash(&Some("  ".into())), "-");
        assert_eq!(or_dash(&Some("Dubai".into())), "Dubai");
    }
}
