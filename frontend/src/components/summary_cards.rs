use yew::prelude::*;
use shared::{format_rupiah, FinanceSummary};

#[derive(Properties, PartialEq)]
pub struct SummaryCardsProps {
    pub summary: FinanceSummary,
}

#[function_component(SummaryCards)]
pub fn summary_cards(props: &SummaryCardsProps) -> Html {
    let summary = &props.summary;
    let balance_class = if summary.balance >= 0.0 {
        "summary-card balance positive"
    } else {
        "summary-card balance negative"
    };

    html! {
        <section class="summary-cards">
            <div class="summary-card income">
                <span class="summary-label">{"Total Income"}</span>
                <span class="summary-value">{format_rupiah(summary.total_income)}</span>
            </div>
            <div class="summary-card expenses">
                <span class="summary-label">{"Total Expenses"}</span>
                <span class="summary-value">{format_rupiah(summary.total_expenses)}</span>
            </div>
            <div class={balance_class}>
                <span class="summary-label">{"Balance"}</span>
                <span class="summary-value">{format_rupiah(summary.balance)}</span>
            </div>
            <div class="summary-card average">
                <span class="summary-label">{"Average Expenses"}</span>
                <span class="summary-value">{format_rupiah(summary.average_expenses)}</span>
                <span class="summary-hint">{format!("over {} month(s)", summary.month_count)}</span>
            </div>
            {if summary.total_savings > 0.0 {
                html! {
                    <div class="summary-card savings">
                        <span class="summary-label">{"Total Savings"}</span>
                        <span class="summary-value">{format_rupiah(summary.total_savings)}</span>
                    </div>
                }
            } else { html! {} }}
        </section>
    }
}
