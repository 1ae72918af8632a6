use yew::prelude::*;
use shared::{format_rupiah, ExpenseAnalytics};

#[derive(Properties, PartialEq)]
pub struct ExpenseAnalyticsViewProps {
    pub analytics: Option<ExpenseAnalytics>,
}

#[function_component(ExpenseAnalyticsView)]
pub fn expense_analytics_view(props: &ExpenseAnalyticsViewProps) -> Html {
    let Some(analytics) = props.analytics.as_ref() else {
        return html! {
            <section class="analytics-section">
                <h2>{"Expense Analytics"}</h2>
                <div class="empty-state">{"Record an expense to see analytics."}</div>
            </section>
        };
    };

    // bars are scaled against the largest month
    let max_month = analytics
        .monthly_trend
        .iter()
        .map(|point| point.amount)
        .fold(0.0_f64, f64::max);

    let change_class = if analytics.latest_change_percent > 0.0 {
        "change up"
    } else if analytics.latest_change_percent < 0.0 {
        "change down"
    } else {
        "change flat"
    };

    html! {
        <section class="analytics-section">
            <h2>{"Expense Analytics"}</h2>

            <div class="analytics-overview">
                <span>{"Average monthly spending: "}<strong>{format_rupiah(analytics.average_spending)}</strong></span>
                <span class={change_class}>
                    {format!("{:+.1}% vs previous month", analytics.latest_change_percent)}
                </span>
            </div>

            {if analytics.suggestions.is_empty() {
                html! {}
            } else {
                html! {
                    <ul class="suggestions">
                        {for analytics.suggestions.iter().map(|suggestion| {
                            let class = if suggestion.is_warning() { "suggestion warning" } else { "suggestion info" };
                            html! { <li class={class}>{suggestion.message()}</li> }
                        })}
                    </ul>
                }
            }}

            <div class="top-categories">
                <h3>{"Top Categories"}</h3>
                <table class="categories-table">
                    <thead>
                        <tr>
                            <th>{"Category"}</th>
                            <th>{"Amount"}</th>
                            <th>{"Share"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {for analytics.top_categories.iter().map(|category| html! {
                            <tr>
                                <td class="label">{&category.label}</td>
                                <td class="amount">{format_rupiah(category.amount)}</td>
                                <td class="share">{format!("{:.1}%", category.share_percent)}</td>
                            </tr>
                        })}
                    </tbody>
                </table>
            </div>

            <div class="monthly-trend">
                <h3>{"Monthly Trend"}</h3>
                {for analytics.monthly_trend.iter().map(|point| {
                    let width = if max_month > 0.0 { point.amount / max_month * 100.0 } else { 0.0 };
                    html! {
                        <div class="trend-row">
                            <span class="trend-month">{&point.month_name}</span>
                            <div class="trend-bar-track">
                                <div class="trend-bar" style={format!("width: {:.1}%", width)}></div>
                            </div>
                            <span class="trend-amount">{format_rupiah(point.amount)}</span>
                        </div>
                    }
                })}
            </div>
        </section>
    }
}
