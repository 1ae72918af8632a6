//! Expense analytics: category ranking, monthly trend and spending suggestions.

use shared::{CategoryTotal, ExpenseAnalytics, MonthlyTrendPoint, SpendingSuggestion};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::domain::models::expense::Expense;

/// Number of categories reported in the ranking
pub const TOP_CATEGORY_COUNT: usize = 5;

/// Month-over-month change (in percent) that triggers a suggestion
const CHANGE_THRESHOLD_PERCENT: f64 = 10.0;

/// Latest month above this multiple of the average is flagged
const ABOVE_AVERAGE_FACTOR: f64 = 1.2;

/// `(current - previous) / previous * 100`, or 0 when `previous` is 0
pub fn percentage_change(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

#[derive(Clone, Default)]
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// `None` when there are no expenses to analyse
    pub fn analyze(&self, expenses: &[Expense]) -> Option<ExpenseAnalytics> {
        if expenses.is_empty() {
            return None;
        }

        let mut newest_first: Vec<&Expense> = expenses.iter().collect();
        newest_first.sort_by(|a, b| b.month.cmp(&a.month));

        let top_categories = self.top_categories(&newest_first, TOP_CATEGORY_COUNT);

        let monthly_trend: Vec<MonthlyTrendPoint> = newest_first
            .iter()
            .rev()
            .map(|e| MonthlyTrendPoint {
                month: e.month,
                month_name: e.month_name.clone(),
                amount: e.total_expenses,
            })
            .collect();

        let total: f64 = newest_first.iter().map(|e| e.total_expenses).sum();
        let average_spending = total / newest_first.len() as f64;

        let latest = newest_first[0].total_expenses;
        let latest_change_percent = match newest_first.get(1) {
            Some(previous) => percentage_change(previous.total_expenses, latest),
            None => 0.0,
        };

        let suggestions = Self::suggestions(&top_categories, latest, latest_change_percent, average_spending);

        Some(ExpenseAnalytics {
            top_categories,
            monthly_trend,
            average_spending,
            latest_change_percent,
            suggestions,
        })
    }

    /// Sum items by exact label, largest first.
    ///
    /// Labels are grouped in the order they are first seen; the sort is stable
    /// so equal amounts keep that order.
    pub fn top_categories(&self, expenses: &[&Expense], limit: usize) -> Vec<CategoryTotal> {
        let mut totals: Vec<(String, f64)> = Vec::new();
        let mut index_by_label: HashMap<&str, usize> = HashMap::new();

        for item in expenses.iter().flat_map(|e| e.items.iter()) {
            match index_by_label.get(item.label.as_str()) {
                Some(&index) => totals[index].1 += item.amount,
                None => {
                    index_by_label.insert(item.label.as_str(), totals.len());
                    totals.push((item.label.clone(), item.amount));
                }
            }
        }

        let grand_total: f64 = totals.iter().map(|(_, amount)| amount).sum();

        totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        totals
            .into_iter()
            .take(limit)
            .map(|(label, amount)| CategoryTotal {
                share_percent: if grand_total > 0.0 { amount / grand_total * 100.0 } else { 0.0 },
                label,
                amount,
            })
            .collect()
    }

    fn suggestions(
        top_categories: &[CategoryTotal],
        latest: f64,
        change_percent: f64,
        average: f64,
    ) -> Vec<SpendingSuggestion> {
        let mut suggestions = Vec::new();

        if let Some(top) = top_categories.first() {
            suggestions.push(SpendingSuggestion::TopCategory {
                label: top.label.clone(),
                amount: top.amount,
            });
        }

        if change_percent > CHANGE_THRESHOLD_PERCENT {
            suggestions.push(SpendingSuggestion::SpendingUp { percent: change_percent });
        } else if change_percent < -CHANGE_THRESHOLD_PERCENT {
            suggestions.push(SpendingSuggestion::SpendingDown { percent: change_percent.abs() });
        }

        if average > 0.0 && latest > average * ABOVE_AVERAGE_FACTOR {
            suggestions.push(SpendingSuggestion::AboveAverage {
                percent: percentage_change(average, latest),
            });
        }

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::expense::ExpenseItem;
    use shared::{ExpenseCategory, MonthKey};

    fn expense(year: i32, month: u32, items: &[(&str, f64)]) -> Expense {
        let key = MonthKey::new(year, month).unwrap();
        let mut expense = Expense::new("u1", key, key.display_name());
        let items = items
            .iter()
            .map(|(label, amount)| ExpenseItem::new(&expense.id, label.to_string(), *amount, ExpenseCategory::Spending))
            .collect();
        expense.set_items(items);
        expense
    }

    #[test]
    fn test_percentage_change() {
        assert_eq!(percentage_change(100.0, 150.0), 50.0);
        assert_eq!(percentage_change(200.0, 100.0), -50.0);
        assert_eq!(percentage_change(0.0, 100.0), 0.0);
        assert_eq!(percentage_change(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_no_expenses_means_no_analytics() {
        assert!(AnalyticsService::new().analyze(&[]).is_none());
    }

    #[test]
    fn test_top_categories_sum_across_months_and_limit_to_five() {
        let expenses = vec![
            expense(2024, 8, &[("Food", 100.0), ("Rent", 500.0), ("Fuel", 50.0)]),
            expense(2024, 7, &[("Food", 450.0), ("Phone", 20.0), ("Gym", 30.0), ("Books", 10.0)]),
        ];
        let analytics = AnalyticsService::new().analyze(&expenses).unwrap();

        let ranking: Vec<(&str, f64)> = analytics
            .top_categories
            .iter()
            .map(|c| (c.label.as_str(), c.amount))
            .collect();
        assert_eq!(
            ranking,
            vec![("Food", 550.0), ("Rent", 500.0), ("Fuel", 50.0), ("Gym", 30.0), ("Phone", 20.0)]
        );

        let share_sum: f64 = analytics.top_categories.iter().map(|c| c.share_percent).sum();
        assert!((share_sum - (1150.0 / 1160.0 * 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_top_category_ties_keep_first_seen_order() {
        let expenses = vec![
            expense(2024, 8, &[("Water", 100.0), ("Power", 100.0)]),
            expense(2024, 7, &[("Internet", 100.0), ("Power", 0.5)]),
        ];
        let service = AnalyticsService::new();
        let refs: Vec<&Expense> = expenses.iter().collect();
        let labels: Vec<String> = service
            .top_categories(&refs, 5)
            .into_iter()
            .map(|c| c.label)
            .collect();
        assert_eq!(labels, vec!["Power", "Water", "Internet"]);

        let tied = vec![expense(2024, 8, &[("B", 10.0), ("A", 10.0), ("C", 10.0)])];
        let refs: Vec<&Expense> = tied.iter().collect();
        let labels: Vec<String> = service.top_categories(&refs, 5).into_iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_trend_and_change_use_month_order() {
        // given out of order on purpose
        let expenses = vec![
            expense(2024, 1, &[("Food", 100.0)]),
            expense(2024, 3, &[("Food", 150.0)]),
            expense(2023, 12, &[("Food", 200.0)]),
        ];
        let analytics = AnalyticsService::new().analyze(&expenses).unwrap();

        let trend: Vec<String> = analytics.monthly_trend.iter().map(|p| p.month.to_string()).collect();
        assert_eq!(trend, vec!["2023-12", "2024-01", "2024-03"]);
        assert_eq!(analytics.latest_change_percent, 50.0);
        assert_eq!(analytics.average_spending, 150.0);
    }

    #[test]
    fn test_suggestions() {
        let rising = vec![
            expense(2024, 8, &[("Food", 300.0)]),
            expense(2024, 7, &[("Food", 100.0)]),
        ];
        let analytics = AnalyticsService::new().analyze(&rising).unwrap();
        assert_eq!(
            analytics.suggestions,
            vec![
                SpendingSuggestion::TopCategory { label: "Food".to_string(), amount: 400.0 },
                SpendingSuggestion::SpendingUp { percent: 200.0 },
                SpendingSuggestion::AboveAverage { percent: 50.0 },
            ]
        );

        let falling = vec![
            expense(2024, 8, &[("Food", 80.0)]),
            expense(2024, 7, &[("Food", 100.0)]),
        ];
        let analytics = AnalyticsService::new().analyze(&falling).unwrap();
        assert!(analytics
            .suggestions
            .contains(&SpendingSuggestion::SpendingDown { percent: 20.0 }));

        let steady = vec![
            expense(2024, 8, &[("Food", 105.0)]),
            expense(2024, 7, &[("Food", 100.0)]),
        ];
        let analytics = AnalyticsService::new().analyze(&steady).unwrap();
        assert_eq!(analytics.suggestions.len(), 1);
    }

    #[test]
    fn test_single_month_has_zero_change() {
        let analytics = AnalyticsService::new()
            .analyze(&[expense(2024, 8, &[("Food", 100.0)])])
            .unwrap();
        assert_eq!(analytics.latest_change_percent, 0.0);
        assert_eq!(analytics.monthly_trend.len(), 1);
    }
}
