use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use chrono::Datelike;
use thiserror::Error;

/// Maximum length of a user name or an expense label
pub const MAX_NAME_LENGTH: usize = 100;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Canonical ledger period identifier, rendered as `YYYY-MM`.
///
/// Ordering is chronological (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub const MIN_YEAR: i32 = 1900;
    pub const MAX_YEAR: i32 = 2100;

    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(format!("{:04}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        let now = chrono::Local::now();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Human-readable name, e.g. "August 2024"
    pub fn display_name(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ValidationError::InvalidMonth(trimmed.to_string());

        let (year, month) = trimmed.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// English month name for a 1-based month number
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("January")
}

/// Years offered by the month pickers: five back, ten ahead
pub fn selectable_years(current_year: i32) -> Vec<i32> {
    ((current_year - 5)..=(current_year + 10)).collect()
}

/// Format an amount the way the ledger displays money, e.g. "Rp 5.000.000"
pub fn format_rupiah(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if rounded < 0.0 {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// Explicit classification of an expense item.
///
/// Savings items are money set aside rather than spent; they count towards
/// the expense total but are also reported separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    #[default]
    Spending,
    Savings,
}

impl ExpenseCategory {
    const SAVINGS_KEYWORDS: [&'static str; 2] = ["tabungan", "savings"];

    /// Pre-select a category from the free-text label.
    ///
    /// Only a suggestion for forms and for requests that omit the category;
    /// calculations always use the stored tag.
    pub fn suggest_for_label(label: &str) -> Self {
        let lowered = label.to_lowercase();
        if Self::SAVINGS_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            ExpenseCategory::Savings
        } else {
            ExpenseCategory::Spending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Spending => "spending",
            ExpenseCategory::Savings => "savings",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ExpenseCategory::Spending => "Spending",
            ExpenseCategory::Savings => "Savings",
        }
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spending" => Ok(ExpenseCategory::Spending),
            "savings" => Ok(ExpenseCategory::Savings),
            other => Err(format!("Unknown expense category: {}", other)),
        }
    }
}

/// Input validation failures, reported before anything is persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Name cannot exceed {0} characters")]
    NameTooLong(usize),
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
    #[error("'{0}' is not a valid amount")]
    InvalidAmount(String),
    #[error("Amount must be greater than zero")]
    AmountNotPositive,
    #[error("Expense label cannot be empty")]
    EmptyLabel,
    #[error("Expense label cannot exceed {0} characters")]
    LabelTooLong(usize),
    #[error("Add at least one expense item with a label and an amount")]
    NoExpenseItems,
}

/// Validate and trim a display name
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong(MAX_NAME_LENGTH));
    }
    Ok(trimmed.to_string())
}

/// Amounts must be finite and strictly positive
pub fn validate_amount(amount: f64) -> Result<f64, ValidationError> {
    if !amount.is_finite() {
        return Err(ValidationError::InvalidAmount(amount.to_string()));
    }
    if amount <= 0.0 {
        return Err(ValidationError::AmountNotPositive);
    }
    Ok(amount)
}

/// Parse a user-typed Rupiah amount.
///
/// An optional `Rp` prefix is ignored, as are spaces and underscores. Both `.`
/// and `,` group thousands when followed by exactly three digits, so
/// `1.200.000`, `1,200,000` and `Rp 1.200.000` all read as 1200000. A last
/// separator followed by any other number of digits starts the fraction, so
/// `12.5` reads as 12.5 and `1,5` as 1.5.
pub fn parse_amount(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    let invalid = || ValidationError::InvalidAmount(trimmed.to_string());

    let cleaned: String = strip_currency_prefix(trimmed)
        .chars()
        .filter(|c| !matches!(c, '_' | ' ' | '\u{a0}'))
        .collect();
    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };

    let (whole, fraction) = match digits.rfind(['.', ',']) {
        Some(pos) if digits.len() - pos - 1 != 3 => (&digits[..pos], Some(&digits[pos + 1..])),
        _ => (digits, None),
    };

    let whole = ungroup_digits(whole).ok_or_else(invalid)?;
    let number = match fraction {
        None => whole,
        Some(fraction) if is_digits(fraction) => format!("{}.{}", whole, fraction),
        Some(_) => return Err(invalid()),
    };

    let amount = number.parse::<f64>().map_err(|_| invalid())?;
    validate_amount(if negative { -amount } else { amount })
}

fn strip_currency_prefix(input: &str) -> &str {
    match input.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("rp") => {
            input[2..].trim_start_matches('.').trim_start()
        }
        _ => input,
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Drop `.` / `,` thousands separators; every group after the first must
/// have exactly three digits
fn ungroup_digits(whole: &str) -> Option<String> {
    let mut groups = whole.split(['.', ',']);
    let mut digits = groups.next().filter(|first| is_digits(first))?.to_string();
    for group in groups {
        if group.len() != 3 || !is_digits(group) {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

fn validate_month_name(month_name: &Option<String>) -> Result<(), ValidationError> {
    if let Some(name) = month_name {
        validate_name(name)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name).map(|_| ())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: User,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
}

// ---------------------------------------------------------------------------
// Incomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: String,
    pub user_id: String,
    pub month: MonthKey,
    pub month_name: String,
    pub salary: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIncomeRequest {
    pub month: MonthKey,
    /// Defaults to the month key's display name
    #[serde(default)]
    pub month_name: Option<String>,
    pub salary: f64,
}

impl CreateIncomeRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_amount(self.salary)?;
        validate_month_name(&self.month_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateIncomeRequest {
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub month_name: Option<String>,
}

impl UpdateIncomeRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(salary) = self.salary {
            validate_amount(salary)?;
        }
        validate_month_name(&self.month_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeResponse {
    pub income: Income,
    /// True when an existing income for the same month was overwritten
    pub replaced: bool,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeListResponse {
    pub incomes: Vec<Income>,
}

// ---------------------------------------------------------------------------
// Expenses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub id: String,
    pub expense_id: String,
    pub label: String,
    pub amount: f64,
    #[serde(default)]
    pub category: ExpenseCategory,
}

/// An expense item as entered by the user, before it has an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItemInput {
    pub label: String,
    pub amount: f64,
    /// Suggested from the label when omitted
    #[serde(default)]
    pub category: Option<ExpenseCategory>,
}

impl ExpenseItemInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let label = self.label.trim();
        if label.is_empty() {
            return Err(ValidationError::EmptyLabel);
        }
        if label.chars().count() > MAX_NAME_LENGTH {
            return Err(ValidationError::LabelTooLong(MAX_NAME_LENGTH));
        }
        validate_amount(self.amount).map(|_| ())
    }

    pub fn resolved_category(&self) -> ExpenseCategory {
        self.category
            .unwrap_or_else(|| ExpenseCategory::suggest_for_label(&self.label))
    }
}

fn validate_items(items: &[ExpenseItemInput]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::NoExpenseItems);
    }
    items.iter().try_for_each(ExpenseItemInput::validate)
}

/// Sum of item amounts; the only way an expense total is ever computed
pub fn total_of(items: &[ExpenseItemInput]) -> f64 {
    items.iter().map(|item| item.amount).sum()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub month: MonthKey,
    pub month_name: String,
    /// Always equal to the sum of `items[].amount`
    pub total_expenses: f64,
    #[serde(default)]
    pub items: Vec<ExpenseItem>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub month: MonthKey,
    #[serde(default)]
    pub month_name: Option<String>,
    pub items: Vec<ExpenseItemInput>,
}

impl CreateExpenseRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_items(&self.items)?;
        validate_month_name(&self.month_name)
    }
}

/// Full replacement of an expense's items; the total is recomputed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseRequest {
    #[serde(default)]
    pub month_name: Option<String>,
    pub items: Vec<ExpenseItemInput>,
}

impl UpdateExpenseRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_items(&self.items)?;
        validate_month_name(&self.month_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseResponse {
    pub expense: Expense,
    pub replaced: bool,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Feature flags that select which variant of the page is rendered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Show the user selector; otherwise a single default ledger is used
    pub multi_user: bool,
    /// Fold each month's positive leftover into the next month
    pub with_carry_over: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            multi_user: true,
            with_carry_over: false,
        }
    }
}

/// Totals across every recorded month
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinanceSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_savings: f64,
    pub balance: f64,
    /// Mean expense total over months that have an expense record
    pub average_expenses: f64,
    /// Distinct months that have an income or an expense
    pub month_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBalance {
    pub month: MonthKey,
    pub month_name: String,
    pub income_id: Option<String>,
    pub expense_id: Option<String>,
    pub income: f64,
    pub total_expenses: f64,
    /// income - total_expenses
    pub balance: f64,
    pub savings: f64,
    /// Leftover folded in from the previous month (0 unless carry-over is on)
    pub carry_over: f64,
    /// income + carry_over - total_expenses
    pub closing_balance: f64,
    pub items: Vec<ExpenseItem>,
}

impl MonthlyBalance {
    pub fn is_surplus(&self) -> bool {
        self.closing_balance >= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub label: String,
    pub amount: f64,
    /// Share of the sum of all expense items, in percent
    pub share_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrendPoint {
    pub month: MonthKey,
    pub month_name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpendingSuggestion {
    TopCategory { label: String, amount: f64 },
    SpendingUp { percent: f64 },
    SpendingDown { percent: f64 },
    AboveAverage { percent: f64 },
}

impl SpendingSuggestion {
    pub fn message(&self) -> String {
        match self {
            SpendingSuggestion::TopCategory { label, amount } => format!(
                "\"{}\" is where most of your money goes ({})",
                label,
                format_rupiah(*amount)
            ),
            SpendingSuggestion::SpendingUp { percent } => {
                format!("Spending went up {:.1}% compared to last month", percent)
            }
            SpendingSuggestion::SpendingDown { percent } => {
                format!("Nice! Spending went down {:.1}% compared to last month", percent)
            }
            SpendingSuggestion::AboveAverage { percent } => {
                format!("Careful: this month's spending is {:.1}% above your average", percent)
            }
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            SpendingSuggestion::SpendingUp { .. } | SpendingSuggestion::AboveAverage { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseAnalytics {
    pub top_categories: Vec<CategoryTotal>,
    /// Oldest month first
    pub monthly_trend: Vec<MonthlyTrendPoint>,
    pub average_spending: f64,
    /// Change between the two most recent expense months, in percent
    pub latest_change_percent: f64,
    pub suggestions: Vec<SpendingSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub summary: FinanceSummary,
    /// Newest month first
    pub monthly_balances: Vec<MonthlyBalance>,
    /// None when there is no expense data to analyse
    pub analytics: Option<ExpenseAnalytics>,
}

/// Log line forwarded from the browser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    #[serde(default)]
    pub component: Option<String>,
}

// ---------------------------------------------------------------------------
// Form drafts
// ---------------------------------------------------------------------------

/// Raw text of the income form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IncomeDraft {
    pub salary: String,
}

impl IncomeDraft {
    pub fn from_income(income: &Income) -> Self {
        Self {
            salary: format!("{:.0}", income.salary),
        }
    }

    pub fn to_create_request(&self, month: MonthKey) -> Result<CreateIncomeRequest, ValidationError> {
        let salary = parse_amount(&self.salary)?;
        Ok(CreateIncomeRequest {
            month,
            month_name: None,
            salary,
        })
    }

    pub fn to_update_request(&self) -> Result<UpdateIncomeRequest, ValidationError> {
        let salary = parse_amount(&self.salary)?;
        Ok(UpdateIncomeRequest {
            salary: Some(salary),
            month_name: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseDraftRow {
    pub label: String,
    pub amount: String,
    pub category: ExpenseCategory,
    /// Set once the user picks a category by hand; stops label suggestions
    pub category_locked: bool,
}

impl ExpenseDraftRow {
    fn is_blank(&self) -> bool {
        self.label.trim().is_empty() && self.amount.trim().is_empty()
    }
}

/// Editable list of expense rows; always holds at least one row
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    rows: Vec<ExpenseDraftRow>,
}

impl Default for ExpenseDraft {
    fn default() -> Self {
        Self {
            rows: vec![ExpenseDraftRow::default()],
        }
    }
}

impl ExpenseDraft {
    pub fn from_items(items: &[ExpenseItem]) -> Self {
        if items.is_empty() {
            return Self::default();
        }
        let rows = items
            .iter()
            .map(|item| ExpenseDraftRow {
                label: item.label.clone(),
                amount: format!("{:.0}", item.amount),
                category: item.category,
                category_locked: true,
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[ExpenseDraftRow] {
        &self.rows
    }

    pub fn add_row(&mut self) {
        self.rows.push(ExpenseDraftRow::default());
    }

    /// Removing the last remaining row is a no-op
    pub fn remove_row(&mut self, index: usize) {
        if self.rows.len() > 1 && index < self.rows.len() {
            self.rows.remove(index);
        }
    }

    pub fn set_label(&mut self, index: usize, label: String) {
        if let Some(row) = self.rows.get_mut(index) {
            if !row.category_locked {
                row.category = ExpenseCategory::suggest_for_label(&label);
            }
            row.label = label;
        }
    }

    pub fn set_amount(&mut self, index: usize, amount: String) {
        if let Some(row) = self.rows.get_mut(index) {
            row.amount = amount;
        }
    }

    pub fn set_category(&mut self, index: usize, category: ExpenseCategory) {
        if let Some(row) = self.rows.get_mut(index) {
            row.category = category;
            row.category_locked = true;
        }
    }

    /// Running total of rows whose amount currently parses
    pub fn total(&self) -> f64 {
        self.rows
            .iter()
            .filter_map(|row| parse_amount(&row.amount).ok())
            .sum()
    }

    /// Blank rows are skipped; any partially filled row must be valid
    pub fn to_items(&self) -> Result<Vec<ExpenseItemInput>, ValidationError> {
        let mut items = Vec::new();
        for row in self.rows.iter().filter(|row| !row.is_blank()) {
            let item = ExpenseItemInput {
                label: row.label.trim().to_string(),
                amount: parse_amount(&row.amount)?,
                category: Some(row.category),
            };
            item.validate()?;
            items.push(item);
        }

        if items.is_empty() {
            return Err(ValidationError::NoExpenseItems);
        }
        Ok(items)
    }

    pub fn to_create_request(&self, month: MonthKey) -> Result<CreateExpenseRequest, ValidationError> {
        Ok(CreateExpenseRequest {
            month,
            month_name: None,
            items: self.to_items()?,
        })
    }

    pub fn to_update_request(&self) -> Result<UpdateExpenseRequest, ValidationError> {
        Ok(UpdateExpenseRequest {
            month_name: None,
            items: self.to_items()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_key_parse_and_display() {
        let key: MonthKey = "2024-08".parse().unwrap();
        assert_eq!(key.year(), 2024);
        assert_eq!(key.month(), 8);
        assert_eq!(key.to_string(), "2024-08");
        assert_eq!(key.display_name(), "August 2024");

        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("2024-00".parse::<MonthKey>().is_err());
        assert!("24-08".parse::<MonthKey>().is_err());
        assert!("2024-8".parse::<MonthKey>().is_err());
        assert!("august".parse::<MonthKey>().is_err());
        assert!("1800-01".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_month_key_ordering_is_chronological() {
        let mut keys: Vec<MonthKey> = ["2024-02", "2023-12", "2024-10", "2024-01"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        keys.sort();
        let rendered: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(rendered, vec!["2023-12", "2024-01", "2024-02", "2024-10"]);
    }

    #[test]
    fn test_month_key_previous_wraps_year() {
        let key = MonthKey::new(2024, 1).unwrap();
        assert_eq!(key.previous(), MonthKey::new(2023, 12).unwrap());
        assert_eq!(MonthKey::new(2024, 5).unwrap().previous().to_string(), "2024-04");
    }

    #[test]
    fn test_month_key_serde_as_string() {
        let key = MonthKey::new(2024, 8).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2024-08\"");

        let err = serde_json::from_str::<MonthKey>("\"2024-99\"");
        assert!(err.is_err());
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(0.0), "Rp 0");
        assert_eq!(format_rupiah(999.0), "Rp 999");
        assert_eq!(format_rupiah(1000.0), "Rp 1.000");
        assert_eq!(format_rupiah(5_000_000.0), "Rp 5.000.000");
        assert_eq!(format_rupiah(-1_250_000.0), "-Rp 1.250.000");
        assert_eq!(format_rupiah(1234.6), "Rp 1.235");
    }

    #[test]
    fn test_category_suggestion_is_case_insensitive() {
        assert_eq!(ExpenseCategory::suggest_for_label("Tabungan"), ExpenseCategory::Savings);
        assert_eq!(ExpenseCategory::suggest_for_label("monthly SAVINGS"), ExpenseCategory::Savings);
        assert_eq!(ExpenseCategory::suggest_for_label("Food"), ExpenseCategory::Spending);
        assert_eq!(ExpenseCategory::suggest_for_label(""), ExpenseCategory::Spending);
    }

    #[test]
    fn test_expense_item_category_defaults_from_label() {
        let json = r#"{"label":"Savings","amount":800000}"#;
        let input: ExpenseItemInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.category, None);
        assert_eq!(input.resolved_category(), ExpenseCategory::Savings);

        let explicit = ExpenseItemInput {
            label: "Savings".to_string(),
            amount: 1.0,
            category: Some(ExpenseCategory::Spending),
        };
        assert_eq!(explicit.resolved_category(), ExpenseCategory::Spending);
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Ilham "), Ok("Ilham".to_string()));
        assert_eq!(validate_name("   "), Err(ValidationError::EmptyName));
        let long = "a".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(validate_name(&long), Err(ValidationError::NameTooLong(MAX_NAME_LENGTH)));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("5000000"), Ok(5_000_000.0));
        assert_eq!(parse_amount(" 1,200,000 "), Ok(1_200_000.0));
        assert_eq!(parse_amount("12.5"), Ok(12.5));
        assert_eq!(parse_amount("0"), Err(ValidationError::AmountNotPositive));
        assert_eq!(parse_amount("-10"), Err(ValidationError::AmountNotPositive));
        assert!(matches!(parse_amount(""), Err(ValidationError::InvalidAmount(_))));
        assert!(matches!(parse_amount("abc"), Err(ValidationError::InvalidAmount(_))));
        assert!(matches!(parse_amount("inf"), Err(ValidationError::InvalidAmount(_))));
    }

    #[test]
    fn test_parse_amount_rupiah_grouping() {
        assert_eq!(parse_amount("1.200.000"), Ok(1_200_000.0));
        assert_eq!(parse_amount("Rp 1.200.000"), Ok(1_200_000.0));
        assert_eq!(parse_amount("rp1.200.000"), Ok(1_200_000.0));
        assert_eq!(parse_amount("Rp. 750.000"), Ok(750_000.0));
        assert_eq!(parse_amount("1.500"), Ok(1_500.0));
        assert_eq!(parse_amount("1.200.000,50"), Ok(1_200_000.5));
        assert_eq!(parse_amount(&format_rupiah(5_000_000.0)), Ok(5_000_000.0));

        // a comma before one or two digits is a decimal comma
        assert_eq!(parse_amount("1,5"), Ok(1.5));
        assert_eq!(parse_amount("2,25"), Ok(2.25));

        assert!(matches!(parse_amount("1.2.3"), Err(ValidationError::InvalidAmount(_))));
        assert!(matches!(parse_amount("1.20.000"), Err(ValidationError::InvalidAmount(_))));
        assert!(matches!(parse_amount("Rp"), Err(ValidationError::InvalidAmount(_))));
        assert!(matches!(parse_amount("12.5x"), Err(ValidationError::InvalidAmount(_))));
    }

    #[test]
    fn test_create_income_request_validation() {
        let month = MonthKey::new(2024, 8).unwrap();
        let valid = CreateIncomeRequest { month, month_name: None, salary: 5_000_000.0 };
        assert!(valid.validate().is_ok());

        let zero = CreateIncomeRequest { month, month_name: None, salary: 0.0 };
        assert_eq!(zero.validate(), Err(ValidationError::AmountNotPositive));

        let blank_name = CreateIncomeRequest { month, month_name: Some(" ".to_string()), salary: 1.0 };
        assert_eq!(blank_name.validate(), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_create_expense_request_requires_items() {
        let month = MonthKey::new(2024, 8).unwrap();
        let empty = CreateExpenseRequest { month, month_name: None, items: vec![] };
        assert_eq!(empty.validate(), Err(ValidationError::NoExpenseItems));

        let bad_label = CreateExpenseRequest {
            month,
            month_name: None,
            items: vec![ExpenseItemInput { label: " ".to_string(), amount: 10.0, category: None }],
        };
        assert_eq!(bad_label.validate(), Err(ValidationError::EmptyLabel));
    }

    #[test]
    fn test_expense_draft_rows_keep_at_least_one() {
        let mut draft = ExpenseDraft::default();
        assert_eq!(draft.rows().len(), 1);

        draft.remove_row(0);
        assert_eq!(draft.rows().len(), 1);

        draft.add_row();
        draft.add_row();
        assert_eq!(draft.rows().len(), 3);

        draft.remove_row(1);
        assert_eq!(draft.rows().len(), 2);

        draft.remove_row(10);
        assert_eq!(draft.rows().len(), 2);
    }

    #[test]
    fn test_expense_draft_suggests_category_until_locked() {
        let mut draft = ExpenseDraft::default();
        draft.set_label(0, "Tabungan".to_string());
        assert_eq!(draft.rows()[0].category, ExpenseCategory::Savings);

        draft.set_category(0, ExpenseCategory::Spending);
        draft.set_label(0, "Tabungan rumah".to_string());
        assert_eq!(draft.rows()[0].category, ExpenseCategory::Spending);
    }

    #[test]
    fn test_expense_draft_total_and_items() {
        let mut draft = ExpenseDraft::default();
        draft.set_label(0, "Food".to_string());
        draft.set_amount(0, "1200000".to_string());
        draft.add_row();
        draft.set_label(1, "Savings".to_string());
        draft.set_amount(1, "800000".to_string());
        draft.add_row();

        assert_eq!(draft.total(), 2_000_000.0);

        let items = draft.to_items().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(total_of(&items), 2_000_000.0);
        assert_eq!(items[1].category, Some(ExpenseCategory::Savings));
    }

    #[test]
    fn test_expense_draft_rejects_partial_rows() {
        let mut draft = ExpenseDraft::default();
        draft.set_label(0, "Food".to_string());
        assert!(matches!(draft.to_items(), Err(ValidationError::InvalidAmount(_))));

        let blank = ExpenseDraft::default();
        assert_eq!(blank.to_items(), Err(ValidationError::NoExpenseItems));
    }

    #[test]
    fn test_income_draft_to_request() {
        let month = MonthKey::new(2024, 8).unwrap();
        let draft = IncomeDraft { salary: "5,000,000".to_string() };
        let request = draft.to_create_request(month).unwrap();
        assert_eq!(request.salary, 5_000_000.0);
        assert_eq!(request.month, month);

        let empty = IncomeDraft::default();
        assert!(empty.to_update_request().is_err());
    }

    #[test]
    fn test_suggestion_messages() {
        let up = SpendingSuggestion::SpendingUp { percent: 25.0 };
        assert!(up.message().contains("25.0%"));
        assert!(up.is_warning());

        let top = SpendingSuggestion::TopCategory { label: "Food".to_string(), amount: 1_200_000.0 };
        assert!(top.message().contains("Rp 1.200.000"));
        assert!(!top.is_warning());
    }

    #[test]
    fn test_dashboard_response_serde_round_trip() {
        let month = MonthKey::new(2024, 8).unwrap();
        let response = DashboardResponse {
            summary: FinanceSummary::default(),
            monthly_balances: vec![MonthlyBalance {
                month,
                month_name: month.display_name(),
                income_id: Some("i1".to_string()),
                expense_id: None,
                income: 10.0,
                total_expenses: 0.0,
                balance: 10.0,
                savings: 0.0,
                carry_over: 0.0,
                closing_balance: 10.0,
                items: vec![],
            }],
            analytics: Some(ExpenseAnalytics {
                top_categories: vec![],
                monthly_trend: vec![],
                average_spending: 0.0,
                latest_change_percent: 0.0,
                suggestions: vec![SpendingSuggestion::SpendingDown { percent: 12.0 }],
            }),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"kind\":\"spending_down\""));
        let back: DashboardResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, response);
    }
}
