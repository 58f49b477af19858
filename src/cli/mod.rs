//! Interactive menu surface. All arithmetic and validation live in the
//! session and projection layers; this module only gathers intents, forwards
//! them, and renders the results.

pub mod output;

use chrono::{Local, NaiveDate};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use uuid::Uuid;

use crate::errors::Result;
use crate::format;
use crate::plan::{BillingInterval, ExpenseKind, ExpenseRecord, SortDirection, SortField};
use crate::projection::Overview;
use crate::session::SessionStore;
use crate::storage::{JsonFileStore, KeyValueStore};

const MAIN_MENU: [&str; 9] = [
    "Set monthly income",
    "Add expense",
    "List expenses",
    "Edit expense",
    "Delete expense",
    "Sort expenses",
    "Show overview",
    "Clear all data",
    "Quit",
];

/// Entry point used by the binary: opens the default store and runs the loop.
pub fn run_cli() -> Result<()> {
    let store = JsonFileStore::open_default()?;
    let mut session = SessionStore::open(store)?;
    run_loop(&mut session)
}

fn run_loop<S: KeyValueStore>(session: &mut SessionStore<S>) -> Result<()> {
    let theme = ColorfulTheme::default();
    loop {
        println!();
        let selection = Select::with_theme(&theme)
            .with_prompt("Sparplan")
            .items(&MAIN_MENU)
            .default(0)
            .interact()?;

        let outcome = match selection {
            0 => set_income(&theme, session),
            1 => add_expense(&theme, session),
            2 => {
                list_expenses(session);
                Ok(())
            }
            3 => edit_expense(&theme, session),
            4 => delete_expense(&theme, session),
            5 => sort_expenses(&theme, session),
            6 => show_overview(session),
            7 => clear_all(&theme, session),
            _ => return Ok(()),
        };

        if let Err(err) = outcome {
            output::error(err);
        }
    }
}

fn set_income<S: KeyValueStore>(theme: &ColorfulTheme, session: &mut SessionStore<S>) -> Result<()> {
    if let Some(income) = session.session().income {
        output::info(format!("Current monthly income: {} \u{20ac}", format::format_amount(income)));
    }
    let raw: String = Input::with_theme(theme)
        .with_prompt("Monthly income (\u{20ac})")
        .interact_text()?;
    let income = format::parse_amount(&raw)?;
    session.set_income(income)?;
    output::success(format!("Monthly income set to {} \u{20ac}", format::format_amount(income)));
    Ok(())
}

fn add_expense<S: KeyValueStore>(theme: &ColorfulTheme, session: &mut SessionStore<S>) -> Result<()> {
    let record = prompt_expense(theme, None)?;
    let name = record.name.clone();
    session.add_expense(record)?;
    output::success(format!("Expense `{name}` added"));
    Ok(())
}

fn edit_expense<S: KeyValueStore>(theme: &ColorfulTheme, session: &mut SessionStore<S>) -> Result<()> {
    let Some(id) = select_expense(theme, session, "Edit which expense?")? else {
        return Ok(());
    };
    let current = session
        .session()
        .expense(id)
        .cloned()
        .ok_or(crate::errors::PlanError::ExpenseNotFound(id))?;
    let record = prompt_expense(theme, Some(&current))?;
    session.replace_expense(id, record)?;
    output::success("Expense updated");
    Ok(())
}

fn delete_expense<S: KeyValueStore>(theme: &ColorfulTheme, session: &mut SessionStore<S>) -> Result<()> {
    let Some(id) = select_expense(theme, session, "Delete which expense?")? else {
        return Ok(());
    };
    let removed = session.remove_expense(id)?;
    output::success(format!("Expense `{}` deleted", removed.name));
    Ok(())
}

fn sort_expenses<S: KeyValueStore>(theme: &ColorfulTheme, session: &mut SessionStore<S>) -> Result<()> {
    let fields = [
        ("Name", SortField::Name),
        ("Kind", SortField::Kind),
        ("Interval", SortField::Interval),
        ("Amount", SortField::Amount),
        ("First due", SortField::FirstDue),
        ("Last due", SortField::LastDue),
    ];
    let labels: Vec<&str> = fields.iter().map(|(label, _)| *label).collect();
    let field = Select::with_theme(theme)
        .with_prompt("Sort by")
        .items(&labels)
        .default(0)
        .interact()?;
    let direction = Select::with_theme(theme)
        .with_prompt("Direction")
        .items(&["Ascending", "Descending"])
        .default(0)
        .interact()?;
    let direction = if direction == 0 {
        SortDirection::Ascending
    } else {
        SortDirection::Descending
    };
    session.sort_expenses(fields[field].1, direction)?;
    list_expenses(session);
    Ok(())
}

fn clear_all<S: KeyValueStore>(theme: &ColorfulTheme, session: &mut SessionStore<S>) -> Result<()> {
    let confirmed = Confirm::with_theme(theme)
        .with_prompt("Really delete all data (income and expenses)?")
        .default(false)
        .interact()?;
    if confirmed {
        session.clear_all()?;
        output::success("All data cleared");
    }
    Ok(())
}

fn list_expenses<S: KeyValueStore>(session: &SessionStore<S>) {
    let expenses = &session.session().expenses;
    if expenses.is_empty() {
        output::info("No expenses recorded.");
        return;
    }
    output::section("Expenses");
    for expense in expenses {
        output::info(format!(
            "{:<24} {:<8} {:<16} {:>12} \u{20ac}   {} \u{2013} {}",
            expense.name,
            expense.kind.label(),
            expense.interval.label(),
            format::format_amount(expense.amount),
            format::date_label(expense.first_due),
            format::date_label(expense.last_due),
        ));
    }
}

fn show_overview<S: KeyValueStore>(session: &SessionStore<S>) -> Result<()> {
    let today = Local::now().date_naive();
    let overview = session.overview(None, today)?;
    render_overview(&overview);
    Ok(())
}

fn render_overview(overview: &Overview) {
    for year in &overview.years {
        output::section(&format!("Overview {}", year.year));
        output::info(format!(
            "{:<20} {:>14} {:>14} {:>14}",
            "Month", "Expenses (\u{20ac})", "Income (\u{20ac})", "Available (\u{20ac})"
        ));
        for row in &year.rows {
            output::info(format!(
                "{:<20} {:>14} {:>14} {:>14}",
                format::month_label(row.month),
                format::format_amount(row.expense_total),
                format::format_amount(row.income),
                format::format_amount(row.surplus),
            ));
        }
    }
    output::section(&format!(
        "Total available: {} \u{20ac}",
        format::format_amount(overview.total_available)
    ));
}

fn prompt_expense(theme: &ColorfulTheme, current: Option<&ExpenseRecord>) -> Result<ExpenseRecord> {
    let name = prompt_text(theme, "Name", current.map(|e| e.name.clone()))?;

    let kinds = [ExpenseKind::Fixed, ExpenseKind::Variable];
    let kind_default = current
        .and_then(|e| kinds.iter().position(|kind| *kind == e.kind))
        .unwrap_or(0);
    let kind_labels: Vec<&str> = kinds.iter().map(|kind| kind.label()).collect();
    let kind = kinds[Select::with_theme(theme)
        .with_prompt("Kind")
        .items(&kind_labels)
        .default(kind_default)
        .interact()?];

    let interval_default = current
        .and_then(|e| BillingInterval::ALL.iter().position(|i| *i == e.interval))
        .unwrap_or(0);
    let interval_labels: Vec<&str> = BillingInterval::ALL.iter().map(|i| i.label()).collect();
    let interval = BillingInterval::ALL[Select::with_theme(theme)
        .with_prompt("Billing interval")
        .items(&interval_labels)
        .default(interval_default)
        .interact()?];

    let amount_raw = prompt_text(
        theme,
        "Amount (\u{20ac})",
        current.map(|e| format::format_amount(e.amount)),
    )?;
    let amount = format::parse_amount(&amount_raw)?;

    let first_due = prompt_iso_date(theme, "First due date (YYYY-MM-DD)", current.map(|e| e.first_due))?;
    let last_due = prompt_iso_date(theme, "Last due date (YYYY-MM-DD)", current.map(|e| e.last_due))?;

    ExpenseRecord::new(name, kind, interval, amount, first_due, last_due)
}

fn prompt_text(theme: &ColorfulTheme, prompt: &str, initial: Option<String>) -> Result<String> {
    let mut input = Input::with_theme(theme).with_prompt(prompt);
    if let Some(initial) = initial {
        input = input.with_initial_text(initial);
    }
    Ok(input.interact_text()?)
}

fn prompt_iso_date(
    theme: &ColorfulTheme,
    prompt: &str,
    initial: Option<NaiveDate>,
) -> Result<NaiveDate> {
    let raw = prompt_text(theme, prompt, initial.map(|date| date.to_string()))?;
    format::parse_date(&raw)
}

fn select_expense<S: KeyValueStore>(
    theme: &ColorfulTheme,
    session: &SessionStore<S>,
    prompt: &str,
) -> Result<Option<Uuid>> {
    let expenses = &session.session().expenses;
    if expenses.is_empty() {
        output::info("No expenses recorded.");
        return Ok(None);
    }
    let mut labels: Vec<String> = expenses
        .iter()
        .map(|expense| {
            format!(
                "{} ({}, {} \u{20ac})",
                expense.name,
                expense.interval.label(),
                format::format_amount(expense.amount)
            )
        })
        .collect();
    labels.push("Back".to_string());
    let selection = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(expenses.get(selection).map(|expense| expense.id))
}
