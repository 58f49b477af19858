use chrono::NaiveDate;
use sparplan::plan::{BillingInterval, ExpenseKind, ExpenseRecord};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn expense(
    name: &str,
    interval: BillingInterval,
    amount: f64,
    first_due: NaiveDate,
    last_due: NaiveDate,
) -> ExpenseRecord {
    ExpenseRecord::new(name, ExpenseKind::Fixed, interval, amount, first_due, last_due)
        .expect("valid expense")
}
