use anyhow::Result;
use bingodash_core::model::{DateRange, RevenuePeriod};

use super::{App, print_json};
use crate::cli::{OutputFormat, RevenueAction};
use crate::render::{Table, key_values, money, truncate_text};

pub async fn run(app: &App, action: RevenueAction) -> Result<()> {
    let revenue = app.ctx.revenue();
    match action {
        RevenueAction::Total => {
            let total = revenue.fetch_total().await?;
            println!("total revenue: {}", money(total));
        }
        RevenueAction::Daily => {
            revenue.select_period(RevenuePeriod::Daily).await?;
            print_series(
                "Date",
                revenue.state().daily.iter().map(|r| (&r.date, r.revenue)),
            );
        }
        RevenueAction::Weekly => {
            revenue.select_period(RevenuePeriod::Weekly).await?;
            print_series(
                "Week",
                revenue.state().weekly.iter().map(|r| (&r.week, r.revenue)),
            );
        }
        RevenueAction::Monthly => {
            revenue.select_period(RevenuePeriod::Monthly).await?;
            print_series(
                "Month",
                revenue.state().monthly.iter().map(|r| (&r.month, r.revenue)),
            );
        }
        RevenueAction::Range { from, to, format } => {
            let report = revenue.fetch_range(DateRange::new(from, to)?).await?;
            if format == OutputFormat::Json {
                return print_json(&report);
            }
            print!(
                "{}",
                key_values(&[
                    ("from", report.start_date.clone()),
                    ("to", report.end_date.clone()),
                    ("revenue", money(report.revenue)),
                    ("payments", report.payment_history.len().to_string()),
                ])
            );
            if !report.payment_history.is_empty() {
                let mut table =
                    Table::new(["Date", "User", "Challenge", "Amount", "Status"]);
                for payment in &report.payment_history {
                    table.push_row(vec![
                        payment.created_at.format("%Y-%m-%d").to_string(),
                        payment.user.email.clone(),
                        payment
                            .challenge
                            .as_ref()
                            .map(|c| truncate_text(&c.title, 24))
                            .unwrap_or_default(),
                        format!(
                            "{} {}",
                            money(payment.amount),
                            payment.currency.to_uppercase()
                        ),
                        payment.status.clone(),
                    ]);
                }
                println!();
                print!("{table}");
            }
        }
    }
    Ok(())
}

fn print_series<'a>(
    label: &str,
    rows: impl Iterator<Item = (&'a String, f64)>,
) {
    let mut table = Table::new([label, "Revenue"]);
    for (period, amount) in rows {
        table.push_row(vec![period.clone(), money(amount)]);
    }
    if table.is_empty() {
        println!("no revenue recorded");
    } else {
        print!("{table}");
    }
}
