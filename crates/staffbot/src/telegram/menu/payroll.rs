use teloxide::types::InlineKeyboardMarkup;

use staffcore::config::menu::PAYROLL_HISTORY_MONTHS;
use staffcore::core::format_rupiah;
use staffcore::storage::payroll::{self, PayrollSlip};
use staffcore::AppResult;

use super::{back_row, back_to_main, Screen, ScreenContext};
use crate::telegram::format::SEPARATOR;
use crate::telegram::{cb, MenuAction};

fn back_to_payroll() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![back_row(MenuAction::Payroll, "<< Payroll")])
}

pub fn render_payroll_menu() -> Screen {
    let keyboard = InlineKeyboardMarkup::new(vec![
        vec![
            cb("Current Slip", MenuAction::PayrollCurrent.as_data()),
            cb("History", MenuAction::PayrollHistory.as_data()),
        ],
        back_to_main(),
    ]);
    ("<b>PAYROLL</b>\nChoose what to view.".to_string(), keyboard)
}

pub fn render_slip(slip: Option<&PayrollSlip>, period: &str) -> Screen {
    let text = match slip {
        Some(slip) => {
            let paid = slip
                .paid_at
                .map(|at| at.format("%d %b %Y").to_string())
                .unwrap_or_else(|| "-".to_string());
            format!(
                "<b>PAY SLIP {period}</b>\n\
                 {sep}\n\
                 Base salary: {base}\n\
                 Allowance: {allowance}\n\
                 Bonus: {bonus}\n\
                 Deduction: {deduction}\n\
                 {sep}\n\
                 <b>Total: {total}</b>\n\
                 Status: {status}\n\
                 Paid on: {paid}",
                period = slip.period,
                sep = SEPARATOR,
                base = format_rupiah(slip.base_salary),
                allowance = format_rupiah(slip.allowance),
                bonus = format_rupiah(slip.bonus),
                deduction = format_rupiah(slip.deduction),
                total = format_rupiah(slip.total),
                status = slip.status.to_uppercase(),
                paid = paid,
            )
        }
        None => format!("No pay slip for {} yet.", period),
    };
    (text, back_to_payroll())
}

pub fn render_history(slips: &[PayrollSlip]) -> Screen {
    let body = if slips.is_empty() {
        "No payroll records.".to_string()
    } else {
        slips
            .iter()
            .map(|s| format!("{} | {} | {}", s.period, format_rupiah(s.total), s.status.to_uppercase()))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let text = format!("<b>PAYROLL HISTORY</b>\n{}\n{}", SEPARATOR, body);
    (text, back_to_payroll())
}

pub(super) fn current_screen(ctx: &ScreenContext<'_>) -> AppResult<Screen> {
    let period = payroll::period_of(ctx.now.date());
    let slip = payroll::for_period(ctx.conn, ctx.employee.id, &period)?;
    Ok(render_slip(slip.as_ref(), &period))
}

pub(super) fn history_screen(ctx: &ScreenContext<'_>) -> AppResult<Screen> {
    let slips = payroll::history(ctx.conn, ctx.employee.id, PAYROLL_HISTORY_MONTHS)?;
    Ok(render_history(&slips))
}
