//! Terminal rendering for the wizard: the summary table and currency
//! formatting.

use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use estimate_core::costing::{CostBreakdown, labor_cost, material_cost, round_half_up};
use estimate_core::session::{DraftSession, STEP_COUNT};

/// Wizard step names, in order.
pub const STEP_NAMES: [&str; STEP_COUNT] = [
    "Basic info",
    "Work selection",
    "Prices & quantities",
    "Discounts & notes",
    "Summary",
];

pub fn format_money(amount: Decimal) -> String {
    format!("{:.2} zł", round_half_up(amount))
}

/// One row per draft line: id, work, quantity, unit prices, derived costs.
pub fn items_table(session: &DraftSession) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Id", "Work", "Qty", "Unit", "Labor/unit", "Labor", "Materials",
    ]);

    for item in &session.draft().items {
        let entry = &item.entry;
        let single = std::slice::from_ref(entry);
        table.add_row(vec![
            Cell::new(item.id),
            Cell::new(&entry.work_name),
            Cell::new(entry.quantity).set_alignment(CellAlignment::Right),
            Cell::new(&entry.unit),
            Cell::new(format_money(entry.labor_price_per_unit)).set_alignment(CellAlignment::Right),
            Cell::new(format_money(labor_cost(single))).set_alignment(CellAlignment::Right),
            Cell::new(format_money(material_cost(single))).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Prints the full wizard summary: step, parties, items, and the breakdown.
pub fn print_session(session: &DraftSession) {
    let draft = session.draft();
    let step = session.current_step();
    println!("Step {}/{}: {}", step + 1, STEP_COUNT, STEP_NAMES[step]);
    println!();

    if !draft.investor_name.is_empty() {
        println!(
            "Investor:   {}, {}",
            draft.investor_name, draft.investor_address
        );
    }
    if !draft.contractor_name.is_empty() {
        println!(
            "Contractor: {} {} {}",
            draft.contractor_name, draft.contractor_phone, draft.contractor_email
        );
    }
    if !draft.valid_until.is_empty() {
        println!("Valid until: {}", draft.valid_until);
    }
    if !draft.start_date.is_empty() {
        println!("Start date:  {}", draft.start_date);
    }
    if !draft.notes.is_empty() {
        println!("Notes: {}", draft.notes);
    }

    if draft.items.is_empty() {
        println!("\n(no work items yet)");
    } else {
        println!("\n{}", items_table(session));
    }

    println!();
    print_breakdown(&session.cost_breakdown(), draft.material_discount_pct, draft.labor_discount_pct);
}

pub fn print_breakdown(
    breakdown: &CostBreakdown,
    material_pct: Decimal,
    labor_pct: Decimal,
) {
    println!("Labor:               {:>14}", format_money(breakdown.labor_cost));
    if labor_pct > Decimal::ZERO {
        println!(
            "  after {labor_pct}% discount: {:>10}",
            format_money(breakdown.labor_cost_with_discount)
        );
    }
    println!("Materials:           {:>14}", format_money(breakdown.material_cost));
    if material_pct > Decimal::ZERO {
        println!(
            "  after {material_pct}% discount: {:>10}",
            format_money(breakdown.material_cost_with_discount)
        );
    }
    println!("Total:               {:>14}", format_money(breakdown.total_cost));
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn format_money_rounds_to_two_decimals() {
        assert_eq!(format_money(dec!(790)), "790.00 zł");
        assert_eq!(format_money(dec!(66.666)), "66.67 zł");
    }
}
