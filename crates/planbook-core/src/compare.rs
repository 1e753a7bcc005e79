//! Side-by-side comparison of two drafts.
//!
//! `compare` is a pure function of its two inputs: no side effects, safe
//! to call repeatedly. The report covers every business-plan and
//! financial field, grouped by section in the canonical model order with
//! fields in declaration order, so the rendering layer can walk it
//! top-to-bottom without its own schema knowledge. Vendors are compared
//! by set difference on a stable key rather than field-by-field.

use crate::draft::{Draft, DraftSummary, Vendor};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One field's worth of comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDiff {
    /// Section (business plan) or category (financials) the field belongs to
    pub section: String,
    pub field: String,
    pub value_a: FieldValue,
    pub value_b: FieldValue,
    pub differs: bool,
    /// `value_b - value_a`, numeric fields only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
    /// Percent change from A to B, numeric fields with non-zero `value_a` only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_change: Option<f64>,
}

/// A compared value: free-form text or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

/// Vendors present in only one of the two drafts.
///
/// Identity is the vendor id when present, else name plus company, so
/// re-keyed imports still match up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorDiff {
    pub only_in_a: Vec<Vendor>,
    pub only_in_b: Vec<Vendor>,
    /// Count of vendors present in both drafts
    pub in_both: usize,
}

/// The full comparison of two drafts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub draft_a: DraftSummary,
    pub draft_b: DraftSummary,
    pub entries: Vec<FieldDiff>,
    pub vendors: VendorDiff,
}

impl ComparisonReport {
    /// True when no compared field differs and the vendor sets match.
    pub fn is_identical(&self) -> bool {
        self.entries.iter().all(|e| !e.differs)
            && self.vendors.only_in_a.is_empty()
            && self.vendors.only_in_b.is_empty()
    }
}

/// Produces the side-by-side diff of two drafts.
#[rustfmt::skip]
pub fn compare(a: &Draft, b: &Draft) -> ComparisonReport {
    let mut entries = Vec::new();

    let (pa, pb) = (&a.business_plan, &b.business_plan);
    text(&mut entries, "ideation", "concept", &pa.ideation.concept, &pb.ideation.concept);
    text(&mut entries, "ideation", "inspiration", &pa.ideation.inspiration, &pb.ideation.inspiration);
    text(&mut entries, "ideation", "notes", &pa.ideation.notes, &pb.ideation.notes);

    text(&mut entries, "elevatorPitch", "pitch", &pa.elevator_pitch.pitch, &pb.elevator_pitch.pitch);
    text(&mut entries, "elevatorPitch", "audience", &pa.elevator_pitch.audience, &pb.elevator_pitch.audience);
    text(&mut entries, "elevatorPitch", "differentiator", &pa.elevator_pitch.differentiator, &pb.elevator_pitch.differentiator);

    text(&mut entries, "executiveSummary", "summary", &pa.executive_summary.summary, &pb.executive_summary.summary);
    text(&mut entries, "executiveSummary", "mission", &pa.executive_summary.mission, &pb.executive_summary.mission);
    text(&mut entries, "executiveSummary", "vision", &pa.executive_summary.vision, &pb.executive_summary.vision);

    text(&mut entries, "marketAnalysis", "targetMarket", &pa.market_analysis.target_market, &pb.market_analysis.target_market);
    text(&mut entries, "marketAnalysis", "marketSize", &pa.market_analysis.market_size, &pb.market_analysis.market_size);
    text(&mut entries, "marketAnalysis", "competitors", &pa.market_analysis.competitors, &pb.market_analysis.competitors);
    text(&mut entries, "marketAnalysis", "trends", &pa.market_analysis.trends, &pb.market_analysis.trends);

    text(&mut entries, "operationsPlan", "location", &pa.operations_plan.location, &pb.operations_plan.location);
    text(&mut entries, "operationsPlan", "hours", &pa.operations_plan.hours, &pb.operations_plan.hours);
    text(&mut entries, "operationsPlan", "staffing", &pa.operations_plan.staffing, &pb.operations_plan.staffing);
    text(&mut entries, "operationsPlan", "suppliers", &pa.operations_plan.suppliers, &pb.operations_plan.suppliers);

    text(&mut entries, "managementTeam", "founders", &pa.management_team.founders, &pb.management_team.founders);
    text(&mut entries, "managementTeam", "advisors", &pa.management_team.advisors, &pb.management_team.advisors);
    text(&mut entries, "managementTeam", "hiringPlan", &pa.management_team.hiring_plan, &pb.management_team.hiring_plan);

    text(&mut entries, "serviceDescription", "cuisine", &pa.service_description.cuisine, &pb.service_description.cuisine);
    text(&mut entries, "serviceDescription", "menuHighlights", &pa.service_description.menu_highlights, &pb.service_description.menu_highlights);
    text(&mut entries, "serviceDescription", "serviceStyle", &pa.service_description.service_style, &pb.service_description.service_style);

    text(&mut entries, "marketingStrategy", "channels", &pa.marketing_strategy.channels, &pb.marketing_strategy.channels);
    text(&mut entries, "marketingStrategy", "launchPlan", &pa.marketing_strategy.launch_plan, &pb.marketing_strategy.launch_plan);
    text(&mut entries, "marketingStrategy", "loyaltyProgram", &pa.marketing_strategy.loyalty_program, &pb.marketing_strategy.loyalty_program);

    let (fa, fb) = (&a.financial_data, &b.financial_data);
    number(&mut entries, "revenue", "foodSales", fa.revenue.food_sales, fb.revenue.food_sales);
    number(&mut entries, "revenue", "beverageSales", fa.revenue.beverage_sales, fb.revenue.beverage_sales);
    number(&mut entries, "revenue", "catering", fa.revenue.catering, fb.revenue.catering);
    number(&mut entries, "revenue", "otherIncome", fa.revenue.other_income, fb.revenue.other_income);

    number(&mut entries, "cogs", "foodCostRatio", fa.cogs.food_cost_ratio, fb.cogs.food_cost_ratio);
    number(&mut entries, "cogs", "beverageCostRatio", fa.cogs.beverage_cost_ratio, fb.cogs.beverage_cost_ratio);
    number(&mut entries, "cogs", "packaging", fa.cogs.packaging, fb.cogs.packaging);

    number(&mut entries, "operatingExpenses", "rent", fa.operating_expenses.rent, fb.operating_expenses.rent);
    number(&mut entries, "operatingExpenses", "payroll", fa.operating_expenses.payroll, fb.operating_expenses.payroll);
    number(&mut entries, "operatingExpenses", "utilities", fa.operating_expenses.utilities, fb.operating_expenses.utilities);
    number(&mut entries, "operatingExpenses", "marketing", fa.operating_expenses.marketing, fb.operating_expenses.marketing);
    number(&mut entries, "operatingExpenses", "insurance", fa.operating_expenses.insurance, fb.operating_expenses.insurance);
    number(&mut entries, "operatingExpenses", "otherExpenses", fa.operating_expenses.other_expenses, fb.operating_expenses.other_expenses);

    number(&mut entries, "startupCosts", "leaseholdImprovements", fa.startup_costs.leasehold_improvements, fb.startup_costs.leasehold_improvements);
    number(&mut entries, "startupCosts", "kitchenEquipment", fa.startup_costs.kitchen_equipment, fb.startup_costs.kitchen_equipment);
    number(&mut entries, "startupCosts", "furnitureFixtures", fa.startup_costs.furniture_fixtures, fb.startup_costs.furniture_fixtures);
    number(&mut entries, "startupCosts", "licensesPermits", fa.startup_costs.licenses_permits, fb.startup_costs.licenses_permits);
    number(&mut entries, "startupCosts", "initialInventory", fa.startup_costs.initial_inventory, fb.startup_costs.initial_inventory);
    number(&mut entries, "startupCosts", "workingCapital", fa.startup_costs.working_capital, fb.startup_costs.working_capital);

    number(&mut entries, "fundingSources", "ownerInvestment", fa.funding_sources.owner_investment, fb.funding_sources.owner_investment);
    number(&mut entries, "fundingSources", "bankLoan", fa.funding_sources.bank_loan, fb.funding_sources.bank_loan);
    number(&mut entries, "fundingSources", "outsideInvestors", fa.funding_sources.outside_investors, fb.funding_sources.outside_investors);
    number(&mut entries, "fundingSources", "otherFunding", fa.funding_sources.other_funding, fb.funding_sources.other_funding);

    ComparisonReport {
        draft_a: a.summary(),
        draft_b: b.summary(),
        entries,
        vendors: diff_vendors(&a.vendors, &b.vendors),
    }
}

fn text(entries: &mut Vec<FieldDiff>, section: &str, field: &str, a: &str, b: &str) {
    entries.push(FieldDiff {
        section: section.to_string(),
        field: field.to_string(),
        value_a: FieldValue::Text(a.to_string()),
        value_b: FieldValue::Text(b.to_string()),
        differs: a != b,
        delta: None,
        percent_change: None,
    });
}

fn number(entries: &mut Vec<FieldDiff>, section: &str, field: &str, a: f64, b: f64) {
    let delta = b - a;
    entries.push(FieldDiff {
        section: section.to_string(),
        field: field.to_string(),
        value_a: FieldValue::Number(a),
        value_b: FieldValue::Number(b),
        differs: a != b,
        delta: Some(delta),
        percent_change: (a != 0.0).then(|| delta / a * 100.0),
    });
}

fn diff_vendors(a: &[Vendor], b: &[Vendor]) -> VendorDiff {
    let keys_a: HashSet<String> = a.iter().map(Vendor::diff_key).collect();
    let keys_b: HashSet<String> = b.iter().map(Vendor::diff_key).collect();
    VendorDiff {
        only_in_a: a
            .iter()
            .filter(|v| !keys_b.contains(&v.diff_key()))
            .cloned()
            .collect(),
        only_in_b: b
            .iter()
            .filter(|v| !keys_a.contains(&v.diff_key()))
            .cloned()
            .collect(),
        in_both: a.iter().filter(|v| keys_b.contains(&v.diff_key())).count(),
    }
}
