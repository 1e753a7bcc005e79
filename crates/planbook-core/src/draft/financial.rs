//! Financial projection domain model.
//!
//! Five fixed categories of numeric fields. Monetary amounts are plain
//! `f64` dollars; the cost ratios in [`Cogs`] are fractions in `[0, 1]`,
//! not percentages.

use serde::{Deserialize, Serialize};

/// The complete financial projection of one draft.
///
/// Category order here is the canonical display order used by the
/// comparison report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialData {
    pub revenue: Revenue,
    pub cogs: Cogs,
    pub operating_expenses: OperatingExpenses,
    pub startup_costs: StartupCosts,
    pub funding_sources: FundingSources,
}

/// Projected annual revenue by stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Revenue {
    pub food_sales: f64,
    pub beverage_sales: f64,
    pub catering: f64,
    pub other_income: f64,
}

/// Cost of goods sold. Ratios are fractions of the matching revenue stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cogs {
    pub food_cost_ratio: f64,
    pub beverage_cost_ratio: f64,
    pub packaging: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperatingExpenses {
    pub rent: f64,
    pub payroll: f64,
    pub utilities: f64,
    pub marketing: f64,
    pub insurance: f64,
    pub other_expenses: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartupCosts {
    pub leasehold_improvements: f64,
    pub kitchen_equipment: f64,
    pub furniture_fixtures: f64,
    pub licenses_permits: f64,
    pub initial_inventory: f64,
    pub working_capital: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FundingSources {
    pub owner_investment: f64,
    pub bank_loan: f64,
    pub outside_investors: f64,
    pub other_funding: f64,
}

// ============================================================================
// Patches
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RevenuePatch {
    pub food_sales: Option<f64>,
    pub beverage_sales: Option<f64>,
    pub catering: Option<f64>,
    pub other_income: Option<f64>,
}

impl RevenuePatch {
    pub fn apply(self, category: &mut Revenue) {
        if let Some(v) = self.food_sales {
            category.food_sales = v;
        }
        if let Some(v) = self.beverage_sales {
            category.beverage_sales = v;
        }
        if let Some(v) = self.catering {
            category.catering = v;
        }
        if let Some(v) = self.other_income {
            category.other_income = v;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CogsPatch {
    pub food_cost_ratio: Option<f64>,
    pub beverage_cost_ratio: Option<f64>,
    pub packaging: Option<f64>,
}

impl CogsPatch {
    pub fn apply(self, category: &mut Cogs) {
        if let Some(v) = self.food_cost_ratio {
            category.food_cost_ratio = v;
        }
        if let Some(v) = self.beverage_cost_ratio {
            category.beverage_cost_ratio = v;
        }
        if let Some(v) = self.packaging {
            category.packaging = v;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperatingExpensesPatch {
    pub rent: Option<f64>,
    pub payroll: Option<f64>,
    pub utilities: Option<f64>,
    pub marketing: Option<f64>,
    pub insurance: Option<f64>,
    pub other_expenses: Option<f64>,
}

impl OperatingExpensesPatch {
    pub fn apply(self, category: &mut OperatingExpenses) {
        if let Some(v) = self.rent {
            category.rent = v;
        }
        if let Some(v) = self.payroll {
            category.payroll = v;
        }
        if let Some(v) = self.utilities {
            category.utilities = v;
        }
        if let Some(v) = self.marketing {
            category.marketing = v;
        }
        if let Some(v) = self.insurance {
            category.insurance = v;
        }
        if let Some(v) = self.other_expenses {
            category.other_expenses = v;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartupCostsPatch {
    pub leasehold_improvements: Option<f64>,
    pub kitchen_equipment: Option<f64>,
    pub furniture_fixtures: Option<f64>,
    pub licenses_permits: Option<f64>,
    pub initial_inventory: Option<f64>,
    pub working_capital: Option<f64>,
}

impl StartupCostsPatch {
    pub fn apply(self, category: &mut StartupCosts) {
        if let Some(v) = self.leasehold_improvements {
            category.leasehold_improvements = v;
        }
        if let Some(v) = self.kitchen_equipment {
            category.kitchen_equipment = v;
        }
        if let Some(v) = self.furniture_fixtures {
            category.furniture_fixtures = v;
        }
        if let Some(v) = self.licenses_permits {
            category.licenses_permits = v;
        }
        if let Some(v) = self.initial_inventory {
            category.initial_inventory = v;
        }
        if let Some(v) = self.working_capital {
            category.working_capital = v;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FundingSourcesPatch {
    pub owner_investment: Option<f64>,
    pub bank_loan: Option<f64>,
    pub outside_investors: Option<f64>,
    pub other_funding: Option<f64>,
}

impl FundingSourcesPatch {
    pub fn apply(self, category: &mut FundingSources) {
        if let Some(v) = self.owner_investment {
            category.owner_investment = v;
        }
        if let Some(v) = self.bank_loan {
            category.bank_loan = v;
        }
        if let Some(v) = self.outside_investors {
            category.outside_investors = v;
        }
        if let Some(v) = self.other_funding {
            category.other_funding = v;
        }
    }
}

/// A patch addressed to one financial category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "camelCase")]
pub enum FinancialPatch {
    Revenue(RevenuePatch),
    Cogs(CogsPatch),
    OperatingExpenses(OperatingExpensesPatch),
    StartupCosts(StartupCostsPatch),
    FundingSources(FundingSourcesPatch),
}

impl FinancialPatch {
    /// Applies this patch to the matching category of `data`.
    pub fn apply(self, data: &mut FinancialData) {
        match self {
            Self::Revenue(p) => p.apply(&mut data.revenue),
            Self::Cogs(p) => p.apply(&mut data.cogs),
            Self::OperatingExpenses(p) => p.apply(&mut data.operating_expenses),
            Self::StartupCosts(p) => p.apply(&mut data.startup_costs),
            Self::FundingSources(p) => p.apply(&mut data.funding_sources),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_merges_single_field() {
        let mut data = FinancialData::default();
        data.revenue.food_sales = 500_000.0;
        data.revenue.beverage_sales = 120_000.0;

        FinancialPatch::Revenue(RevenuePatch {
            food_sales: Some(700_000.0),
            ..Default::default()
        })
        .apply(&mut data);

        assert_eq!(data.revenue.food_sales, 700_000.0);
        assert_eq!(data.revenue.beverage_sales, 120_000.0);
    }

    #[test]
    fn test_patch_leaves_other_categories_untouched() {
        let mut data = FinancialData::default();
        data.cogs.food_cost_ratio = 0.32;

        FinancialPatch::OperatingExpenses(OperatingExpensesPatch {
            rent: Some(84_000.0),
            ..Default::default()
        })
        .apply(&mut data);

        assert_eq!(data.cogs.food_cost_ratio, 0.32);
        assert_eq!(data.operating_expenses.rent, 84_000.0);
    }

    #[test]
    fn test_defaults_are_zero() {
        let data = FinancialData::default();
        assert_eq!(data.revenue.food_sales, 0.0);
        assert_eq!(data.funding_sources.bank_loan, 0.0);
    }
}
