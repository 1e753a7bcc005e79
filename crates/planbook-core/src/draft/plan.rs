//! Business-plan domain model.
//!
//! The plan is a fixed set of named sections, each a struct of free-form
//! text fields. Representing the sections as concrete types (rather than
//! string-keyed maps) turns "unknown section/field" bugs into compile
//! errors while keeping the merge-update semantics of the form UI.

use serde::{Deserialize, Serialize};

/// The complete business plan of one draft.
///
/// Section order here is the canonical display order used by listings
/// and by the comparison report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessPlan {
    pub ideation: Ideation,
    pub elevator_pitch: ElevatorPitch,
    pub executive_summary: ExecutiveSummary,
    pub market_analysis: MarketAnalysis,
    pub operations_plan: OperationsPlan,
    pub management_team: ManagementTeam,
    pub service_description: ServiceDescription,
    pub marketing_strategy: MarketingStrategy,
}

/// Early-stage concept notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ideation {
    pub concept: String,
    pub inspiration: String,
    pub notes: String,
}

/// The short-form pitch for investors and partners.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElevatorPitch {
    pub pitch: String,
    pub audience: String,
    pub differentiator: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecutiveSummary {
    pub summary: String,
    pub mission: String,
    pub vision: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketAnalysis {
    pub target_market: String,
    pub market_size: String,
    pub competitors: String,
    pub trends: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationsPlan {
    pub location: String,
    pub hours: String,
    pub staffing: String,
    pub suppliers: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManagementTeam {
    pub founders: String,
    pub advisors: String,
    pub hiring_plan: String,
}

/// What the restaurant actually serves and how.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceDescription {
    pub cuisine: String,
    pub menu_highlights: String,
    pub service_style: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketingStrategy {
    pub channels: String,
    pub launch_plan: String,
    pub loyalty_program: String,
}

// ============================================================================
// Patches
// ============================================================================
//
// A patch carries only the fields the form actually edited. Applying a
// patch overwrites exactly the `Some` fields and leaves siblings (and all
// other sections) untouched.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdeationPatch {
    pub concept: Option<String>,
    pub inspiration: Option<String>,
    pub notes: Option<String>,
}

impl IdeationPatch {
    pub fn apply(self, section: &mut Ideation) {
        if let Some(v) = self.concept {
            section.concept = v;
        }
        if let Some(v) = self.inspiration {
            section.inspiration = v;
        }
        if let Some(v) = self.notes {
            section.notes = v;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElevatorPitchPatch {
    pub pitch: Option<String>,
    pub audience: Option<String>,
    pub differentiator: Option<String>,
}

impl ElevatorPitchPatch {
    pub fn apply(self, section: &mut ElevatorPitch) {
        if let Some(v) = self.pitch {
            section.pitch = v;
        }
        if let Some(v) = self.audience {
            section.audience = v;
        }
        if let Some(v) = self.differentiator {
            section.differentiator = v;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecutiveSummaryPatch {
    pub summary: Option<String>,
    pub mission: Option<String>,
    pub vision: Option<String>,
}

impl ExecutiveSummaryPatch {
    pub fn apply(self, section: &mut ExecutiveSummary) {
        if let Some(v) = self.summary {
            section.summary = v;
        }
        if let Some(v) = self.mission {
            section.mission = v;
        }
        if let Some(v) = self.vision {
            section.vision = v;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketAnalysisPatch {
    pub target_market: Option<String>,
    pub market_size: Option<String>,
    pub competitors: Option<String>,
    pub trends: Option<String>,
}

impl MarketAnalysisPatch {
    pub fn apply(self, section: &mut MarketAnalysis) {
        if let Some(v) = self.target_market {
            section.target_market = v;
        }
        if let Some(v) = self.market_size {
            section.market_size = v;
        }
        if let Some(v) = self.competitors {
            section.competitors = v;
        }
        if let Some(v) = self.trends {
            section.trends = v;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationsPlanPatch {
    pub location: Option<String>,
    pub hours: Option<String>,
    pub staffing: Option<String>,
    pub suppliers: Option<String>,
}

impl OperationsPlanPatch {
    pub fn apply(self, section: &mut OperationsPlan) {
        if let Some(v) = self.location {
            section.location = v;
        }
        if let Some(v) = self.hours {
            section.hours = v;
        }
        if let Some(v) = self.staffing {
            section.staffing = v;
        }
        if let Some(v) = self.suppliers {
            section.suppliers = v;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManagementTeamPatch {
    pub founders: Option<String>,
    pub advisors: Option<String>,
    pub hiring_plan: Option<String>,
}

impl ManagementTeamPatch {
    pub fn apply(self, section: &mut ManagementTeam) {
        if let Some(v) = self.founders {
            section.founders = v;
        }
        if let Some(v) = self.advisors {
            section.advisors = v;
        }
        if let Some(v) = self.hiring_plan {
            section.hiring_plan = v;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceDescriptionPatch {
    pub cuisine: Option<String>,
    pub menu_highlights: Option<String>,
    pub service_style: Option<String>,
}

impl ServiceDescriptionPatch {
    pub fn apply(self, section: &mut ServiceDescription) {
        if let Some(v) = self.cuisine {
            section.cuisine = v;
        }
        if let Some(v) = self.menu_highlights {
            section.menu_highlights = v;
        }
        if let Some(v) = self.service_style {
            section.service_style = v;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketingStrategyPatch {
    pub channels: Option<String>,
    pub launch_plan: Option<String>,
    pub loyalty_program: Option<String>,
}

impl MarketingStrategyPatch {
    pub fn apply(self, section: &mut MarketingStrategy) {
        if let Some(v) = self.channels {
            section.channels = v;
        }
        if let Some(v) = self.launch_plan {
            section.launch_plan = v;
        }
        if let Some(v) = self.loyalty_program {
            section.loyalty_program = v;
        }
    }
}

/// A patch addressed to one business-plan section.
///
/// One action endpoint covers all eight sections; the variant selects the
/// section, the payload carries the edited fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "camelCase")]
pub enum BusinessPlanPatch {
    Ideation(IdeationPatch),
    ElevatorPitch(ElevatorPitchPatch),
    ExecutiveSummary(ExecutiveSummaryPatch),
    MarketAnalysis(MarketAnalysisPatch),
    OperationsPlan(OperationsPlanPatch),
    ManagementTeam(ManagementTeamPatch),
    ServiceDescription(ServiceDescriptionPatch),
    MarketingStrategy(MarketingStrategyPatch),
}

impl BusinessPlanPatch {
    /// Applies this patch to the matching section of `plan`.
    pub fn apply(self, plan: &mut BusinessPlan) {
        match self {
            Self::Ideation(p) => p.apply(&mut plan.ideation),
            Self::ElevatorPitch(p) => p.apply(&mut plan.elevator_pitch),
            Self::ExecutiveSummary(p) => p.apply(&mut plan.executive_summary),
            Self::MarketAnalysis(p) => p.apply(&mut plan.market_analysis),
            Self::OperationsPlan(p) => p.apply(&mut plan.operations_plan),
            Self::ManagementTeam(p) => p.apply(&mut plan.management_team),
            Self::ServiceDescription(p) => p.apply(&mut plan.service_description),
            Self::MarketingStrategy(p) => p.apply(&mut plan.marketing_strategy),
        }
    }
}
