// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// One survey item, rated on the two IPA axes.
///
/// The scale is not constrained: any consistent scale (1-5, 1-100, ...) works
/// as long as the values are finite.
#[derive(PartialEq, Debug, Clone)]
pub struct RatedItem {
    pub id: String,
    pub importance: f64,
    pub performance: f64,
}

impl RatedItem {
    pub fn new(id: &str, importance: f64, performance: f64) -> RatedItem {
        RatedItem {
            id: id.to_string(),
            importance,
            performance,
        }
    }
}

// ******** Output data structures *********

/// The arithmetic means of both axes over a full dataset.
/// They are the thresholds of the quadrants.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct AxisMeans {
    pub importance_mean: f64,
    pub performance_mean: f64,
}

/// The four quadrants of the IPA matrix, each one mapped to an action.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Strategy {
    /// High importance, high performance: keep up the good work.
    Retain,
    /// High importance, low performance: concentrate here first.
    ImproveFirst,
    /// Low importance, high performance: possible overkill.
    Overinvested,
    /// Low importance, low performance.
    LowPriority,
}

impl Strategy {
    /// The order in which the strategy groups are presented.
    pub const DISPLAY_ORDER: [Strategy; 4] = [
        Strategy::ImproveFirst,
        Strategy::Retain,
        Strategy::Overinvested,
        Strategy::LowPriority,
    ];

    pub fn recommendation(&self) -> &'static str {
        match self {
            Strategy::Retain => "Maintain the current level. This item is well managed.",
            Strategy::ImproveFirst => {
                "Importance is high but performance is low. Improvement is needed quickly."
            }
            Strategy::Overinvested => {
                "Resources exceed what the importance of this item calls for. Consider reallocating them."
            }
            Strategy::LowPriority => {
                "Low priority for now. There is no need to concentrate resources here."
            }
        }
    }

    /// Human readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Retain => "Retain",
            Strategy::ImproveFirst => "Improve first",
            Strategy::Overinvested => "Overinvested",
            Strategy::LowPriority => "Low priority",
        }
    }

    /// Stable name, used in the exported files.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Retain => "retain",
            Strategy::ImproveFirst => "improve_first",
            Strategy::Overinvested => "overinvested",
            Strategy::LowPriority => "low_priority",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Strategy::Retain => "green",
            Strategy::ImproveFirst => "red",
            Strategy::Overinvested => "orange",
            Strategy::LowPriority => "gray",
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Strategy {
    type Err = IpaErrors;

    /// Accepts both the stable name and the label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Strategy::DISPLAY_ORDER
            .iter()
            .find(|st| st.name() == s || st.label().eq_ignore_ascii_case(s))
            .cloned()
            .ok_or_else(|| IpaErrors::UnknownStrategy {
                name: s.to_string(),
            })
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct ClassifiedItem {
    pub item: RatedItem,
    pub strategy: Strategy,
    pub recommendation: String,
}

/// All the items sharing one strategy.
#[derive(PartialEq, Debug, Clone)]
pub struct StrategyGroup {
    pub strategy: Strategy,
    // Never empty at construction.
    pub members: Vec<ClassifiedItem>,
    pub mean_importance: f64,
    pub mean_performance: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct AnalysisResult {
    pub means: AxisMeans,
    pub items: Vec<ClassifiedItem>,
    pub groups: Vec<StrategyGroup>,
}

/// Errors that prevent the analysis from completing successfully.
#[derive(PartialEq, Debug, Clone)]
pub enum IpaErrors {
    /// No item was provided: the means are undefined.
    EmptyDataset,
    /// An item cannot be used. `row` starts at 1.
    MalformedInput {
        row: usize,
        id: String,
        reason: String,
    },
    UnknownStrategy {
        name: String,
    },
}

impl Error for IpaErrors {}

impl Display for IpaErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IpaErrors::EmptyDataset => write!(f, "the dataset is empty, no mean can be computed"),
            IpaErrors::MalformedInput { row, id, reason } => {
                write!(f, "malformed input at row {} (item {:?}): {}", row, id, reason)
            }
            IpaErrors::UnknownStrategy { name } => write!(f, "unknown strategy: {:?}", name),
        }
    }
}
