// Declarative specifications of the charts. The drawing itself is left to the consumer.

use crate::ipa::*;
use ipa_analysis::*;

pub const IMPORTANCE_MEAN_COLOR: &str = "red";
pub const PERFORMANCE_MEAN_COLOR: &str = "blue";

/// The IPA scatter plot: performance on the x axis, importance on the y axis,
/// and one dashed line for each mean.
pub fn scatter_js(res: &AnalysisResult) -> JSValue {
    let points: Vec<JSValue> = res
        .items
        .iter()
        .map(|ci| {
            json!({
                "label": ci.item.id,
                "x": ci.item.performance,
                "y": ci.item.importance,
                "strategy": ci.strategy.name(),
                "color": ci.strategy.color(),
            })
        })
        .collect();
    json!({
        "title": "IPA Result",
        "xAxis": {"title": "Performance"},
        "yAxis": {"title": "Importance"},
        "points": points,
        "referenceLines": [
            {
                "orientation": "horizontal",
                "value": res.means.importance_mean,
                "label": "Mean importance",
                "color": IMPORTANCE_MEAN_COLOR,
                "style": "dashed",
            },
            {
                "orientation": "vertical",
                "value": res.means.performance_mean,
                "label": "Mean performance",
                "color": PERFORMANCE_MEAN_COLOR,
                "style": "dashed",
            },
        ],
    })
}

/// One series per strategy group, with the means of the group.
pub fn radar_js(res: &AnalysisResult) -> JSValue {
    let series: Vec<JSValue> = res
        .groups
        .iter()
        .map(|g| {
            json!({
                "strategy": g.strategy.name(),
                "label": g.strategy.label(),
                "color": g.strategy.color(),
                "values": [g.mean_importance, g.mean_performance],
            })
        })
        .collect();
    json!({
        "title": "Mean importance and performance by strategy",
        "axes": ["Importance", "Performance"],
        "series": series,
    })
}

pub fn build_chart_js(res: &AnalysisResult) -> JSValue {
    json!({
        "scatter": scatter_js(res),
        "radar": radar_js(res),
    })
}
