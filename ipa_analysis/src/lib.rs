mod config;
pub mod builder;
pub mod manual;

use log::{debug, info};

pub use crate::config::*;

// **** Private structures ****

// Position of an item relative to the means. A value equal to the mean is high.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum Level {
    High,
    Low,
}

impl Level {
    fn of(value: f64, mean: f64) -> Level {
        if value >= mean {
            Level::High
        } else {
            Level::Low
        }
    }
}

// The mean of finite values, kept within [min, max] of these values.
// Identical values give back that value, and large values never overflow to infinity.
fn bounded_mean<I: Iterator<Item = f64> + Clone>(values: I) -> f64 {
    let n = values.clone().count() as f64;
    let mut mean = values.clone().sum::<f64>() / n;
    if !mean.is_finite() {
        mean = values.clone().map(|x| x / n).sum::<f64>();
    }
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.fold(f64::NEG_INFINITY, f64::max);
    mean.max(min).min(max)
}

/// Checks that an item can take part in an analysis.
///
/// `row` is the 1-based position of the item in its dataset, used for reporting.
pub fn check_item(row: usize, item: &RatedItem) -> Result<(), IpaErrors> {
    let malformed = |reason: String| IpaErrors::MalformedInput {
        row,
        id: item.id.clone(),
        reason,
    };
    if item.id.trim().is_empty() {
        return Err(malformed("missing item identifier".to_string()));
    }
    if !item.importance.is_finite() {
        return Err(malformed(format!(
            "importance is not a finite number: {}",
            item.importance
        )));
    }
    if !item.performance.is_finite() {
        return Err(malformed(format!(
            "performance is not a finite number: {}",
            item.performance
        )));
    }
    Ok(())
}

/// Computes the means of both axes.
///
/// All the items are checked before any arithmetic, so that a NaN never ends up
/// in a threshold.
pub fn compute_axis_means(items: &[RatedItem]) -> Result<AxisMeans, IpaErrors> {
    if items.is_empty() {
        return Err(IpaErrors::EmptyDataset);
    }
    for (idx, item) in items.iter().enumerate() {
        check_item(idx + 1, item)?;
    }
    let importance_mean = bounded_mean(items.iter().map(|it| it.importance));
    let performance_mean = bounded_mean(items.iter().map(|it| it.performance));
    Ok(AxisMeans {
        importance_mean,
        performance_mean,
    })
}

/// The quadrant of a single item, given the means of the dataset it belongs to.
pub fn classify_item(item: &RatedItem, means: &AxisMeans) -> Strategy {
    let imp = Level::of(item.importance, means.importance_mean);
    let perf = Level::of(item.performance, means.performance_mean);
    match (imp, perf) {
        (Level::High, Level::High) => Strategy::Retain,
        (Level::High, Level::Low) => Strategy::ImproveFirst,
        (Level::Low, Level::High) => Strategy::Overinvested,
        (Level::Low, Level::Low) => Strategy::LowPriority,
    }
}

/// Classifies all the items of a dataset.
///
/// The means are always computed over the items passed here. The returned items
/// are in the same order as the input.
pub fn classify(items: &[RatedItem]) -> Result<(AxisMeans, Vec<ClassifiedItem>), IpaErrors> {
    let means = compute_axis_means(items)?;
    debug!("classify: {} items, means: {:?}", items.len(), means);
    let classified: Vec<ClassifiedItem> = items
        .iter()
        .map(|item| {
            let strategy = classify_item(item, &means);
            debug!("classify: {:?} -> {:?}", item, strategy);
            ClassifiedItem {
                item: item.clone(),
                strategy,
                recommendation: strategy.recommendation().to_string(),
            }
        })
        .collect();
    Ok((means, classified))
}

/// Groups the classified items by strategy, in display order.
///
/// The means of each group only use the members of that group. Strategies without
/// any member do not get a group.
pub fn aggregate(classified: &[ClassifiedItem]) -> Vec<StrategyGroup> {
    let mut groups: Vec<StrategyGroup> = Vec::new();
    for strategy in Strategy::DISPLAY_ORDER {
        let members: Vec<ClassifiedItem> = classified
            .iter()
            .filter(|ci| ci.strategy == strategy)
            .cloned()
            .collect();
        if members.is_empty() {
            continue;
        }
        let mean_importance = bounded_mean(members.iter().map(|ci| ci.item.importance));
        let mean_performance = bounded_mean(members.iter().map(|ci| ci.item.performance));
        groups.push(StrategyGroup {
            strategy,
            members,
            mean_importance,
            mean_performance,
        });
    }
    groups
}

/// Runs the full analysis: means, classification and grouping.
///
/// Arguments:
/// * `items` the rated items of the survey. At least one item is required.
pub fn run_analysis(items: &[RatedItem]) -> Result<AnalysisResult, IpaErrors> {
    info!("run_analysis: Processing {:?} items", items.len());
    let (means, classified) = classify(items)?;
    info!(
        "Mean importance: {:.2}, mean performance: {:.2}",
        means.importance_mean, means.performance_mean
    );
    let groups = aggregate(&classified);
    for g in groups.iter() {
        info!(
            "{:>4} {} (importance {:.2}, performance {:.2})",
            g.members.len(),
            g.strategy,
            g.mean_importance,
            g.mean_performance
        );
    }
    Ok(AnalysisResult {
        means,
        items: classified,
        groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn items(raw: &[(&str, f64, f64)]) -> Vec<RatedItem> {
        raw.iter()
            .map(|(id, imp, perf)| RatedItem::new(id, *imp, *perf))
            .collect()
    }

    fn strategies(classified: &[ClassifiedItem]) -> Vec<(String, Strategy)> {
        classified
            .iter()
            .map(|ci| (ci.item.id.clone(), ci.strategy))
            .collect()
    }

    #[test]
    fn four_corners() {
        init();
        let data = items(&[("A", 5.0, 5.0), ("B", 1.0, 1.0), ("C", 5.0, 1.0), ("D", 1.0, 5.0)]);
        let (means, classified) = classify(&data).unwrap();
        assert_eq!(
            means,
            AxisMeans {
                importance_mean: 3.0,
                performance_mean: 3.0
            }
        );
        assert_eq!(
            strategies(&classified),
            vec![
                ("A".to_string(), Strategy::Retain),
                ("B".to_string(), Strategy::LowPriority),
                ("C".to_string(), Strategy::ImproveFirst),
                ("D".to_string(), Strategy::Overinvested),
            ]
        );
    }

    #[test]
    fn identical_items_are_retained() {
        init();
        let data = items(&[("E1", 3.0, 3.0), ("E2", 3.0, 3.0), ("E3", 3.0, 3.0)]);
        let (means, classified) = classify(&data).unwrap();
        assert_eq!(means.importance_mean, 3.0);
        assert_eq!(means.performance_mean, 3.0);
        assert!(classified.iter().all(|ci| ci.strategy == Strategy::Retain));
    }

    #[test]
    fn identical_decimal_items_are_retained() {
        init();
        let data = items(&[("E1", 0.1, 0.1), ("E2", 0.1, 0.1), ("E3", 0.1, 0.1)]);
        let (means, classified) = classify(&data).unwrap();
        assert_eq!(means.importance_mean, 0.1);
        assert_eq!(means.performance_mean, 0.1);
        assert!(classified.iter().all(|ci| ci.strategy == Strategy::Retain));

        let data = items(&[
            ("S1", 2.3, 4.0),
            ("S2", 2.3, 4.0),
            ("S3", 2.3, 4.0),
            ("S4", 2.3, 4.0),
            ("S5", 2.3, 4.0),
            ("S6", 2.3, 4.0),
        ]);
        let res = run_analysis(&data).unwrap();
        assert_eq!(res.means.importance_mean, 2.3);
        assert!(res.items.iter().all(|ci| ci.strategy == Strategy::Retain));
        assert_eq!(res.groups.len(), 1);
        assert_eq!(res.groups[0].mean_importance, 2.3);
        assert_eq!(res.groups[0].mean_performance, 4.0);
    }

    #[test]
    fn large_values_keep_finite_means() {
        let data = items(&[("A", 1e308, 1.0), ("B", 1e308, 1.0)]);
        let (means, classified) = classify(&data).unwrap();
        assert_eq!(means.importance_mean, 1e308);
        assert!(classified.iter().all(|ci| ci.strategy == Strategy::Retain));

        let data = items(&[("A", f64::MAX, 1.0), ("B", f64::MAX / 2.0, 2.0)]);
        let (means, _) = classify(&data).unwrap();
        assert!(means.importance_mean.is_finite());
        assert!(means.importance_mean >= f64::MAX / 2.0);
        assert!(means.importance_mean <= f64::MAX);
    }

    #[test]
    fn value_at_mean_is_high() {
        let means = AxisMeans {
            importance_mean: 3.0,
            performance_mean: 2.5,
        };
        let at_mean = RatedItem::new("S1", 3.0, 2.5);
        assert_eq!(classify_item(&at_mean, &means), Strategy::Retain);
        let imp_at_mean = RatedItem::new("S2", 3.0, 2.4);
        assert_eq!(classify_item(&imp_at_mean, &means), Strategy::ImproveFirst);
        let perf_at_mean = RatedItem::new("S3", 2.9, 2.5);
        assert_eq!(classify_item(&perf_at_mean, &means), Strategy::Overinvested);
    }

    #[test]
    fn every_item_gets_one_strategy() {
        init();
        let data = items(&[
            ("E1", 4.2, 3.1),
            ("E2", 3.8, 4.0),
            ("S1", 2.1, 2.9),
            ("S2", 4.9, 1.5),
            ("S3", 3.3, 3.3),
            ("G1", 1.2, 4.4),
            ("G2", 2.7, 2.2),
        ]);
        let (_, classified) = classify(&data).unwrap();
        assert_eq!(classified.len(), data.len());
        let groups = aggregate(&classified);
        let total: usize = groups.iter().map(|g| g.members.len()).sum();
        assert_eq!(total, data.len());
        let mut seen: HashSet<String> = HashSet::new();
        for g in groups.iter() {
            for m in g.members.iter() {
                assert_eq!(m.strategy, g.strategy);
                assert!(seen.insert(m.item.id.clone()), "{} seen twice", m.item.id);
            }
        }
        assert_eq!(seen.len(), data.len());
    }

    #[test]
    fn classification_is_deterministic_and_keeps_order() {
        let data = items(&[("G3", 1.0, 2.0), ("E7", 4.0, 4.0), ("S2", 2.5, 4.5)]);
        let first = classify(&data).unwrap();
        let second = classify(&data).unwrap();
        assert_eq!(first, second);
        let ids: Vec<&str> = first.1.iter().map(|ci| ci.item.id.as_str()).collect();
        assert_eq!(ids, vec!["G3", "E7", "S2"]);
    }

    #[test]
    fn recommendation_follows_strategy() {
        let data = items(&[("A", 5.0, 5.0), ("B", 1.0, 1.0), ("C", 5.0, 1.0), ("D", 1.0, 5.0)]);
        let (_, classified) = classify(&data).unwrap();
        for ci in classified.iter() {
            assert_eq!(ci.recommendation, ci.strategy.recommendation());
        }
        let messages: HashSet<&str> = Strategy::DISPLAY_ORDER
            .iter()
            .map(|s| s.recommendation())
            .collect();
        assert_eq!(messages.len(), 4);
    }

    #[test]
    fn group_means_use_group_members() {
        init();
        // Global means: importance 3.5, performance 3.0
        let data = items(&[
            ("A", 6.0, 5.0),
            ("B", 4.0, 3.0),
            ("C", 5.0, 1.0),
            ("D", 1.0, 4.0),
            ("E", 1.5, 1.0),
            ("F", 3.5, 4.0),
        ]);
        let res = run_analysis(&data).unwrap();
        assert_eq!(res.means.importance_mean, 3.5);
        assert_eq!(res.means.performance_mean, 3.0);

        let order: Vec<Strategy> = res.groups.iter().map(|g| g.strategy).collect();
        assert_eq!(
            order,
            vec![
                Strategy::ImproveFirst,
                Strategy::Retain,
                Strategy::Overinvested,
                Strategy::LowPriority
            ]
        );

        let retain = &res.groups[1];
        let ids: Vec<&str> = retain.members.iter().map(|m| m.item.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "F"]);
        assert_eq!(retain.mean_importance, 4.5);
        assert_eq!(retain.mean_performance, 4.0);

        let improve = &res.groups[0];
        assert_eq!(improve.members.len(), 1);
        assert_eq!(improve.mean_importance, 5.0);
        assert_eq!(improve.mean_performance, 1.0);
    }

    #[test]
    fn empty_groups_are_omitted() {
        let data = items(&[("A", 5.0, 5.0), ("B", 1.0, 1.0)]);
        let res = run_analysis(&data).unwrap();
        let order: Vec<Strategy> = res.groups.iter().map(|g| g.strategy).collect();
        assert_eq!(order, vec![Strategy::Retain, Strategy::LowPriority]);
        assert!(res.groups.iter().all(|g| !g.members.is_empty()));
    }

    #[test]
    fn empty_dataset() {
        assert_eq!(classify(&[]), Err(IpaErrors::EmptyDataset));
        assert_eq!(run_analysis(&[]), Err(IpaErrors::EmptyDataset));
    }

    #[test]
    fn nan_is_rejected_before_means() {
        let data = items(&[("E1", 3.0, 3.0), ("E2", 4.0, f64::NAN), ("E3", 1.0, 2.0)]);
        match classify(&data) {
            Err(IpaErrors::MalformedInput { row, id, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(id, "E2");
            }
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn infinite_and_missing_id_are_rejected() {
        let data = items(&[("E1", f64::INFINITY, 3.0)]);
        assert!(matches!(
            classify(&data),
            Err(IpaErrors::MalformedInput { row: 1, .. })
        ));
        let data = items(&[("E1", 3.0, 3.0), ("  ", 3.0, 3.0)]);
        assert!(matches!(
            classify(&data),
            Err(IpaErrors::MalformedInput { row: 2, .. })
        ));
    }

    #[test]
    fn strategy_names() {
        for s in Strategy::DISPLAY_ORDER {
            assert_eq!(s.name().parse::<Strategy>(), Ok(s));
            assert_eq!(s.label().parse::<Strategy>(), Ok(s));
        }
        assert!("keep".parse::<Strategy>().is_err());
    }
}
