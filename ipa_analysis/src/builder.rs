pub use crate::config::*;

/// A builder for assembling a dataset item by item.
///
/// Every item is checked as soon as it is added, so that a malformed row is
/// reported with its position before anything else happens.
///
/// ```
/// pub use ipa_analysis::builder::Builder;
/// pub use ipa_analysis::Strategy;
/// # use ipa_analysis::IpaErrors;
///
/// let mut builder = Builder::new();
/// builder.add_item("E1", 4.5, 2.0)?;
/// builder.add_item("S1", 2.0, 4.0)?;
///
/// let result = builder.build()?;
/// assert_eq!(result.items[0].strategy, Strategy::ImproveFirst);
///
/// # Ok::<(), IpaErrors>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _items: Vec<RatedItem>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder { _items: Vec::new() }
    }

    /// Adds an item to the dataset.
    pub fn add_item(
        &mut self,
        id: &str,
        importance: f64,
        performance: f64,
    ) -> Result<(), IpaErrors> {
        self.add_rated_item(&RatedItem::new(id, importance, performance))
    }

    pub fn add_rated_item(&mut self, item: &RatedItem) -> Result<(), IpaErrors> {
        crate::check_item(self._items.len() + 1, item)?;
        self._items.push(item.clone());
        Ok(())
    }

    pub fn items(&self) -> &[RatedItem] {
        &self._items
    }

    /// Runs the analysis over all the items added so far.
    pub fn build(&self) -> Result<AnalysisResult, IpaErrors> {
        crate::run_analysis(&self._items)
    }
}
