//! Model records and the index keys derived from them
//!
//! Each index stores a small `Copy` key instead of the record, so a record
//! can be re-keyed by removing its old key and inserting the new one.

use std::cmp::Ordering;

use super::{DealershipConfig, ModelId, TypeId};
use crate::compare::Comparator;

/// One model of a car type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarModel {
    /// Owning type
    pub type_id: TypeId,

    /// Index within the type (0-based)
    pub model_id: ModelId,

    /// Cars sold
    pub sales: u64,

    /// Sales raise it, complaints lower it
    pub score: i64,
}

impl CarModel {
    /// Fresh model: no sales, score 0
    pub fn new(type_id: TypeId, model_id: ModelId) -> Self {
        Self {
            type_id,
            model_id,
            sales: 0,
            score: 0,
        }
    }

    /// Key for the sales index
    pub fn sales_key(&self) -> SalesKey {
        SalesKey {
            sales: self.sales,
            type_id: self.type_id,
            model_id: self.model_id,
        }
    }

    /// Key for the score indices
    pub fn score_key(&self) -> ScoreKey {
        ScoreKey {
            score: self.score,
            type_id: self.type_id,
            model_id: self.model_id,
        }
    }

    /// Which score index holds this model
    pub fn band(&self) -> ScoreBand {
        match self.score.cmp(&0) {
            Ordering::Less => ScoreBand::Negative,
            Ordering::Equal => ScoreBand::Zero,
            Ordering::Greater => ScoreBand::Positive,
        }
    }

    /// Handle naming this model
    pub fn model_ref(&self) -> ModelRef {
        ModelRef {
            type_id: self.type_id,
            model_id: self.model_id,
        }
    }
}

/// Score partition of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreBand {
    /// score < 0, global negative index
    Negative,

    /// score == 0, the type's zero-score index
    Zero,

    /// score > 0, global positive index
    Positive,
}

/// (type, model) pair identifying a model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelRef {
    /// Car type
    pub type_id: TypeId,

    /// Model within the type
    pub model_id: ModelId,
}

/// Sales index key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalesKey {
    /// Cars sold
    pub sales: u64,
    /// Tie-break 1
    pub type_id: TypeId,
    /// Tie-break 2
    pub model_id: ModelId,
}

impl From<SalesKey> for ModelRef {
    fn from(key: SalesKey) -> Self {
        ModelRef {
            type_id: key.type_id,
            model_id: key.model_id,
        }
    }
}

/// Score index key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreKey {
    /// Current score
    pub score: i64,
    /// Tie-break 1
    pub type_id: TypeId,
    /// Tie-break 2
    pub model_id: ModelId,
}

impl From<ScoreKey> for ModelRef {
    fn from(key: ScoreKey) -> Self {
        ModelRef {
            type_id: key.type_id,
            model_id: key.model_id,
        }
    }
}

/// Sales ascending; ties by type id then model id, both descending
///
/// The maximum is the top seller, and among equal sellers the one with the
/// lowest type id, then lowest model id.
#[derive(Debug, Default, Clone, Copy)]
pub struct BySales;

impl Comparator<SalesKey> for BySales {
    fn compare(&self, a: &SalesKey, b: &SalesKey) -> Ordering {
        a.sales
            .cmp(&b.sales)
            .then_with(|| b.type_id.cmp(&a.type_id))
            .then_with(|| b.model_id.cmp(&a.model_id))
    }
}

/// Score, then type id, then model id, all ascending
#[derive(Debug, Default, Clone, Copy)]
pub struct ByScore;

impl Comparator<ScoreKey> for ByScore {
    fn compare(&self, a: &ScoreKey, b: &ScoreKey) -> Ordering {
        a.score
            .cmp(&b.score)
            .then_with(|| a.type_id.cmp(&b.type_id))
            .then_with(|| a.model_id.cmp(&b.model_id))
    }
}

/// A change to one model's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// One car sold
    Sale,

    /// Complaint filed `months` after purchase (must be > 0)
    Complaint {
        /// Months since purchase
        months: u32,
    },
}

impl Mutation {
    /// Apply to a copy of the record
    ///
    /// Scores saturate at the `i64` bounds.
    pub fn applied_to(self, mut model: CarModel, config: &DealershipConfig) -> CarModel {
        match self {
            Mutation::Sale => {
                model.sales = model.sales.saturating_add(1);
                model.score = model.score.saturating_add(config.sale_points);
            }
            Mutation::Complaint { months } => {
                model.score = model.score.saturating_sub(config.complaint_penalty(months));
            }
        }
        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sales_ties_prefer_low_ids_at_max() {
        let a = SalesKey { sales: 3, type_id: 1, model_id: 4 };
        let b = SalesKey { sales: 3, type_id: 2, model_id: 0 };
        let c = SalesKey { sales: 3, type_id: 1, model_id: 2 };
        // Greater under BySales means "better seller"
        assert_eq!(BySales.compare(&a, &b), Ordering::Greater);
        assert_eq!(BySales.compare(&c, &a), Ordering::Greater);
        assert!(BySales.less(&SalesKey { sales: 2, ..c }, &b));
    }

    #[test]
    fn test_score_order_is_lexicographic() {
        let low = ScoreKey { score: -5, type_id: 9, model_id: 9 };
        let mid = ScoreKey { score: 0, type_id: 1, model_id: 3 };
        let mid2 = ScoreKey { score: 0, type_id: 2, model_id: 0 };
        assert!(ByScore.less(&low, &mid));
        assert!(ByScore.less(&mid, &mid2));
    }

    #[test]
    fn test_mutations() {
        let config = DealershipConfig::default();
        let model = CarModel::new(1, 0);
        let sold = Mutation::Sale.applied_to(model, &config);
        assert_eq!((sold.sales, sold.score), (1, 10));
        assert_eq!(sold.band(), ScoreBand::Positive);

        let hit = Mutation::Complaint { months: 4 }.applied_to(sold, &config);
        assert_eq!(hit.score, -15);
        assert_eq!(hit.band(), ScoreBand::Negative);
        assert_eq!(hit.model_ref(), ModelRef { type_id: 1, model_id: 0 });
    }

    #[test]
    fn test_scores_saturate_instead_of_overflowing() {
        let generous = DealershipConfig::new(i64::MAX, 100);
        let mut model = CarModel::new(1, 0);
        for _ in 0..3 {
            model = Mutation::Sale.applied_to(model, &generous);
        }
        assert_eq!((model.sales, model.score), (3, i64::MAX));

        let harsh = DealershipConfig::new(10, i64::MAX);
        let mut model = CarModel::new(1, 0);
        for _ in 0..2 {
            model = Mutation::Complaint { months: 1 }.applied_to(model, &harsh);
        }
        assert_eq!(model.score, i64::MIN);
        assert_eq!(model.band(), ScoreBand::Negative);
    }
}
