//! Car type: its models plus a per-type zero-score index

use std::cmp::Ordering;

use super::{CarModel, DealershipError, ModelId, TypeId};
use crate::compare::{Comparator, NaturalOrder};
use crate::tree::{AvlTree, Direction};

/// A car type and its models
#[derive(Debug)]
pub struct CarType {
    type_id: TypeId,

    /// Indexed by model id
    models: Vec<CarModel>,

    /// Model ids whose score is exactly 0
    zero_scores: AvlTree<ModelId, NaturalOrder>,

    best_seller: ModelId,
}

impl CarType {
    /// Create type with `num_models` fresh models
    ///
    /// Every model starts at score 0, so the zero-score index is seeded with
    /// all ids at once.
    pub fn new(type_id: TypeId, num_models: u32) -> Result<Self, DealershipError> {
        let count = num_models as usize;
        let mut models = Vec::new();
        models
            .try_reserve_exact(count)
            .map_err(crate::tree::TreeError::from)?;
        models.extend((0..num_models).map(|model_id| CarModel::new(type_id, model_id)));

        let zero_scores = AvlTree::from_sorted((0..num_models).collect(), NaturalOrder)?;

        Ok(Self {
            type_id,
            models,
            zero_scores,
            best_seller: 0,
        })
    }

    /// Search key: carries only the type id
    pub fn probe(type_id: TypeId) -> Self {
        Self {
            type_id,
            models: Vec::new(),
            zero_scores: AvlTree::new(),
            best_seller: 0,
        }
    }

    /// Type id
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Number of models
    pub fn num_models(&self) -> usize {
        self.models.len()
    }

    /// All models, by id
    pub fn models(&self) -> &[CarModel] {
        &self.models
    }

    /// Model by id
    pub fn model(&self, model_id: ModelId) -> Option<&CarModel> {
        self.models.get(model_id as usize)
    }

    pub(crate) fn model_mut(&mut self, model_id: ModelId) -> Option<&mut CarModel> {
        self.models.get_mut(model_id as usize)
    }

    /// Best-selling model of this type
    ///
    /// Equal sales go to the lower model id, the same rule the global
    /// sales index applies, so the answer never depends on sale order.
    pub fn best_seller(&self) -> ModelId {
        self.best_seller
    }

    /// Reconsider the best seller after `model_id` sold a car
    ///
    /// Sales only grow, so comparing against the current leader is enough.
    pub(crate) fn note_sale(&mut self, model_id: ModelId) {
        let (Some(candidate), Some(leader)) = (self.model(model_id), self.model(self.best_seller)) else {
            return;
        };
        let better = match candidate.sales.cmp(&leader.sales) {
            Ordering::Greater => true,
            Ordering::Equal => model_id < self.best_seller,
            Ordering::Less => false,
        };
        if better {
            self.best_seller = model_id;
        }
    }

    /// Number of models with score 0
    pub fn num_zero_scores(&self) -> usize {
        self.zero_scores.len()
    }

    /// Up to `k` zero-score model ids, lowest first
    pub fn zero_score_models(&self, k: usize) -> Vec<ModelId> {
        self.zero_scores
            .bounded_traversal(Direction::Ascending, k)
            .into_iter()
            .copied()
            .collect()
    }

    pub(crate) fn zero_index(&self) -> &AvlTree<ModelId, NaturalOrder> {
        &self.zero_scores
    }

    pub(crate) fn zero_index_mut(&mut self) -> &mut AvlTree<ModelId, NaturalOrder> {
        &mut self.zero_scores
    }
}

/// Order car types by id
#[derive(Debug, Default, Clone, Copy)]
pub struct ByTypeId;

impl Comparator<CarType> for ByTypeId {
    fn compare(&self, a: &CarType, b: &CarType) -> Ordering {
        a.type_id.cmp(&b.type_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_type_seeds_zero_index() {
        let car_type = CarType::new(3, 7).unwrap();
        assert_eq!(car_type.num_models(), 7);
        assert_eq!(car_type.num_zero_scores(), 7);
        assert_eq!(car_type.zero_index().root(), Some(&3));
        assert_eq!(car_type.zero_score_models(3), vec![0, 1, 2]);
        assert!(car_type.models().iter().all(|m| m.type_id == 3 && m.score == 0));
    }

    #[test]
    fn test_best_seller_tie_goes_to_lower_id() {
        let mut car_type = CarType::new(1, 4).unwrap();
        car_type.model_mut(2).unwrap().sales = 1;
        car_type.note_sale(2);
        assert_eq!(car_type.best_seller(), 2);

        car_type.model_mut(1).unwrap().sales = 1;
        car_type.note_sale(1);
        assert_eq!(car_type.best_seller(), 1);

        car_type.model_mut(3).unwrap().sales = 1;
        car_type.note_sale(3);
        assert_eq!(car_type.best_seller(), 1);
    }

    #[test]
    fn test_probe_compares_by_id_only() {
        let real = CarType::new(5, 2).unwrap();
        assert_eq!(ByTypeId.compare(&CarType::probe(5), &real), Ordering::Equal);
        assert!(ByTypeId.less(&CarType::probe(4), &real));
    }
}
