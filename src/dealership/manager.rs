//! Multi-index coordinator
//!
//! Indices over the same models:
//!   types     CarType by id
//!   sales     SalesKey, models with at least one sale
//!   positive  ScoreKey, score > 0
//!   negative  ScoreKey, score < 0
//!   per type  zero-score model ids
//!
//! A model changes only through `apply`, which takes it out of every index
//! whose key the change touches and puts it back with the new key. Storage in
//! the target indices is reserved first, so a failed mutation changes nothing.

use tracing::debug;

use super::{
    ByScore, BySales, ByTypeId, CarModel, CarType, DealershipConfig, DealershipError, ModelId,
    ModelRef, Mutation, SalesKey, ScoreBand, ScoreKey, TypeId,
};
use crate::tree::{AvlTree, Direction};

/// Car dealership records and their indices
#[derive(Debug)]
pub struct Dealership {
    config: DealershipConfig,
    types: AvlTree<CarType, ByTypeId>,
    sales: AvlTree<SalesKey, BySales>,
    positive: AvlTree<ScoreKey, ByScore>,
    negative: AvlTree<ScoreKey, ByScore>,
    num_models: usize,
}

impl Dealership {
    /// Create empty dealership with the default config
    pub fn new() -> Self {
        Self::with_config(DealershipConfig::default())
    }

    /// Create empty dealership
    pub fn with_config(config: DealershipConfig) -> Self {
        Self {
            config,
            types: AvlTree::default(),
            sales: AvlTree::default(),
            positive: AvlTree::default(),
            negative: AvlTree::default(),
            num_models: 0,
        }
    }

    /// Active config
    pub fn config(&self) -> &DealershipConfig {
        &self.config
    }

    /// Number of car types
    pub fn num_types(&self) -> usize {
        self.types.len()
    }

    /// Number of models across all types
    pub fn num_models(&self) -> usize {
        self.num_models
    }

    /// Register a type with models `0..num_models`
    pub fn add_car_type(&mut self, type_id: TypeId, num_models: u32) -> Result<(), DealershipError> {
        if type_id == 0 {
            return Err(DealershipError::InvalidInput("type id must be positive".to_string()));
        }
        if num_models == 0 {
            return Err(DealershipError::InvalidInput("a type needs at least one model".to_string()));
        }
        if self.types.contains(&CarType::probe(type_id)) {
            return Err(DealershipError::DuplicateType(type_id));
        }

        let car_type = CarType::new(type_id, num_models)?;
        self.types.insert(car_type)?;
        self.num_models += num_models as usize;

        debug!(type_id, num_models, "car type added");
        Ok(())
    }

    /// Drop a type and take its models out of every global index
    pub fn remove_car_type(&mut self, type_id: TypeId) -> Result<(), DealershipError> {
        if type_id == 0 {
            return Err(DealershipError::InvalidInput("type id must be positive".to_string()));
        }
        let car_type = self
            .types
            .remove(&CarType::probe(type_id))
            .ok_or(DealershipError::UnknownType(type_id))?;

        for model in car_type.models() {
            if model.sales > 0 {
                self.sales.remove(&model.sales_key());
            }
            match model.band() {
                ScoreBand::Negative => {
                    self.negative.remove(&model.score_key());
                }
                ScoreBand::Positive => {
                    self.positive.remove(&model.score_key());
                }
                // Zero-score index goes away with the type
                ScoreBand::Zero => {}
            }
        }
        self.num_models -= car_type.num_models();

        debug!(type_id, models = car_type.num_models(), "car type removed");
        Ok(())
    }

    /// Record one sale
    pub fn sell_car(&mut self, type_id: TypeId, model_id: ModelId) -> Result<(), DealershipError> {
        self.apply(type_id, model_id, Mutation::Sale)
    }

    /// Record a complaint filed `months` after purchase
    pub fn make_complaint(
        &mut self,
        type_id: TypeId,
        model_id: ModelId,
        months: u32,
    ) -> Result<(), DealershipError> {
        self.apply(type_id, model_id, Mutation::Complaint { months })
    }

    /// Apply `mutation` to one model, keeping every index in sync
    pub fn apply(
        &mut self,
        type_id: TypeId,
        model_id: ModelId,
        mutation: Mutation,
    ) -> Result<(), DealershipError> {
        if type_id == 0 {
            return Err(DealershipError::InvalidInput("type id must be positive".to_string()));
        }
        if let Mutation::Complaint { months: 0 } = mutation {
            return Err(DealershipError::InvalidInput("complaint months must be positive".to_string()));
        }

        let car_type = self
            .types
            .find_mut(&CarType::probe(type_id))
            .map_err(|_| DealershipError::UnknownType(type_id))?;
        let before = *car_type
            .model(model_id)
            .ok_or(DealershipError::UnknownModel { type_id, model_id })?;
        let after = mutation.applied_to(before, &self.config);

        let sales_changed = after.sales != before.sales;
        let score_changed = after.score != before.score;

        // Reserve before unlinking anything
        if sales_changed {
            self.sales.reserve(1)?;
        }
        if score_changed {
            match after.band() {
                ScoreBand::Negative => self.negative.reserve(1)?,
                ScoreBand::Zero => car_type.zero_index_mut().reserve(1)?,
                ScoreBand::Positive => self.positive.reserve(1)?,
            }
        }

        if sales_changed {
            if before.sales > 0 {
                self.sales.remove(&before.sales_key());
            }
            self.sales.insert(after.sales_key())?;
        }

        if score_changed {
            let removed = match before.band() {
                ScoreBand::Negative => self.negative.remove(&before.score_key()).is_some(),
                ScoreBand::Zero => car_type.zero_index_mut().remove(&model_id).is_some(),
                ScoreBand::Positive => self.positive.remove(&before.score_key()).is_some(),
            };
            debug_assert!(removed, "model {type_id}/{model_id} missing from its score index");

            match after.band() {
                ScoreBand::Negative => self.negative.insert(after.score_key())?,
                ScoreBand::Zero => car_type.zero_index_mut().insert(model_id)?,
                ScoreBand::Positive => self.positive.insert(after.score_key())?,
            }
        }

        if let Some(slot) = car_type.model_mut(model_id) {
            *slot = after;
        }
        if sales_changed {
            car_type.note_sale(model_id);
        }

        debug!(type_id, model_id, ?mutation, sales = after.sales, score = after.score, "model updated");
        Ok(())
    }

    /// Look up a model record
    pub fn model(&self, type_id: TypeId, model_id: ModelId) -> Result<&CarModel, DealershipError> {
        let car_type = self
            .types
            .find(&CarType::probe(type_id))
            .map_err(|_| DealershipError::UnknownType(type_id))?;
        car_type
            .model(model_id)
            .ok_or(DealershipError::UnknownModel { type_id, model_id })
    }

    /// Top seller of a type, or of everything when `type_id == 0`
    ///
    /// Ties go to the lowest type id, then the lowest model id. With no
    /// sales at all the global answer is model 0 of the lowest type.
    pub fn best_seller(&self, type_id: TypeId) -> Result<ModelRef, DealershipError> {
        if self.types.is_empty() {
            return Err(DealershipError::Empty);
        }

        if type_id == 0 {
            if let Ok(key) = self.sales.max() {
                return Ok((*key).into());
            }
            let first = self.types.min()?;
            return Ok(ModelRef {
                type_id: first.type_id(),
                model_id: 0,
            });
        }

        let car_type = self
            .types
            .find(&CarType::probe(type_id))
            .map_err(|_| DealershipError::UnknownType(type_id))?;
        Ok(ModelRef {
            type_id,
            model_id: car_type.best_seller(),
        })
    }

    /// The `k` lowest-scored models, worst first
    ///
    /// Returns every model when `k` exceeds the model count.
    pub fn worst_models(&self, k: usize) -> Result<Vec<ModelRef>, DealershipError> {
        if k == 0 {
            return Err(DealershipError::InvalidInput("requested model count must be positive".to_string()));
        }
        if self.num_models == 0 {
            return Ok(Vec::new());
        }
        let mut out = vec![ModelRef::default(); k.min(self.num_models)];
        let written = self.fill_worst_models(&mut out)?;
        out.truncate(written);
        Ok(out)
    }

    /// Write the lowest-scored models into `out`, returning how many
    ///
    /// Order: negative scores, then zero scores grouped by ascending type
    /// id, then positive scores. Every group is itself ascending by
    /// (score, type id, model id).
    pub fn fill_worst_models(&self, out: &mut [ModelRef]) -> Result<usize, DealershipError> {
        if out.is_empty() {
            return Err(DealershipError::InvalidInput("output buffer must not be empty".to_string()));
        }
        let capacity = out.len();
        let mut written = 0;

        for key in self.negative.bounded_traversal(Direction::Ascending, capacity) {
            out[written] = (*key).into();
            written += 1;
        }

        for car_type in self.types.iter() {
            if written == capacity {
                break;
            }
            let zeros = car_type
                .zero_index()
                .bounded_traversal(Direction::Ascending, capacity - written);
            for &model_id in zeros {
                out[written] = ModelRef {
                    type_id: car_type.type_id(),
                    model_id,
                };
                written += 1;
            }
        }

        if written < capacity {
            for key in self.positive.bounded_traversal(Direction::Ascending, capacity - written) {
                out[written] = (*key).into();
                written += 1;
            }
        }

        debug!(requested = capacity, written, "worst models collected");
        Ok(written)
    }
}

impl Default for Dealership {
    fn default() -> Self {
        Self::new()
    }
}
