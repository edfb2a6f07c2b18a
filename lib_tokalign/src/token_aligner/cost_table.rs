use std::io::Read;

use generic_a_star::cost::{AStarCost, U64Cost};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::{edge::Edge, operation::EditOperation};

/// The costs of the four edit operations.
///
/// All costs are non-negative.
/// The defaults make matches free, substitutions cost 1 and skips cost 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostTable {
    pub match_cost: U64Cost,
    pub substitution_cost: U64Cost,
    pub skip_source_cost: U64Cost,
    pub skip_target_cost: U64Cost,
}

impl CostTable {
    /// The largest cost accepted for a single operation.
    ///
    /// Alignments of up to 2^32 tokens cannot overflow the accumulated cost.
    pub const MAX_OPERATION_COST: u64 = u32::MAX as u64;

    /// Reads a cost table from a toml file.
    ///
    /// Missing keys keep their default value.
    pub fn read_toml(mut reader: impl Read) -> Result<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        let result: Self = toml::from_str(&input)?;
        result.verify()?;
        Ok(result)
    }

    pub fn verify(&self) -> Result<()> {
        for (name, cost) in [
            ("match_cost", self.match_cost),
            ("substitution_cost", self.substitution_cost),
            ("skip_source_cost", self.skip_source_cost),
            ("skip_target_cost", self.skip_target_cost),
        ] {
            if cost.as_u64() > Self::MAX_OPERATION_COST {
                return Err(Error::CostTooLarge {
                    name: name.to_string(),
                    cost: cost.as_u64(),
                    maximum: Self::MAX_OPERATION_COST,
                });
            }
        }
        Ok(())
    }

    pub fn operation_cost(&self, operation: EditOperation) -> U64Cost {
        match operation {
            EditOperation::MatchLink => self.match_cost,
            EditOperation::SubstituteLink => self.substitution_cost,
            EditOperation::SkipSource => self.skip_source_cost,
            EditOperation::SkipTarget => self.skip_target_cost,
        }
    }

    /// A lower bound on the cost of aligning the remaining tokens.
    ///
    /// Every unit of length difference between the remaining source and target needs one skip.
    /// Each unit is credited with at most 1, and never more than the cheaper skip.
    /// The bound is consistent, since only skips change the length difference, each by exactly one.
    pub fn lower_bound(&self, remaining_source: usize, remaining_target: usize) -> U64Cost {
        let unit = self
            .skip_source_cost
            .min(self.skip_target_cost)
            .min(U64Cost::from(1u8));
        let length_difference = remaining_source.abs_diff(remaining_target) as u64;
        U64Cost::from(unit.as_primitive() * length_difference)
    }

    /// The total cost of an alignment of `source` and `target`.
    ///
    /// **Panics** if an edge refers to a position outside of `source` or `target`.
    pub fn alignment_cost<Token: Eq>(
        &self,
        edges: &[Edge],
        source: &[Token],
        target: &[Token],
    ) -> U64Cost {
        edges
            .iter()
            .map(|edge| {
                self.operation_cost(match *edge {
                    Edge::Link { source: i, target: j } if source[i] == target[j] => {
                        EditOperation::MatchLink
                    }
                    Edge::Link { .. } => EditOperation::SubstituteLink,
                    Edge::SkipSource { .. } => EditOperation::SkipSource,
                    Edge::SkipTarget { .. } => EditOperation::SkipTarget,
                })
            })
            .fold(U64Cost::from(0u8), |sum, cost| sum + cost)
    }
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            match_cost: 0u64.into(),
            substitution_cost: 1u64.into(),
            skip_source_cost: 2u64.into(),
            skip_target_cost: 2u64.into(),
        }
    }
}
