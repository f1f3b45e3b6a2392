//! The rewrite engine: normalizes every rule, then runs the structural passes
//! over each token sequence until they stop making changes.

use core::fmt;
use core::mem::take;

use css_cascade::{OptimizeMode, PropertyOptimizer};
use css_selectors::Compatibility;
use css_syntax::Token;
use log::{debug, trace, warn};

use crate::error::OptimizeError;
use crate::passes::{PassContext, merge_adjacent, reduce_non_adjacent, remove_duplicates};
use crate::prune::prune_empty;

/// Pass ceiling used unless overridden with [`AdvancedOptimizer::with_max_passes`].
pub const DEFAULT_MAX_PASSES: usize = 300;

/// Passes recorded before convergence is considered at all.
const MIN_RECORDED_PASSES: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pass {
    RemoveDuplicates,
    MergeAdjacent,
    ReduceNonAdjacent,
}

impl Pass {
    const CYCLE: [Self; 3] = [
        Self::RemoveDuplicates,
        Self::MergeAdjacent,
        Self::ReduceNonAdjacent,
    ];

    fn run(self, tokens: &mut Vec<Token>, context: PassContext<'_>) -> bool {
        match self {
            Self::RemoveDuplicates => remove_duplicates(tokens),
            Self::MergeAdjacent => merge_adjacent(tokens, context),
            Self::ReduceNonAdjacent => reduce_non_adjacent(tokens, context),
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::RemoveDuplicates => "remove-duplicates",
            Self::MergeAdjacent => "merge-adjacent",
            Self::ReduceNonAdjacent => "reduce-non-adjacent",
        })
    }
}

/// Change flags of the passes run on one sequence, oldest first.
#[derive(Debug, Default)]
struct PassHistory {
    changed: Vec<bool>,
}

impl PassHistory {
    #[inline]
    fn record(&mut self, changed: bool) {
        self.changed.push(changed);
    }

    #[inline]
    fn len(&self) -> usize {
        self.changed.len()
    }

    /// Enough passes have run and the two newest changed nothing.
    fn converged(&self) -> bool {
        self.changed.len() >= MIN_RECORDED_PASSES
            && matches!(self.changed.as_slice(), [.., false, false])
    }
}

/// Counters reported by a successful [`AdvancedOptimizer::optimize`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OptimizeStats {
    /// Passes run across every sequence.
    pub passes: usize,
    /// Tokens removed by duplicate removal and adjacent merging.
    pub removed: usize,
    /// Empty rules and blocks pruned after convergence.
    pub pruned: usize,
}

/// Structural stylesheet optimizer.
pub struct AdvancedOptimizer<'opt> {
    compatibility: Compatibility,
    optimizer: &'opt dyn PropertyOptimizer,
    max_passes: usize,
}

impl<'opt> AdvancedOptimizer<'opt> {
    #[inline]
    pub fn new(compatibility: Compatibility, optimizer: &'opt dyn PropertyOptimizer) -> Self {
        Self {
            compatibility,
            optimizer,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    /// Cap the passes run on any one sequence.
    #[inline]
    #[must_use]
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    #[inline]
    fn context(&self) -> PassContext<'opt> {
        PassContext {
            compatibility: self.compatibility,
            optimizer: self.optimizer,
        }
    }

    /// Optimize `tokens` in place.
    ///
    /// # Errors
    /// Returns [`OptimizeError::GaveUp`] when a sequence does not converge
    /// within the pass ceiling. The tokens keep every completed pass, and every
    /// other sequence is still converged and pruned.
    pub fn optimize(&self, tokens: &mut Vec<Token>) -> Result<OptimizeStats, OptimizeError> {
        let mut stats = OptimizeStats::default();
        let mut gave_up = None;
        self.normalize(tokens);
        loop {
            if let Err(error) = self.converge_tree(tokens, &mut stats) {
                gave_up = gave_up.or(Some(error));
            }
            let pruned = prune_empty(tokens);
            if pruned == 0 {
                break;
            }
            debug!("pruned {pruned} empty token(s); re-running passes");
            stats.pruned = stats.pruned.saturating_add(pruned);
        }
        debug!(
            "optimized in {} passes, removed {}, pruned {}",
            stats.passes, stats.removed, stats.pruned
        );
        gave_up.map_or(Ok(stats), Err)
    }

    /// Run the property optimizer over every body on its own, depth-first.
    fn normalize(&self, tokens: &mut [Token]) {
        for token in tokens {
            match token {
                Token::Rule(block) | Token::AtRuleBlock(block) => {
                    let selector = block.selectors.joined();
                    let body = take(&mut block.body);
                    block.body = self.optimizer.optimize(body, OptimizeMode::Single, &selector);
                }
                Token::Block(nested) => self.normalize(&mut nested.children),
                Token::Comment(_) | Token::AtRule(_) => {}
            }
        }
    }

    /// Converge every nested sequence, then `tokens` itself. A sequence that
    /// gives up does not stop the others; the first failure is returned.
    fn converge_tree(
        &self,
        tokens: &mut Vec<Token>,
        stats: &mut OptimizeStats,
    ) -> Result<(), OptimizeError> {
        let mut outcome = Ok(());
        for token in &mut *tokens {
            if let Token::Block(nested) = token {
                trace!("descending into `{}`", nested.selectors.joined());
                let nested_outcome = self.converge_tree(&mut nested.children, stats);
                outcome = outcome.and(nested_outcome);
            }
        }
        outcome.and(self.converge(tokens, stats))
    }

    fn converge(
        &self,
        tokens: &mut Vec<Token>,
        stats: &mut OptimizeStats,
    ) -> Result<(), OptimizeError> {
        let context = self.context();
        let mut history = PassHistory::default();
        for pass in Pass::CYCLE.into_iter().cycle() {
            if history.converged() {
                break;
            }
            if history.len() >= self.max_passes {
                warn!(
                    "no convergence after {} passes over {} tokens; keeping last state",
                    history.len(),
                    tokens.len()
                );
                return Err(OptimizeError::GaveUp {
                    passes: history.len(),
                });
            }
            let before = tokens.len();
            let changed = pass.run(tokens, context);
            debug!("{pass}: changed={changed}");
            history.record(changed);
            stats.passes = stats.passes.saturating_add(1);
            stats.removed = stats
                .removed
                .saturating_add(before.saturating_sub(tokens.len()));
        }
        Ok(())
    }
}
