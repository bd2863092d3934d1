use crate::task::Condition;
use ahash::AHashSet;

/// Simplifies section conditions without changing their three-valued outcome.
pub(super) struct ConditionOptimizer;

impl ConditionOptimizer {
    /// Runs simplification passes in a loop until the condition reaches a fixed point.
    pub(super) fn optimize(condition: Condition) -> Condition {
        let mut current = condition;
        loop {
            let next = Self::simplify(current.clone());
            if next == current {
                return next;
            }
            current = next;
        }
    }

    fn simplify(condition: Condition) -> Condition {
        match condition {
            // NOT NOT x == x, also when x is unresolved.
            Condition::Not(inner) => match *inner {
                Condition::Not(x) => Self::simplify(*x),
                other => Condition::Not(Box::new(Self::simplify(other))),
            },
            Condition::All(children) => Self::simplify_group(children, true, Condition::All),
            Condition::Any(children) => Self::simplify_group(children, false, Condition::Any),
            leaf => leaf,
        }
    }

    /// Flattens nested groups of the same kind, drops repeated children and
    /// unwraps single-child groups.
    fn simplify_group(
        children: Vec<Condition>,
        is_all: bool,
        rebuild: fn(Vec<Condition>) -> Condition,
    ) -> Condition {
        let mut seen = AHashSet::new();
        let mut flat = Vec::with_capacity(children.len());
        for child in children.into_iter().map(Self::simplify) {
            let nested = match child {
                Condition::All(grandchildren) if is_all => grandchildren,
                Condition::Any(grandchildren) if !is_all => grandchildren,
                other => vec![other],
            };
            for c in nested {
                if seen.insert(c.clone()) {
                    flat.push(c);
                }
            }
        }

        if flat.len() == 1 {
            flat.remove(0)
        } else {
            rebuild(flat)
        }
    }
}
