//! Positional and keyword argument constraint evaluation (§4.3).

use std::collections::HashMap;

use codepathfinder_common::{Argument, ArgumentConstraint, PositionKey};

use crate::pattern;

/// Evaluate one positional constraint against a call site's arguments.
fn evaluate_positional(args: &[Argument], raw_key: &str, constraint: &ArgumentConstraint) -> bool {
    let Some(key) = PositionKey::parse(raw_key) else {
        return false;
    };
    match key {
        PositionKey::Index(n) => match args.get(n) {
            Some(arg) => pattern::match_value(&arg.value, &constraint.value, constraint.wildcard_enabled),
            None => false,
        },
        PositionKey::TupleElement { position, index } => {
            let Some(arg) = args.get(position) else {
                return false;
            };
            match pattern::extract(&arg.value, index) {
                Some(text) => pattern::match_value(&text, &constraint.value, constraint.wildcard_enabled),
                None => false,
            }
        }
    }
}

/// Evaluate one keyword constraint against a call site's arguments.
fn evaluate_keyword(args: &[Argument], name: &str, constraint: &ArgumentConstraint) -> bool {
    args.iter()
        .find_map(|arg| arg.as_keyword().filter(|(k, _)| *k == name))
        .is_some_and(|(_, value)| pattern::match_value(value, &constraint.value, constraint.wildcard_enabled))
}

/// Evaluate all positional and keyword constraints against a call site's
/// arguments. Every constraint must pass (logical AND); a matcher with no
/// constraints at all accepts any argument list.
pub fn evaluate(
    args: &[Argument],
    positional: &HashMap<String, ArgumentConstraint>,
    keyword: &HashMap<String, ArgumentConstraint>,
) -> bool {
    positional
        .iter()
        .all(|(key, constraint)| evaluate_positional(args, key, constraint))
        && keyword
            .iter()
            .all(|(name, constraint)| evaluate_keyword(args, name, constraint))
}
