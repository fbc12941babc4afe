//! Ordered rule evaluation shared by the string validators.
//!
//! A validator resolves its options once, builds a [`RuleSet`] of
//! predicate + slot pairs and evaluates it top to bottom. The first failing
//! rule decides the verdict.

use std::fmt;
use std::sync::Arc;

use crate::error::ContractViolation;
use crate::messages::Slot;
use crate::result::ValidationResult;

/// Effective length bounds for one call, counted in Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    /// Inclusive minimum.
    pub min: usize,
    /// Inclusive maximum, `None` when unbounded.
    pub max: Option<usize>,
}

impl LengthBounds {
    /// Merge caller bounds with a validator's defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::ZeroBound`] if either supplied bound is
    /// zero, or [`ContractViolation::InvertedBounds`] if the effective minimum
    /// exceeds the effective maximum.
    pub fn resolve(
        min: Option<usize>,
        max: Option<usize>,
        default_min: usize,
        default_max: Option<usize>,
    ) -> Result<Self, ContractViolation> {
        if min == Some(0) {
            return Err(ContractViolation::ZeroBound {
                option: "minLength",
            });
        }
        if max == Some(0) {
            return Err(ContractViolation::ZeroBound {
                option: "maxLength",
            });
        }

        let min = min.unwrap_or(default_min);
        let max = max.or(default_max);
        if let Some(max) = max
            && min > max
        {
            return Err(ContractViolation::InvertedBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Whether `value` is longer than the maximum.
    #[must_use]
    pub fn exceeds_max(&self, value: &str) -> bool {
        self.max.is_some_and(|max| char_len(value) > max)
    }

    /// Whether `value` is shorter than the minimum.
    #[must_use]
    pub fn below_min(&self, value: &str) -> bool {
        char_len(value) < self.min
    }
}

/// Length in Unicode scalar values.
#[must_use]
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Empty or whitespace-only input.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

type Predicate<'a> = Box<dyn Fn(&str) -> bool + 'a>;

/// One check: the value passes when `passes` returns `true`.
pub struct Rule<'a, S> {
    name: &'static str,
    slot: S,
    passes: Predicate<'a>,
}

impl<S: fmt::Debug> fmt::Debug for Rule<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

/// An ordered list of rules, first failure wins.
#[derive(Debug)]
pub struct RuleSet<'a, S> {
    rules: Vec<Rule<'a, S>>,
}

impl<'a, S: Slot> RuleSet<'a, S> {
    /// An empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule.
    #[must_use]
    pub fn rule<F>(mut self, name: &'static str, slot: S, passes: F) -> Self
    where
        F: Fn(&str) -> bool + 'a,
    {
        self.rules.push(Rule {
            name,
            slot,
            passes: Box::new(passes),
        });
        self
    }

    /// Append a rule only when `enabled`.
    #[must_use]
    pub fn rule_if<F>(self, enabled: bool, name: &'static str, slot: S, passes: F) -> Self
    where
        F: Fn(&str) -> bool + 'a,
    {
        if enabled {
            self.rule(name, slot, passes)
        } else {
            self
        }
    }

    /// Slot of the first rule `value` fails, if any.
    #[must_use]
    pub fn first_failure(&self, value: &str) -> Option<S> {
        let failed = self.rules.iter().find(|rule| !(rule.passes)(value))?;
        tracing::debug!(rule = failed.name, "validation rule failed");
        Some(failed.slot)
    }

    /// Names of the rules in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run the rules, then the optional custom check.
    ///
    /// `resolve` turns the failing slot into its message. The custom check only
    /// runs when every built-in rule passes, and its verdict is returned as-is.
    #[must_use]
    pub fn evaluate(
        &self,
        value: &str,
        custom: Option<&CustomCheck>,
        resolve: impl FnOnce(S) -> String,
    ) -> ValidationResult {
        if let Some(slot) = self.first_failure(value) {
            return ValidationResult::invalid(resolve(slot));
        }
        custom.map_or(ValidationResult::Valid, |check| check.run(value))
    }
}

impl<S: Slot> Default for RuleSet<'_, S> {
    fn default() -> Self {
        Self::new()
    }
}

/// A caller-supplied final rule.
#[derive(Clone)]
pub struct CustomCheck(Arc<dyn Fn(&str) -> ValidationResult + Send + Sync>);

impl CustomCheck {
    /// Wrap a closure.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&str) -> ValidationResult + Send + Sync + 'static,
    {
        Self(Arc::new(check))
    }

    /// Run the check against `value`.
    #[must_use]
    pub fn run(&self, value: &str) -> ValidationResult {
        (self.0)(value)
    }
}

impl fmt::Debug for CustomCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomCheck").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestSlot {
        Empty,
        Digits,
        Long,
    }

    impl Slot for TestSlot {
        const ALL: &'static [Self] = &[Self::Empty, Self::Digits, Self::Long];

        fn index(self) -> usize {
            self as usize
        }
    }

    fn rules() -> RuleSet<'static, TestSlot> {
        RuleSet::new()
            .rule("not_blank", TestSlot::Empty, |v| !is_blank(v))
            .rule("no_digits", TestSlot::Digits, |v| {
                !v.chars().any(|c| c.is_ascii_digit())
            })
            .rule("short", TestSlot::Long, |v| char_len(v) <= 5)
    }

    // ---- LengthBounds ----

    #[test]
    fn test_bounds_use_defaults() {
        let bounds = LengthBounds::resolve(None, None, 1, Some(20)).unwrap();
        assert_eq!(bounds, LengthBounds { min: 1, max: Some(20) });
    }

    #[test]
    fn test_bounds_caller_wins() {
        let bounds = LengthBounds::resolve(Some(3), Some(25), 1, None).unwrap();
        assert_eq!(bounds, LengthBounds { min: 3, max: Some(25) });
    }

    #[test]
    fn test_bounds_reject_zero() {
        let err = LengthBounds::resolve(Some(0), None, 1, None).unwrap_err();
        assert_eq!(
            err,
            ContractViolation::ZeroBound {
                option: "minLength"
            }
        );
        let err = LengthBounds::resolve(None, Some(0), 1, None).unwrap_err();
        assert_eq!(
            err,
            ContractViolation::ZeroBound {
                option: "maxLength"
            }
        );
    }

    #[test]
    fn test_bounds_reject_inverted() {
        let err = LengthBounds::resolve(Some(25), Some(3), 1, None).unwrap_err();
        assert_eq!(err, ContractViolation::InvertedBounds { min: 25, max: 3 });
    }

    #[test]
    fn test_bounds_inverted_against_default_max() {
        let err = LengthBounds::resolve(Some(30), None, 1, Some(20)).unwrap_err();
        assert_eq!(err, ContractViolation::InvertedBounds { min: 30, max: 20 });
    }

    #[test]
    fn test_bounds_count_chars_not_bytes() {
        let bounds = LengthBounds { min: 1, max: Some(4) };
        assert!(!bounds.exceeds_max("\u{e9}t\u{e9}s"));
        assert!(bounds.exceeds_max("\u{e9}t\u{e9}s!"));
    }

    // ---- RuleSet ----

    #[test]
    fn test_first_failure_wins() {
        let rules = rules();
        // Fails both "no_digits" and "short"; the earlier rule decides.
        assert_eq!(rules.first_failure("abc123"), Some(TestSlot::Digits));
        assert_eq!(rules.first_failure("abcdefg"), Some(TestSlot::Long));
        assert_eq!(rules.first_failure("  "), Some(TestSlot::Empty));
        assert_eq!(rules.first_failure("abc"), None);
    }

    #[test]
    fn test_rule_if_skips_disabled_rules() {
        let rules = RuleSet::<TestSlot>::new()
            .rule_if(false, "never", TestSlot::Long, |_| false)
            .rule_if(true, "always", TestSlot::Empty, |_| true);
        assert_eq!(rules.names().collect::<Vec<_>>(), vec!["always"]);
        assert_eq!(rules.first_failure("x"), None);
    }

    #[test]
    fn test_custom_runs_after_builtin_rules() {
        let rules = rules();
        let custom = CustomCheck::new(|v| {
            if v == "abc" {
                ValidationResult::Valid
            } else {
                ValidationResult::invalid("custom rejected")
            }
        });

        let result = rules.evaluate("abd", Some(&custom), |_| "builtin".to_owned());
        assert_eq!(result, ValidationResult::invalid("custom rejected"));

        let result = rules.evaluate("abc", Some(&custom), |_| "builtin".to_owned());
        assert_eq!(result, ValidationResult::Valid);

        // A built-in failure short-circuits before the custom check.
        let result = rules.evaluate("a1", Some(&custom), |_| "builtin".to_owned());
        assert_eq!(result, ValidationResult::invalid("builtin"));
    }
}
