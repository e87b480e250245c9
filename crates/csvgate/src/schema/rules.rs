//! Per-column validation rules.

use std::fmt;
use std::sync::Arc;

/// A caller-supplied check on a raw field value.
///
/// Implementations must be pure: the same input always yields the same
/// answer, with no side effects and no dependence on which rows were seen
/// before. Any `Fn(&str) -> bool + Send + Sync` closure is a predicate.
pub trait Predicate: Send + Sync {
    /// Return true if the value is acceptable.
    fn test(&self, value: &str) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn test(&self, value: &str) -> bool {
        self(value)
    }
}

/// The set of checks applied to one column.
///
/// Every check is optional; an unset check is not applied. Checks run in a
/// fixed order (see [`evaluate`](crate::validation::evaluate)) regardless of
/// the order the builder methods were called in.
#[derive(Clone, Default)]
pub struct ValidationRules {
    /// Value must be present and non-empty.
    pub required: bool,
    /// Minimum length in characters.
    pub min_length: Option<usize>,
    /// Maximum length in characters.
    pub max_length: Option<usize>,
    /// Value must look like an email address.
    pub email: bool,
    /// Value must be a 10 or 11 digit phone number.
    pub phone: bool,
    /// Lower bound on the value's leading integer.
    pub min: Option<f64>,
    /// Upper bound on the value's leading integer.
    pub max: Option<f64>,
    /// Custom predicate.
    pub callback: Option<Arc<dyn Predicate>>,
}

impl ValidationRules {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a non-empty value.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the minimum length in characters.
    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Set the maximum length in characters.
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Require an email-shaped value.
    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    /// Require a phone-shaped value.
    pub fn phone(mut self) -> Self {
        self.phone = true;
        self
    }

    /// Set the numeric lower bound.
    pub fn with_min(mut self, min: impl Into<f64>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Set the numeric upper bound.
    pub fn with_max(mut self, max: impl Into<f64>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Attach a custom predicate.
    pub fn with_callback(mut self, predicate: impl Predicate + 'static) -> Self {
        self.callback = Some(Arc::new(predicate));
        self
    }

    /// Returns true if no check is configured.
    pub fn is_empty(&self) -> bool {
        !self.required
            && self.min_length.is_none()
            && self.max_length.is_none()
            && !self.email
            && !self.phone
            && self.min.is_none()
            && self.max.is_none()
            && self.callback.is_none()
    }
}

impl fmt::Debug for ValidationRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRules")
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("callback", &self.callback.as_ref().map(|_| "<predicate>"))
            .finish()
    }
}
