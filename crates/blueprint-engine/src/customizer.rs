//! The transformation unit: a conditional, ordered build customizer.

use blueprint_core::build::Build;
use blueprint_core::help::HelpDocument;
use blueprint_core::selection::FeatureSelection;
use blueprint_util::errors::BlueprintError;

use crate::ordering;

/// One conditional transformation unit.
///
/// Constructed fresh per request, applied at most once, discarded
/// afterward. `applies` is evaluated against the immutable selection, never
/// against intermediate descriptor state; a customizer that needs to branch
/// on earlier mutations re-reads the build inside `customize`.
pub trait BuildCustomizer {
    /// Stable name used in skip/abort log entries.
    fn name(&self) -> &str;

    /// Execution slot; see [`ordering`](crate::ordering). Lower runs first.
    fn order(&self) -> i32 {
        ordering::DEFAULT
    }

    fn applies(&self, selection: &FeatureSelection) -> bool;

    fn customize(
        &self,
        build: &mut Build,
        docs: &mut HelpDocument,
        selection: &FeatureSelection,
    ) -> Result<(), BlueprintError>;
}

type Condition = Box<dyn Fn(&FeatureSelection) -> bool + Send + Sync>;
type Action =
    Box<dyn Fn(&mut Build, &mut HelpDocument, &FeatureSelection) -> Result<(), BlueprintError> + Send + Sync>;

/// Closure-backed customizer for rules that don't warrant a named type.
pub struct FnCustomizer {
    name: String,
    order: i32,
    condition: Condition,
    action: Action,
}

impl FnCustomizer {
    pub fn new<F>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&mut Build, &mut HelpDocument, &FeatureSelection) -> Result<(), BlueprintError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            order: ordering::DEFAULT,
            condition: Box::new(|_| true),
            action: Box::new(action),
        }
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Gate on a selection predicate.
    pub fn when<C>(mut self, condition: C) -> Self
    where
        C: Fn(&FeatureSelection) -> bool + Send + Sync + 'static,
    {
        self.condition = Box::new(condition);
        self
    }

    /// Gate on a single feature id being selected.
    pub fn when_feature(self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.when(move |selection| selection.has_feature(&id))
    }
}

impl BuildCustomizer for FnCustomizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn applies(&self, selection: &FeatureSelection) -> bool {
        (self.condition)(selection)
    }

    fn customize(
        &self,
        build: &mut Build,
        docs: &mut HelpDocument,
        selection: &FeatureSelection,
    ) -> Result<(), BlueprintError> {
        (self.action)(build, docs, selection)
    }
}
