//! Implicit dependency rules: "trigger features present → mutate build and
//! docs", declared as data instead of one customizer type per vendor.

use blueprint_core::build::Build;
use blueprint_core::dependency::Dependency;
use blueprint_core::help::HelpDocument;
use blueprint_core::selection::FeatureSelection;
use blueprint_util::errors::BlueprintError;

use crate::customizer::BuildCustomizer;
use crate::ordering;

/// A read-only view of the build's dependencies taken before any rule in a
/// pass fires. Every trigger in the pass evaluates against this snapshot,
/// so rules cannot observe each other's output within one pass.
#[derive(Debug, Clone)]
pub struct DependencySnapshot {
    entries: Vec<(String, String)>,
}

impl DependencySnapshot {
    fn of(build: &Build) -> Self {
        Self {
            entries: build
                .dependencies()
                .iter()
                .map(|(id, dep)| (id.to_string(), dep.group_id.clone()))
                .collect(),
        }
    }

    pub fn has(&self, id: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == id)
    }

    /// Whether any dependency in the snapshot comes from the given group.
    pub fn any_with_group(&self, group_id: &str) -> bool {
        self.entries.iter().any(|(_, g)| g == group_id)
    }
}

/// What a custom trigger predicate can see: the original selection and the
/// pre-pass dependency snapshot.
pub struct RuleScope<'a> {
    pub selection: &'a FeatureSelection,
    pub dependencies: &'a DependencySnapshot,
}

type Predicate = Box<dyn Fn(&RuleScope<'_>) -> bool + Send + Sync>;
type BuildAction = Box<dyn Fn(&mut Build) -> Result<(), BlueprintError> + Send + Sync>;
type DocAction = Box<dyn Fn(&mut HelpDocument) + Send + Sync>;

enum Trigger {
    AllOf(Vec<String>),
    AnyOf(Vec<String>),
    Custom(Predicate),
}

/// One declarative rule: trigger, build mutation, optional doc mutation.
///
/// The doc mutation runs only if the build mutation fired, keeping
/// generated docs and build content consistent by construction.
pub struct ImplicitRule {
    name: String,
    trigger: Trigger,
    build_action: Option<BuildAction>,
    doc_action: Option<DocAction>,
}

impl ImplicitRule {
    /// Trigger when every listed feature id is selected.
    pub fn match_all<I, S>(name: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            trigger: Trigger::AllOf(ids.into_iter().map(Into::into).collect()),
            build_action: None,
            doc_action: None,
        }
    }

    /// Trigger when at least one listed feature id is selected.
    pub fn match_any<I, S>(name: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            trigger: Trigger::AnyOf(ids.into_iter().map(Into::into).collect()),
            build_action: None,
            doc_action: None,
        }
    }

    /// Trigger on an arbitrary predicate over selection + snapshot, for
    /// rules like "any dependency from this vendor group".
    pub fn match_when<P>(name: impl Into<String>, predicate: P) -> Self
    where
        P: Fn(&RuleScope<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            trigger: Trigger::Custom(Box::new(predicate)),
            build_action: None,
            doc_action: None,
        }
    }

    pub fn mutate_build<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut Build) -> Result<(), BlueprintError> + Send + Sync + 'static,
    {
        self.build_action = Some(Box::new(action));
        self
    }

    pub fn mutate_docs<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut HelpDocument) + Send + Sync + 'static,
    {
        self.doc_action = Some(Box::new(action));
        self
    }

    /// Declarative shorthand: the build mutation adds one dependency.
    pub fn adds_dependency(self, id: impl Into<String>, dependency: Dependency) -> Self {
        let id = id.into();
        self.mutate_build(move |build| build.dependencies_mut().add(id.clone(), dependency.clone()))
    }

    /// Declarative shorthand: the doc mutation adds one reference link.
    pub fn adds_link(self, href: impl Into<String>, description: impl Into<String>) -> Self {
        let href = href.into();
        let description = description.into();
        self.mutate_docs(move |docs| docs.add_link(href.clone(), description.clone()))
    }

    fn matches(&self, scope: &RuleScope<'_>) -> bool {
        match &self.trigger {
            Trigger::AllOf(ids) => ids.iter().all(|id| scope.selection.has_feature(id)),
            Trigger::AnyOf(ids) => ids.iter().any(|id| scope.selection.has_feature(id)),
            Trigger::Custom(predicate) => predicate(scope),
        }
    }
}

/// An ordered set of implicit rules evaluated in one pass.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<ImplicitRule>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, rule: ImplicitRule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every rule once, in registration order.
    ///
    /// All triggers are matched against the original selection and a
    /// dependency snapshot taken before any rule fires; a rule's mutations
    /// are invisible to every other rule in the same pass. There is no
    /// fixed-point cascade for chained rules.
    pub fn apply(
        &self,
        build: &mut Build,
        docs: &mut HelpDocument,
        selection: &FeatureSelection,
    ) -> Result<(), BlueprintError> {
        let snapshot = DependencySnapshot::of(build);
        let scope = RuleScope {
            selection,
            dependencies: &snapshot,
        };
        let fired: Vec<usize> = self
            .rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.matches(&scope))
            .map(|(idx, _)| idx)
            .collect();

        for idx in fired {
            let rule = &self.rules[idx];
            if let Some(ref action) = rule.build_action {
                match action(build) {
                    Ok(()) => {}
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => {
                        tracing::warn!("rule '{}' skipped: {e}", rule.name);
                        continue;
                    }
                }
            }
            if let Some(ref doc_action) = rule.doc_action {
                doc_action(docs);
            }
        }
        Ok(())
    }
}

/// Embeds a rule registry into the pipeline at the implicit-rules slot.
pub struct RuleRegistryCustomizer {
    name: String,
    order: i32,
    registry: RuleRegistry,
}

impl RuleRegistryCustomizer {
    pub fn new(name: impl Into<String>, registry: RuleRegistry) -> Self {
        Self {
            name: name.into(),
            order: ordering::IMPLICIT_RULES,
            registry,
        }
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }
}

impl BuildCustomizer for RuleRegistryCustomizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn applies(&self, _selection: &FeatureSelection) -> bool {
        // Rules carry their own triggers.
        true
    }

    fn customize(
        &self,
        build: &mut Build,
        docs: &mut HelpDocument,
        selection: &FeatureSelection,
    ) -> Result<(), BlueprintError> {
        self.registry.apply(build, docs, selection)
    }
}
