//! The pipeline driver: seed from the catalog, then run every applicable
//! customizer exactly once in declared order.

use blueprint_core::build::Build;
use blueprint_core::catalog::Catalog;
use blueprint_core::help::HelpDocument;
use blueprint_core::selection::FeatureSelection;
use blueprint_util::errors::{BlueprintError, BlueprintResult};

use crate::customizer::BuildCustomizer;

/// An ordered registry of customizers, applied once per request.
///
/// Identical selection + catalog + registered set produce a structurally
/// identical descriptor: seeding iterates the selection's stable feature
/// order, customizers sort stably by (order, registration index), and all
/// containers iterate in insertion order.
#[derive(Default)]
pub struct Pipeline {
    customizers: Vec<Box<dyn BuildCustomizer>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<C: BuildCustomizer + 'static>(&mut self, customizer: C) -> &mut Self {
        self.customizers.push(Box::new(customizer));
        self
    }

    pub fn register_boxed(&mut self, customizer: Box<dyn BuildCustomizer>) -> &mut Self {
        self.customizers.push(customizer);
        self
    }

    /// Produce the resolved descriptor and help document for one request.
    ///
    /// Only an invariant violation aborts; a customizer that cannot parse
    /// or resolve an external value is logged and skipped so one broken
    /// rule never blocks generation.
    pub fn generate(
        &self,
        selection: &FeatureSelection,
        catalog: &Catalog,
    ) -> BlueprintResult<(Build, HelpDocument)> {
        let mut build = Build::new(selection.build_system());
        let mut docs = HelpDocument::new();

        self.seed(&mut build, selection, catalog)?;

        let mut schedule: Vec<(i32, usize)> = self
            .customizers
            .iter()
            .enumerate()
            .map(|(idx, c)| (c.order(), idx))
            .collect();
        schedule.sort_by_key(|&(order, idx)| (order, idx));

        for (_, idx) in schedule {
            let customizer = &self.customizers[idx];
            if !customizer.applies(selection) {
                continue;
            }
            match customizer.customize(&mut build, &mut docs, selection) {
                Ok(()) => {}
                Err(e) if e.is_fatal() => return Err(e.into()),
                Err(e) => {
                    tracing::warn!("customizer '{}' skipped: {e}", customizer.name());
                }
            }
        }

        Ok((build, docs))
    }

    /// Add one catalog-resolved dependency per selected feature, carrying
    /// BOM/repository linkage. Unknown ids and unavailable platforms are
    /// logged and skipped.
    fn seed(
        &self,
        build: &mut Build,
        selection: &FeatureSelection,
        catalog: &Catalog,
    ) -> Result<(), BlueprintError> {
        let platform = selection.platform_version();
        for feature in selection.features() {
            match catalog.resolve_dependency(feature, platform) {
                Ok(Some(dependency)) => {
                    build.add_resolved_dependency(feature, dependency, catalog, platform)?;
                }
                Ok(None) => {
                    tracing::debug!("feature '{feature}' has no catalog entry for {platform}");
                }
                Err(e) => {
                    tracing::warn!("feature '{feature}' skipped: {e}");
                }
            }
        }
        Ok(())
    }
}
