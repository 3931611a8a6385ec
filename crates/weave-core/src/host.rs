//! Hosting: owns the registry and a root provider, and turns each pass into
//! lifecycle callbacks.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::component::Component;
use crate::error::{HostError, NodeError};
use crate::identity::Identity;
use crate::inflate::{Inflate, InflateStats, Inflater};
use crate::model::{Animation, Callback, Model};
use crate::platform::{DefaultScheduler, RenderScheduler};
use crate::registry::Registry;

const DEBUG_ENV: &str = "WEAVE_DEBUG";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostConfig {
    /// Upper bound on passes in [`Host::render_until_settled`].
    pub max_passes: usize,
    /// Log the component tree after every pass.
    pub log_tree: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_passes: 16,
            log_tree: false,
        }
    }
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self {
            log_tree: std::env::var(DEBUG_ENV).is_ok(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationPhase {
    InitialMount,
    Update,
    FinalUnmount,
}

/// An animation the view layer should run for `identity` after a pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledAnimation {
    pub identity: Identity,
    pub phase: AnimationPhase,
    pub animation: Animation,
}

#[derive(Clone, Debug, Default)]
pub struct RenderReport {
    pub pass: u64,
    pub stats: InflateStats,
    pub created: Vec<Identity>,
    pub mounted: Vec<Identity>,
    pub unmounted: Vec<Identity>,
    pub removed: Vec<Identity>,
    pub animations: Vec<ScheduledAnimation>,
}

type Provider = Box<dyn Fn() -> Box<dyn Inflate>>;

pub struct Host {
    registry: Registry,
    config: HostConfig,
    provider: Provider,
    tree: Component,
    mounted: IndexMap<Identity, Rc<Model>>,
}

impl Host {
    pub fn new<F, I>(provider: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: Inflate,
    {
        Self::with_config(HostConfig::from_env(), Rc::new(DefaultScheduler), provider)
    }

    pub fn with_config<F, I>(
        config: HostConfig,
        scheduler: Rc<dyn RenderScheduler>,
        provider: F,
    ) -> Self
    where
        F: Fn() -> I + 'static,
        I: Inflate,
    {
        Self {
            registry: Registry::with_scheduler(scheduler),
            config,
            provider: Box::new(move || Box::new(provider()) as Box<dyn Inflate>),
            tree: Component::empty(),
            mounted: IndexMap::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Output of the latest pass.
    pub fn tree(&self) -> &Component {
        &self.tree
    }

    pub fn needs_render(&self) -> bool {
        self.registry.needs_render()
    }

    /// Latest descriptor of the view at `identity`.
    pub fn descriptor<V: 'static>(&self, identity: Identity) -> Result<Rc<V>, NodeError> {
        self.registry
            .descriptor(identity)
            .ok_or(NodeError::Missing { identity })?
            .downcast::<V>()
            .map_err(|_| NodeError::TypeMismatch {
                identity,
                expected: std::any::type_name::<V>(),
            })
    }

    /// Forces the node at `identity` to render on the next pass.
    pub fn invalidate(&self, identity: Identity) -> Result<(), HostError> {
        self.registry.mark_dirty(identity)?;
        Ok(())
    }

    /// Runs one pass, then the lifecycle callbacks it produced.
    pub fn render(&mut self) -> RenderReport {
        self.registry.clear_render_request();
        let root = (self.provider)();
        let (tree, outcome) = Inflater::render(&self.registry, &*root);

        let mut current: IndexMap<Identity, Rc<Model>> = IndexMap::new();
        tree.walk(&mut |component, _| {
            if let (Some(identity), Some(model)) = (component.identity(), component.model()) {
                current.insert(identity, Rc::clone(model));
            }
        });

        let mut report = RenderReport {
            pass: self.registry.pass(),
            stats: outcome.stats,
            created: outcome.created.clone(),
            removed: outcome.removed.iter().map(|node| node.identity).collect(),
            ..RenderReport::default()
        };
        let mut callbacks: Vec<Callback> = Vec::new();

        for identity in &outcome.created {
            if let Some(model) = current.get(identity) {
                callbacks.extend(model.lifecycle.did_init.iter().cloned());
            }
        }
        for (identity, model) in &self.mounted {
            if current.contains_key(identity) {
                continue;
            }
            report.unmounted.push(*identity);
            callbacks.extend(model.lifecycle.did_unmount.iter().cloned());
            schedule(
                &mut report,
                *identity,
                AnimationPhase::FinalUnmount,
                &model.animations.final_unmount,
            );
        }
        for (identity, model) in &current {
            if self.mounted.contains_key(identity) {
                schedule(
                    &mut report,
                    *identity,
                    AnimationPhase::Update,
                    &model.animations.update,
                );
            } else {
                report.mounted.push(*identity);
                callbacks.extend(model.lifecycle.will_mount.iter().cloned());
                schedule(
                    &mut report,
                    *identity,
                    AnimationPhase::InitialMount,
                    &model.animations.initial_mount,
                );
            }
        }
        for removed in &outcome.removed {
            if let Some(model) = &removed.model {
                callbacks.extend(model.lifecycle.will_dispose.iter().cloned());
            }
        }

        if self.config.log_tree {
            log::debug!("pass {} tree:\n{}", report.pass, tree.dump());
        }
        log::debug!(
            "pass {}: {} mounted, {} unmounted, {} callbacks",
            report.pass,
            report.mounted.len(),
            report.unmounted.len(),
            callbacks.len()
        );

        self.tree = tree;
        self.mounted = current;
        drop(outcome);
        for callback in callbacks {
            callback();
        }
        report
    }

    /// Renders until no further render is requested.
    pub fn render_until_settled(&mut self) -> Result<RenderReport, HostError> {
        let mut passes = 0;
        loop {
            let report = self.render();
            passes += 1;
            if !self.needs_render() {
                return Ok(report);
            }
            if passes >= self.config.max_passes {
                log::warn!("render loop still dirty after {passes} passes");
                return Err(HostError::Unsettled { passes });
            }
        }
    }
}

fn schedule(
    report: &mut RenderReport,
    identity: Identity,
    phase: AnimationPhase,
    animations: &[Animation],
) {
    report
        .animations
        .extend(animations.iter().cloned().map(|animation| ScheduledAnimation {
            identity,
            phase,
            animation,
        }));
}

#[cfg(test)]
#[path = "tests/host_tests.rs"]
mod tests;
