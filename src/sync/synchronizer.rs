//! ToolLibrarySynchronizer: match target tools to source tools and merge them

use tracing::{debug, error, info, warn};

use super::merge::merge_tool;
use crate::config::{Config, CorrelationConfig};
use crate::correlation::Correlator;
use crate::domain::tool::ASSEMBLY_GAUGE_LENGTH_PARAMETER;
use crate::domain::{
    AmbiguousMatch, CommitFailure, CommitPolicy, ParameterFailure, PresetAddition, SyncDirection, SyncReport,
};
use crate::error::Result;
use crate::library::{ToolLibrarySink, ToolLibrarySource};

/// Settings of a synchronizer
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub correlation: CorrelationConfig,
    /// Parameters never overwritten on the target
    pub reserved_parameters: Vec<String>,
}

impl SyncOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            correlation: config.correlation.clone(),
            reserved_parameters: config.sync.reserved_parameters.clone(),
        }
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            correlation: CorrelationConfig::default(),
            reserved_parameters: vec![ASSEMBLY_GAUGE_LENGTH_PARAMETER.to_string()],
        }
    }
}

/// Progress notifications emitted during a pass
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    ToolSynced { key: String, parameters_changed: usize },
    PresetAdded { key: String, preset: String },
    ToolCommitted { key: String },
    LibraryCommitted { tools: usize },
}

type Observer<'a> = Box<dyn FnMut(&SyncEvent) + 'a>;

/// Copies parameters and presets from a source library onto matching tools
/// of a target library.
pub struct ToolLibrarySynchronizer<'a> {
    correlator: Correlator,
    reserved_parameters: Vec<String>,
    observer: Option<Observer<'a>>,
}

impl<'a> ToolLibrarySynchronizer<'a> {
    pub fn new(options: SyncOptions) -> Self {
        Self {
            correlator: Correlator::from_config(&options.correlation),
            reserved_parameters: options.reserved_parameters,
            observer: None,
        }
    }

    /// Attach a closure called for every [`SyncEvent`] of later passes.
    pub fn with_observer(mut self, observer: impl FnMut(&SyncEvent) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    fn emit(&mut self, event: SyncEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&event);
        }
    }

    /// Run one synchronization pass from `source` into `target`.
    ///
    /// Each target tool is matched against the source in source order and the
    /// first match wins. Pull passes commit every merged tool right away, push
    /// passes commit the whole target once at the end. Failing to load either
    /// library or to commit the batched library is an error; per-parameter
    /// and per-tool commit failures are recorded in the report instead.
    pub fn sync(
        &mut self,
        source: &dyn ToolLibrarySource,
        target: &mut dyn ToolLibrarySink,
        direction: SyncDirection,
    ) -> Result<SyncReport> {
        let source_library = source.load()?;
        let mut target_library = target.load()?;
        let policy = direction.commit_policy();
        let mut report = SyncReport::new(direction);

        info!(
            "Syncing {} ({} tools) -> {} ({} tools), {} by {}",
            source.describe(),
            source_library.len(),
            target.describe(),
            target_library.len(),
            direction,
            self.correlator.mode()
        );

        let source_keys: Vec<Option<String>> = source_library.iter().map(|t| self.correlator.key(t)).collect();

        for target_tool in target_library.tools.iter_mut() {
            let Some(key) = self.correlator.key(target_tool) else {
                debug!(guid = %target_tool.guid, "{} has no correlation key, skipping", target_tool.label());
                continue;
            };

            let mut candidates = source_library
                .tools
                .iter()
                .zip(&source_keys)
                .filter(|(_, source_key)| {
                    source_key
                        .as_deref()
                        .is_some_and(|source_key| self.correlator.key_matches(&key, source_key))
                })
                .map(|(tool, _)| tool);

            let Some(source_tool) = candidates.next() else {
                debug!(tool = %key, "No matching source tool");
                continue;
            };
            let ignored: Vec<String> = candidates.map(|t| t.guid.clone()).collect();

            if !ignored.is_empty() {
                warn!(
                    tool = %key,
                    "{} matched {} source tools, using {}",
                    key,
                    ignored.len() + 1,
                    source_tool.guid
                );
                report.ambiguous_matches.push(AmbiguousMatch {
                    tool: key.clone(),
                    used: source_tool.guid.clone(),
                    ignored,
                });
            }

            let outcome = merge_tool(target_tool, source_tool, &self.reserved_parameters);

            for skipped in &outcome.skipped {
                debug!(tool = %key, parameter = %skipped.name, "Parameter not copied: {}", skipped.error);
                report.parameter_failures.push(ParameterFailure {
                    tool: key.clone(),
                    parameter: skipped.name.clone(),
                    reason: skipped.error.to_string(),
                });
            }

            if outcome.changed_anything() {
                info!(tool = %key, changed = outcome.parameters_changed, "{} parameters synced", key);
            } else {
                debug!(tool = %key, "{} already in sync", key);
            }
            report.parameters_changed += outcome.parameters_changed;
            report.tools_updated.push(key.clone());
            self.emit(SyncEvent::ToolSynced {
                key: key.clone(),
                parameters_changed: outcome.parameters_changed,
            });

            for preset in &outcome.presets_added {
                info!(tool = %key, preset = %preset, "{} added to {}", preset, key);
                report.presets_added.push(PresetAddition {
                    tool: key.clone(),
                    preset: preset.clone(),
                });
                self.emit(SyncEvent::PresetAdded {
                    key: key.clone(),
                    preset: preset.clone(),
                });
            }

            if policy == CommitPolicy::PerTool {
                match target.commit_tool(target_tool) {
                    Ok(()) => self.emit(SyncEvent::ToolCommitted { key: key.clone() }),
                    Err(e) => {
                        error!(tool = %key, "Failed to commit {}: {}", key, e);
                        report.commit_failures.push(CommitFailure {
                            tool: key.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        if policy == CommitPolicy::Batched {
            target.commit_library(&target_library)?;
            self.emit(SyncEvent::LibraryCommitted {
                tools: target_library.len(),
            });
        }

        info!(
            "{} tools updated, {} parameter values changed, {} presets added",
            report.tools_updated_count(),
            report.parameters_changed,
            report.presets_added.len()
        );
        Ok(report)
    }
}
