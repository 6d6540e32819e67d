//! Per-tool merge: copy parameter values and missing presets from a matched source tool

use crate::domain::{Preset, Tool};
use crate::error::{Result, ToolSyncError};

/// A parameter left untouched because its value could not be copied
#[derive(Debug)]
pub struct SkippedParameter {
    pub name: String,
    pub error: ToolSyncError,
}

/// What merging one source tool into one target tool changed
#[derive(Debug, Default)]
pub struct MergeOutcome {
    /// Target parameters whose value changed
    pub parameters_changed: usize,
    /// Names of presets appended to the target
    pub presets_added: Vec<String>,
    pub skipped: Vec<SkippedParameter>,
}

impl MergeOutcome {
    pub fn changed_anything(&self) -> bool {
        self.parameters_changed > 0 || !self.presets_added.is_empty()
    }
}

fn copy_parameter(target: &mut Tool, source: &Tool, name: &str) -> Result<bool> {
    let value = source
        .value(name)
        .ok_or_else(|| ToolSyncError::ParameterNotFound(name.to_string()))?;
    target.parameters.set(name, value)
}

/// Merge `source` into `target`.
///
/// Every target parameter not listed in `reserved` takes the value of the
/// same-named source parameter. A parameter that cannot be copied is skipped
/// and reported, the rest of the merge carries on. Source presets whose name
/// is not yet on the target are appended with all of their parameters.
pub fn merge_tool(target: &mut Tool, source: &Tool, reserved: &[String]) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for name in target.parameters.names() {
        if reserved.iter().any(|r| *r == name) {
            continue;
        }
        match copy_parameter(target, source, &name) {
            Ok(true) => outcome.parameters_changed += 1,
            Ok(false) => {}
            Err(error) => outcome.skipped.push(SkippedParameter { name, error }),
        }
    }

    for source_preset in &source.presets {
        if target.has_preset(&source_preset.name) {
            continue;
        }
        let mut preset = Preset::new(source_preset.name.clone());
        for param in source_preset.parameters.iter() {
            preset.parameters.insert(param.clone());
        }
        if target.add_preset(preset) {
            outcome.presets_added.push(source_preset.name.clone());
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParameterValue;
    use crate::domain::tool::ASSEMBLY_GAUGE_LENGTH_PARAMETER;

    fn reserved() -> Vec<String> {
        vec![ASSEMBLY_GAUGE_LENGTH_PARAMETER.to_string()]
    }

    #[test]
    fn test_copies_values_and_keeps_reserved() {
        let mut target = Tool::new("doc-1")
            .with_comment("T1-6mm-Endmill")
            .with_parameter("diameter", 5.9)
            .with_parameter("flutes", 2i64)
            .with_parameter(ASSEMBLY_GAUGE_LENGTH_PARAMETER, 50.0);
        let source = Tool::new("lib-1")
            .with_comment("T1-6mm-Endmill")
            .with_parameter("diameter", 6.0)
            .with_parameter("flutes", 2i64)
            .with_parameter(ASSEMBLY_GAUGE_LENGTH_PARAMETER, 999.0);

        let outcome = merge_tool(&mut target, &source, &reserved());

        assert_eq!(outcome.parameters_changed, 1);
        assert!(outcome.skipped.is_empty());
        assert_eq!(target.value("diameter"), Some(&ParameterValue::Number(6.0)));
        assert_eq!(target.value("flutes"), Some(&ParameterValue::Integer(2)));
        assert_eq!(
            target.value(ASSEMBLY_GAUGE_LENGTH_PARAMETER),
            Some(&ParameterValue::Number(50.0))
        );
        assert_eq!(target.guid, "doc-1");
    }

    #[test]
    fn test_failures_are_skipped_not_fatal() {
        let mut target = Tool::new("doc-1")
            .with_parameter("only_on_target", 1.0)
            .with_parameter("kind_differs", 1.0)
            .with_read_only_parameter("derived", 1.0)
            .with_parameter("diameter", 5.0);
        let source = Tool::new("lib-1")
            .with_parameter("kind_differs", "one")
            .with_parameter("derived", 2.0)
            .with_parameter("diameter", 6.0);

        let outcome = merge_tool(&mut target, &source, &[]);

        assert_eq!(outcome.parameters_changed, 1);
        let skipped: Vec<&str> = outcome.skipped.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(skipped, vec!["only_on_target", "kind_differs", "derived"]);
        assert!(matches!(outcome.skipped[0].error, ToolSyncError::ParameterNotFound(_)));
        assert!(matches!(outcome.skipped[1].error, ToolSyncError::TypeMismatch { .. }));
        assert!(matches!(outcome.skipped[2].error, ToolSyncError::ReadOnlyParameter(_)));
        assert_eq!(target.value("diameter"), Some(&ParameterValue::Number(6.0)));
    }

    #[test]
    fn test_source_only_parameters_are_not_added() {
        let mut target = Tool::new("doc-1").with_parameter("diameter", 5.0);
        let source = Tool::new("lib-1")
            .with_parameter("diameter", 6.0)
            .with_parameter("tool_vendor", "Harvey");

        merge_tool(&mut target, &source, &[]);
        assert_eq!(target.parameters.len(), 1);
    }

    #[test]
    fn test_adds_missing_presets_only() {
        let mut target = Tool::new("doc-1").with_preset(Preset::new("Finishing").with_parameter("rpm", 12000.0));
        let source = Tool::new("lib-1")
            .with_preset(Preset::new("Finishing").with_parameter("rpm", 9000.0))
            .with_preset(
                Preset::new("Roughing")
                    .with_parameter("rpm", 8000.0)
                    .with_parameter("feed", 1200.0),
            );

        let outcome = merge_tool(&mut target, &source, &[]);

        assert_eq!(outcome.presets_added, vec!["Roughing"]);
        assert_eq!(target.presets.len(), 2);
        // Existing preset untouched
        assert_eq!(
            target.preset("Finishing").unwrap().parameters.value("rpm"),
            Some(&ParameterValue::Number(12000.0))
        );
        assert_eq!(
            target.preset("Roughing").unwrap().parameters,
            source.preset("Roughing").unwrap().parameters
        );
    }

    #[test]
    fn test_second_merge_is_noop() {
        let mut target = Tool::new("doc-1").with_parameter("diameter", 5.0);
        let source = Tool::new("lib-1")
            .with_parameter("diameter", 6.0)
            .with_preset(Preset::new("Roughing"));

        assert!(merge_tool(&mut target, &source, &[]).changed_anything());
        let again = merge_tool(&mut target, &source, &[]);
        assert!(!again.changed_anything());
        assert_eq!(target.presets.len(), 1);
    }
}
