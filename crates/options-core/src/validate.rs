//! Authoring-time checks for option sets.
//!
//! The storefront never rejects an option set: bad dependencies fail open at
//! render time. These checks are for the authoring boundary (CLI, imports),
//! where a merchant can still fix the data.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::OptionsError;
use crate::ids::OptionId;
use crate::option::{OptionKind, OptionSet, ProductOption};

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// What is wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    DuplicateOptionId,
    DuplicateOptionName,
    DuplicateValueId,
    MissingValues,
    SelfDependency,
    MissingDependency,
    NonRadioDependency,
    UnknownShowWhenValue,
    ShowWhenWithoutDependency,
    RadioCycle,
}

impl IssueKind {
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::DuplicateOptionId
            | IssueKind::DuplicateOptionName
            | IssueKind::DuplicateValueId
            | IssueKind::SelfDependency
            | IssueKind::MissingDependency
            | IssueKind::NonRadioDependency
            | IssueKind::RadioCycle => Severity::Error,
            IssueKind::MissingValues
            | IssueKind::UnknownShowWhenValue
            | IssueKind::ShowWhenWithoutDependency => Severity::Warning,
        }
    }
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub option_id: OptionId,
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    fn new(option: &ProductOption, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            option_id: option.id.clone(),
            kind,
            severity: kind.severity(),
            message: message.into(),
        }
    }
}

/// All findings for one option set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn has(&self, option: &OptionId, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| &i.option_id == option && i.kind == kind)
    }
}

/// Check an option set.
pub fn validate(set: &OptionSet) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_uniqueness(set, &mut report);
    check_values(set, &mut report);
    check_dependencies(set, &mut report);
    check_radio_cycles(set, &mut report);
    report
}

/// Check an option set and turn errors into `OptionsError::ValidationFailed`.
pub fn ensure_valid(set: &OptionSet) -> Result<ValidationReport, OptionsError> {
    let report = validate(set);
    let errors = report.errors().count();
    if errors > 0 {
        return Err(OptionsError::ValidationFailed {
            set: set.id.to_string(),
            errors,
        });
    }
    Ok(report)
}

fn check_uniqueness(set: &OptionSet, report: &mut ValidationReport) {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for option in &set.options {
        if !ids.insert(&option.id) {
            report.issues.push(ValidationIssue::new(
                option,
                IssueKind::DuplicateOptionId,
                format!("option id '{}' is used more than once", option.id),
            ));
        }
        // Names are form field keys; a collision merges two answers.
        if !names.insert(option.name.as_str()) {
            report.issues.push(ValidationIssue::new(
                option,
                IssueKind::DuplicateOptionName,
                format!("option name '{}' is used more than once", option.name),
            ));
        }
    }
}

fn check_values(set: &OptionSet, report: &mut ValidationReport) {
    for option in &set.options {
        let takes_values = !matches!(
            option.kind,
            OptionKind::Text { .. } | OptionKind::Number { .. }
        );
        if takes_values && option.values().is_empty() {
            report.issues.push(ValidationIssue::new(
                option,
                IssueKind::MissingValues,
                format!("{} option has no values", option.type_name()),
            ));
        }

        let mut seen = HashSet::new();
        for value in option.values() {
            if !seen.insert(&value.id) {
                report.issues.push(ValidationIssue::new(
                    option,
                    IssueKind::DuplicateValueId,
                    format!("value id '{}' is used more than once", value.id),
                ));
            }
        }
    }
}

fn check_dependencies(set: &OptionSet, report: &mut ValidationReport) {
    for option in &set.options {
        let Some(dependency) = option.dependency() else {
            if option.show_when_value.is_some() {
                report.issues.push(ValidationIssue::new(
                    option,
                    IssueKind::ShowWhenWithoutDependency,
                    "showWhenValue is set but dependOnOptionId is not",
                ));
            }
            continue;
        };

        if dependency.on == option.id {
            report.issues.push(ValidationIssue::new(
                option,
                IssueKind::SelfDependency,
                "option depends on itself",
            ));
            continue;
        }

        match set.option(&dependency.on) {
            None => report.issues.push(ValidationIssue::new(
                option,
                IssueKind::MissingDependency,
                format!("depends on unknown option '{}'", dependency.on),
            )),
            Some(target) if !target.is_radio() => report.issues.push(ValidationIssue::new(
                option,
                IssueKind::NonRadioDependency,
                format!(
                    "depends on '{}', a {} option; only radios can be depended on",
                    target.id,
                    target.type_name()
                ),
            )),
            Some(target) if target.find_value(&dependency.show_when).is_none() => {
                report.issues.push(ValidationIssue::new(
                    option,
                    IssueKind::UnknownShowWhenValue,
                    format!(
                        "'{}' is not a value of '{}', the option would never show",
                        dependency.show_when, target.id
                    ),
                ))
            }
            Some(_) => {}
        }
    }
}

/// Radios may depend on radios; a chain that loops back is reported once per
/// member.
fn check_radio_cycles(set: &OptionSet, report: &mut ValidationReport) {
    let edges: HashMap<&OptionId, OptionId> = set
        .options
        .iter()
        .filter(|o| o.is_radio())
        .filter_map(|o| {
            let dependency = o.dependency()?;
            let target = set.option(&dependency.on)?;
            (target.is_radio() && target.id != o.id).then(|| (&o.id, dependency.on))
        })
        .collect();

    for option in set.options.iter().filter(|o| o.is_radio()) {
        let mut visited = HashSet::new();
        let mut current = &option.id;
        while let Some(next) = edges.get(current) {
            if next == &option.id {
                if !report.has(&option.id, IssueKind::RadioCycle) {
                    report.issues.push(ValidationIssue::new(
                        option,
                        IssueKind::RadioCycle,
                        "radio visibility dependencies form a cycle",
                    ));
                }
                break;
            }
            if !visited.insert(next) {
                break;
            }
            current = next;
        }
    }
}
