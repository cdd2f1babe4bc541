//! Conditional visibility resolution.
//!
//! An option with `dependOnOptionId` is shown only while the referenced radio
//! has `showWhenValue` selected. References that cannot be resolved to a
//! sibling radio fail open: the option is always shown. A self reference is
//! treated as no dependency at all. Both cases are logged once, when the
//! resolver is built.
//!
//! Only direct dependencies are evaluated; a radio depending on another radio
//! is checked at authoring time by [`crate::validate`]. A hidden radio keeps
//! its selection and its dependents keep following it. The browser runtime
//! does the same: hiding a radio does not re-evaluate the options that
//! depend on it.

use std::collections::HashMap;

use options_observability::StructuredLogger;

use crate::ids::OptionId;
use crate::option::{Dependency, ProductOption};
use crate::selection::Selections;

/// How an option's visibility is decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// No dependency declared.
    Unconditional,
    /// Shown while the radio `on` has `show_when` selected.
    OnRadio(Dependency),
    /// Declared dependency on itself; ignored.
    SelfReference,
    /// Target missing or not a radio; ignored.
    Unresolved(Dependency),
}

impl Gate {
    /// The governing dependency when visibility can actually change.
    pub fn dependency(&self) -> Option<&Dependency> {
        match self {
            Gate::OnRadio(dependency) => Some(dependency),
            _ => None,
        }
    }
}

/// Currently selected label of every radio group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RadioState {
    selected: HashMap<OptionId, String>,
}

impl RadioState {
    /// Every radio pre-selected on its first declared value.
    pub fn defaults(options: &[ProductOption]) -> Self {
        let selected = options
            .iter()
            .filter(|o| o.is_radio())
            .filter_map(|o| Some((o.id.clone(), o.default_value()?.label.clone())))
            .collect();
        Self { selected }
    }

    /// Defaults overridden by submitted form values, keyed by option name.
    pub fn from_selections(options: &[ProductOption], selections: &Selections) -> Self {
        let mut state = Self::defaults(options);
        for radio in options.iter().filter(|o| o.is_radio()) {
            if let Some(label) = selections.get(&radio.name) {
                state.select(radio, label);
            }
        }
        state
    }

    /// Selected label of `radio`.
    pub fn selected(&self, radio: &OptionId) -> Option<&str> {
        self.selected.get(radio).map(String::as_str)
    }

    /// Select `label` on `radio`. Labels the radio does not declare are
    /// ignored and the previous selection stays.
    pub fn select(&mut self, radio: &ProductOption, label: &str) -> bool {
        if !radio.is_radio() || radio.find_value(label).is_none() {
            return false;
        }
        self.selected.insert(radio.id.clone(), label.to_string());
        true
    }
}

/// Visibility of one option after an evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityChange {
    pub option_id: OptionId,
    pub visible: bool,
}

/// Resolves show/hide for the options of one option set.
#[derive(Debug, Clone)]
pub struct VisibilityResolver<'a> {
    options: &'a [ProductOption],
    gates: Vec<Gate>,
}

impl<'a> VisibilityResolver<'a> {
    /// Classify every option's dependency, logging the ones that are ignored.
    pub fn new(options: &'a [ProductOption], logger: &StructuredLogger) -> Self {
        let gates = options
            .iter()
            .map(|option| classify(option, options, logger))
            .collect();
        Self { options, gates }
    }

    pub fn options(&self) -> &'a [ProductOption] {
        self.options
    }

    /// Gate of the option with `id`; unknown ids are unconditional.
    pub fn gate(&self, id: &OptionId) -> &Gate {
        self.options
            .iter()
            .position(|o| &o.id == id)
            .map(|i| &self.gates[i])
            .unwrap_or(&Gate::Unconditional)
    }

    /// Whether the option with `id` is visible under `state`.
    pub fn is_visible(&self, id: &OptionId, state: &RadioState) -> bool {
        match self.gate(id) {
            Gate::OnRadio(dependency) => {
                state.selected(&dependency.on) == Some(dependency.show_when.as_str())
            }
            Gate::Unconditional | Gate::SelfReference | Gate::Unresolved(_) => true,
        }
    }

    /// Visibility of every option, in option order.
    pub fn evaluate(&self, state: &RadioState) -> Vec<VisibilityChange> {
        self.options
            .iter()
            .map(|o| VisibilityChange {
                option_id: o.id.clone(),
                visible: self.is_visible(&o.id, state),
            })
            .collect()
    }

    /// Options whose visibility is governed by `radio`.
    pub fn dependents_of<'s>(
        &'s self,
        radio: &'s OptionId,
    ) -> impl Iterator<Item = &'a ProductOption> + 's {
        self.options
            .iter()
            .zip(&self.gates)
            .filter(move |(_, gate)| matches!(gate, Gate::OnRadio(d) if &d.on == radio))
            .map(|(option, _)| option)
    }

    /// Apply a radio change and re-evaluate only that radio's dependents.
    ///
    /// Returns nothing when the change is ignored (unknown radio or label).
    pub fn on_radio_change(
        &self,
        state: &mut RadioState,
        radio_id: &OptionId,
        label: &str,
    ) -> Vec<VisibilityChange> {
        let Some(radio) = self.options.iter().find(|o| &o.id == radio_id) else {
            return Vec::new();
        };
        if !state.select(radio, label) {
            return Vec::new();
        }
        self.dependents_of(radio_id)
            .map(|o| VisibilityChange {
                option_id: o.id.clone(),
                visible: self.is_visible(&o.id, state),
            })
            .collect()
    }
}

fn classify(option: &ProductOption, siblings: &[ProductOption], logger: &StructuredLogger) -> Gate {
    let Some(dependency) = option.dependency() else {
        return Gate::Unconditional;
    };

    if dependency.on == option.id {
        logger
            .warn_builder("option depends on itself, showing unconditionally")
            .field("option_id", option.id.as_str())
            .emit();
        return Gate::SelfReference;
    }

    match siblings.iter().find(|o| o.id == dependency.on) {
        Some(target) if target.is_radio() => Gate::OnRadio(dependency),
        target => {
            let reason = match target {
                Some(t) => format!("target is a {} option", t.type_name()),
                None => "target not found".to_string(),
            };
            logger
                .warn_builder("unresolved dependency, showing unconditionally")
                .field("option_id", option.id.as_str())
                .field("depend_on", dependency.on.as_str())
                .field("reason", reason)
                .emit();
            Gate::Unresolved(dependency)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{OptionKind, OptionValue};
    use options_observability::LogLevel;

    fn radio(id: &str, name: &str, labels: &[&str]) -> ProductOption {
        ProductOption::new(
            id,
            name,
            OptionKind::Radio {
                values: labels
                    .iter()
                    .enumerate()
                    .map(|(i, l)| OptionValue::new(format!("{}-{}", id, i), *l))
                    .collect(),
            },
        )
    }

    fn text(id: &str) -> ProductOption {
        ProductOption::new(id, id, OptionKind::Text { price: None })
    }

    fn options() -> Vec<ProductOption> {
        vec![
            radio("personalize", "Personalize", &["No", "Yes"]),
            radio("wrap", "Gift wrap", &["Yes", "No"]),
            text("engraving").shown_when("personalize", "Yes"),
            text("note").shown_when("wrap", "Yes"),
            text("always"),
        ]
    }

    #[test]
    fn test_initial_evaluation_uses_first_value() {
        let options = options();
        let resolver = VisibilityResolver::new(&options, &StructuredLogger::quiet());
        let state = RadioState::defaults(&options);

        assert!(!resolver.is_visible(&"engraving".into(), &state));
        assert!(resolver.is_visible(&"note".into(), &state));
        assert!(resolver.is_visible(&"always".into(), &state));
    }

    #[test]
    fn test_change_reevaluates_only_dependents() {
        let options = options();
        let resolver = VisibilityResolver::new(&options, &StructuredLogger::quiet());
        let mut state = RadioState::defaults(&options);
        let radio_id = OptionId::new("personalize");

        let changes = resolver.on_radio_change(&mut state, &radio_id, "Yes");
        assert_eq!(
            changes,
            vec![VisibilityChange {
                option_id: "engraving".into(),
                visible: true
            }]
        );
        assert_eq!(state.selected(&radio_id), Some("Yes"));
    }

    #[test]
    fn test_hidden_radio_still_governs_dependents() {
        let options = vec![
            radio("personalize", "Personalize", &["No", "Yes"]),
            radio("style", "Style", &["Script", "Block"]).shown_when("personalize", "Yes"),
            text("script-note").shown_when("style", "Script"),
        ];
        let resolver = VisibilityResolver::new(&options, &StructuredLogger::quiet());
        let state = RadioState::defaults(&options);

        assert!(!resolver.is_visible(&"style".into(), &state));
        assert!(resolver.is_visible(&"script-note".into(), &state));
    }

    #[test]
    fn test_unknown_label_is_ignored() {
        let options = options();
        let resolver = VisibilityResolver::new(&options, &StructuredLogger::quiet());
        let mut state = RadioState::defaults(&options);
        let radio_id = OptionId::new("personalize");

        assert!(resolver.on_radio_change(&mut state, &radio_id, "Maybe").is_empty());
        assert_eq!(state.selected(&radio_id), Some("No"));
    }

    #[test]
    fn test_match_is_exact() {
        let options = options();
        let resolver = VisibilityResolver::new(&options, &StructuredLogger::quiet());
        let mut state = RadioState::defaults(&options);
        let radio_id = OptionId::new("personalize");
        let _ = resolver.on_radio_change(&mut state, &radio_id, "Yes");

        let mut lower = options.clone();
        lower[2] = text("engraving").shown_when("personalize", "yes");
        let resolver = VisibilityResolver::new(&lower, &StructuredLogger::quiet());
        assert!(!resolver.is_visible(&"engraving".into(), &state));
    }

    #[test]
    fn test_missing_target_fails_open() {
        let options = vec![text("orphan").shown_when("ghost", "Yes")];
        let (logger, capture) = StructuredLogger::capturing();
        let resolver = VisibilityResolver::new(&options, &logger);

        assert!(resolver.is_visible(&"orphan".into(), &RadioState::default()));
        assert!(matches!(resolver.gate(&"orphan".into()), Gate::Unresolved(_)));
        assert_eq!(capture.at_level(LogLevel::Warn).len(), 1);
    }

    #[test]
    fn test_non_radio_target_fails_open() {
        let options = vec![text("source"), text("dependent").shown_when("source", "x")];
        let resolver = VisibilityResolver::new(&options, &StructuredLogger::quiet());
        let state = RadioState::defaults(&options);
        assert!(resolver.is_visible(&"dependent".into(), &state));
    }

    #[test]
    fn test_self_dependency_is_unconditional_and_logged() {
        let options = vec![radio("loop", "Loop", &["A", "B"]).shown_when("loop", "B")];
        let (logger, capture) = StructuredLogger::capturing();
        let resolver = VisibilityResolver::new(&options, &logger);
        let state = RadioState::defaults(&options);

        assert_eq!(resolver.gate(&"loop".into()), &Gate::SelfReference);
        assert!(resolver.is_visible(&"loop".into(), &state));
        let warnings = capture.at_level(LogLevel::Warn);
        assert_eq!(warnings[0].field("option_id"), Some("loop"));
    }

    #[test]
    fn test_state_from_selections() {
        let options = options();
        let selections = Selections::new()
            .select("Personalize", "Yes")
            .select("Gift wrap", "Sometimes");
        let state = RadioState::from_selections(&options, &selections);
        assert_eq!(state.selected(&"personalize".into()), Some("Yes"));
        assert_eq!(state.selected(&"wrap".into()), Some("Yes"));
    }
}
