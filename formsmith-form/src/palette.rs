//! Field palette and JSON importer.
//!
//! The palette lists one entry per field type. The importer owns the pasted
//! JSON text, the dialog state and the status line shown after a load. A
//! success status dismisses itself (and closes the dialog) once the
//! configured delay has passed; callers drive that with [`Importer::tick`].

use std::time::{Duration, Instant};

use formsmith_fields::{parse_fields_from_json, CollisionPolicy, FieldList, FieldType};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Label of the palette control that opens the import dialog.
pub const LOAD_FROM_JSON: &str = "Load from JSON";

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter JSON data";
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON format";
pub const NO_FIELDS_MESSAGE: &str = "No valid fields found in JSON";

/// One palette button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub field_type: FieldType,
    pub label: &'static str,
}

/// Palette entries in display order.
pub fn palette() -> Vec<PaletteEntry> {
    FieldType::ALL
        .iter()
        .map(|&field_type| PaletteEntry {
            field_type,
            label: field_type.display_name(),
        })
        .collect()
}

/// Import behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// How long the success message stays up, in milliseconds
    pub success_dismiss_ms: u64,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            success_dismiss_ms: 1500,
        }
    }
}

impl ImportSettings {
    pub fn success_dismiss(&self) -> Duration {
        Duration::from_millis(self.success_dismiss_ms)
    }
}

/// Outcome of the last load attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImportStatus {
    #[default]
    Idle,
    Loaded { count: usize, at: Instant },
    Failed { message: String },
}

/// Status line as it should currently be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportIndicator {
    Success(String),
    Error(String),
}

impl ImportIndicator {
    pub fn message(&self) -> &str {
        match self {
            ImportIndicator::Success(m) | ImportIndicator::Error(m) => m,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Importer {
    input: String,
    status: ImportStatus,
    dialog_open: bool,
    dismiss_after: Duration,
    policy: CollisionPolicy,
}

impl Importer {
    pub fn new(settings: &ImportSettings, policy: CollisionPolicy) -> Self {
        Self {
            input: String::new(),
            status: ImportStatus::Idle,
            dialog_open: false,
            dismiss_after: settings.success_dismiss(),
            policy,
        }
    }

    pub fn open_dialog(&mut self) {
        self.dialog_open = true;
    }

    /// Close the dialog, discarding any status.
    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
        self.status = ImportStatus::Idle;
    }

    pub fn is_open(&self) -> bool {
        self.dialog_open
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the pasted text. Editing clears a previous error.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        if matches!(self.status, ImportStatus::Failed { .. }) {
            self.status = ImportStatus::Idle;
        }
    }

    pub fn status(&self) -> &ImportStatus {
        &self.status
    }

    /// Parse the current input.
    ///
    /// Returns the new field list on success. On failure the previous list
    /// is left alone and the status carries the reason.
    pub fn load(&mut self, now: Instant) -> Option<FieldList> {
        if self.input.trim().is_empty() {
            return self.fail(EMPTY_INPUT_MESSAGE);
        }

        let parsed = match parse_fields_from_json(&self.input) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "import failed");
                return self.fail(INVALID_JSON_MESSAGE);
            }
        };

        let list = FieldList::from_import(parsed, self.policy);
        if list.is_empty() {
            return self.fail(NO_FIELDS_MESSAGE);
        }

        info!(fields = list.len(), "fields loaded from JSON");
        self.status = ImportStatus::Loaded {
            count: list.len(),
            at: now,
        };
        Some(list)
    }

    /// Dismiss an expired success status and close the dialog with it.
    pub fn tick(&mut self, now: Instant) {
        if let ImportStatus::Loaded { at, .. } = self.status {
            if now.saturating_duration_since(at) >= self.dismiss_after {
                self.status = ImportStatus::Idle;
                self.dialog_open = false;
            }
        }
    }

    /// What to show right now, honouring the dismiss delay.
    pub fn indicator(&self, now: Instant) -> Option<ImportIndicator> {
        match &self.status {
            ImportStatus::Idle => None,
            ImportStatus::Failed { message } => Some(ImportIndicator::Error(message.clone())),
            ImportStatus::Loaded { count, at } => (now.saturating_duration_since(*at)
                < self.dismiss_after)
                .then(|| ImportIndicator::Success(format!("Successfully loaded {count} fields"))),
        }
    }

    fn fail(&mut self, message: &str) -> Option<FieldList> {
        self.status = ImportStatus::Failed {
            message: message.to_string(),
        };
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TWO_FIELDS: &str = r#"[
        {"id":"name","label":"Name","type":"text","validationType":"string","validations":[]},
        {"id":"bio","label":"Bio","type":"textarea","validationType":"string","validations":[]}
    ]"#;

    fn importer() -> Importer {
        Importer::new(&ImportSettings::default(), CollisionPolicy::Reject)
    }

    #[test]
    fn palette_lists_every_type_in_order() {
        let labels: Vec<_> = palette().iter().map(|e| e.label).collect();
        assert_eq!(
            labels,
            ["Text", "Select", "Textarea", "Radio", "Checkbox", "Upload"]
        );
    }

    #[rstest]
    #[case("", EMPTY_INPUT_MESSAGE)]
    #[case("   \n", EMPTY_INPUT_MESSAGE)]
    #[case("{not json", INVALID_JSON_MESSAGE)]
    #[case(r#"{"id":"x"}"#, INVALID_JSON_MESSAGE)]
    #[case("[]", NO_FIELDS_MESSAGE)]
    #[case(r#"[{"id":"x"}]"#, NO_FIELDS_MESSAGE)]
    fn failed_loads(#[case] input: &str, #[case] message: &str) {
        let mut importer = importer();
        importer.open_dialog();
        importer.set_input(input);
        assert!(importer.load(Instant::now()).is_none());
        assert_eq!(
            importer.indicator(Instant::now()),
            Some(ImportIndicator::Error(message.to_string()))
        );
        assert!(importer.is_open());
    }

    #[test]
    fn choice_without_options_counts_as_no_fields() {
        let mut importer = importer();
        importer.set_input(
            r#"[{"id":"plan","label":"Plan","type":"select","validationType":"string","validations":[]}]"#,
        );
        assert!(importer.load(Instant::now()).is_none());
        assert_eq!(
            importer.status(),
            &ImportStatus::Failed {
                message: NO_FIELDS_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn editing_input_clears_error() {
        let mut importer = importer();
        importer.load(Instant::now());
        assert!(matches!(importer.status(), ImportStatus::Failed { .. }));
        importer.set_input("[");
        assert_eq!(importer.status(), &ImportStatus::Idle);
    }

    #[test]
    fn success_message_dismisses_after_delay() {
        let mut importer = importer();
        importer.open_dialog();
        importer.set_input(TWO_FIELDS);
        let start = Instant::now();
        let list = importer.load(start).unwrap();
        assert_eq!(list.len(), 2);

        let shown = importer.indicator(start + Duration::from_millis(100));
        assert_eq!(
            shown.as_ref().map(ImportIndicator::message),
            Some("Successfully loaded 2 fields")
        );

        importer.tick(start + Duration::from_millis(1000));
        assert!(importer.is_open());

        let later = start + Duration::from_millis(1500);
        assert_eq!(importer.indicator(later), None);
        importer.tick(later);
        assert!(!importer.is_open());
        assert_eq!(importer.status(), &ImportStatus::Idle);
    }

    #[test]
    fn custom_dismiss_delay() {
        let settings = ImportSettings {
            success_dismiss_ms: 10,
        };
        let mut importer = Importer::new(&settings, CollisionPolicy::Reject);
        importer.set_input(TWO_FIELDS);
        let start = Instant::now();
        importer.load(start);
        assert!(importer
            .indicator(start + Duration::from_millis(10))
            .is_none());
    }

    #[test]
    fn close_dialog_clears_status() {
        let mut importer = importer();
        importer.open_dialog();
        importer.load(Instant::now());
        importer.close_dialog();
        assert!(!importer.is_open());
        assert_eq!(importer.status(), &ImportStatus::Idle);
    }
}
