//! Builder session.
//!
//! The builder owns the field list and switches between previewing the form
//! and editing one new field. Every change to the list rebuilds the form
//! session, so the preview always validates against the current fields.

use std::time::Instant;

use formsmith_fields::{FieldDescriptor, FieldEditor, FieldList, FieldType, Pretty};
use tracing::{debug, info};

use crate::error::{FormError, Result};
use crate::palette::Importer;
use crate::render::{render, FormView};
use crate::session::FormSession;
use crate::settings::BuilderSettings;

/// What the builder is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Preview,
    Editing,
}

#[derive(Debug, Clone)]
pub struct Builder {
    settings: BuilderSettings,
    fields: FieldList,
    /// The field being added, while editing
    editor: Option<FieldEditor>,
    importer: Importer,
    session: FormSession,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new(BuilderSettings::default())
    }
}

impl Builder {
    pub fn new(settings: BuilderSettings) -> Self {
        let fields = FieldList::with_policy(settings.fields.collision_policy);
        let importer = Importer::new(&settings.import, settings.fields.collision_policy);
        let session = FormSession::from_list(&fields, &settings.validation);
        Self {
            settings,
            fields,
            editor: None,
            importer,
            session,
        }
    }

    pub fn settings(&self) -> &BuilderSettings {
        &self.settings
    }

    pub fn fields(&self) -> &FieldList {
        &self.fields
    }

    pub fn mode(&self) -> Mode {
        if self.editor.is_some() {
            Mode::Editing
        } else {
            Mode::Preview
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut FormSession {
        &mut self.session
    }

    pub fn importer(&self) -> &Importer {
        &self.importer
    }

    pub fn importer_mut(&mut self) -> &mut Importer {
        &mut self.importer
    }

    /// Start editing a new field of `field_type`, replacing any edit in
    /// progress.
    pub fn add_field(&mut self, field_type: FieldType) -> &mut FieldEditor {
        info!(%field_type, "editing new field");
        let editor = FieldEditor::with_settings(field_type, self.settings.editor.clone());
        self.editor.insert(editor)
    }

    pub fn editor(&self) -> Option<&FieldEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut FieldEditor> {
        self.editor.as_mut()
    }

    /// Append the field being edited.
    ///
    /// A blank label saves nothing and keeps the editor open (`Ok(None)`).
    /// A duplicate id under the reject policy is an error and also keeps the
    /// editor open so the label can be changed.
    pub fn save_field(&mut self) -> Result<Option<FieldDescriptor>> {
        let Some(editor) = &self.editor else {
            return Err(FormError::NotEditing);
        };
        let Some(field) = editor.save() else {
            debug!("blank label, nothing saved");
            return Ok(None);
        };

        self.fields.insert(field.clone())?;
        info!(id = %field.id, fields = self.fields.len(), "field added");
        debug!("saved field: {}", Pretty(&field));
        self.editor = None;
        self.rebuild();
        Ok(Some(field))
    }

    pub fn cancel_edit(&mut self) -> Result<()> {
        if !self.is_editing() {
            return Err(FormError::NotEditing);
        }
        debug!("edit cancelled");
        self.editor = None;
        Ok(())
    }

    /// Run the importer on its current input, replacing the field list on
    /// success. Returns whether anything was loaded.
    pub fn load_json(&mut self, now: Instant) -> bool {
        match self.importer.load(now) {
            Some(list) => {
                info!(fields = list.len(), "field list replaced from JSON");
                self.fields = list;
                self.rebuild();
                true
            }
            None => false,
        }
    }

    /// Set the importer's input and load it.
    pub fn import_json(&mut self, text: impl Into<String>, now: Instant) -> bool {
        self.importer.set_input(text);
        self.load_json(now)
    }

    pub fn tick(&mut self, now: Instant) {
        self.importer.tick(now);
    }

    pub fn view(&self) -> FormView {
        render(&self.session)
    }

    fn rebuild(&mut self) {
        self.session = FormSession::from_list(&self.fields, &self.settings.validation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_fields::{CollisionPolicy, FormValue, ValidationType};

    #[test]
    fn starts_in_preview_with_placeholder() {
        let builder = Builder::default();
        assert_eq!(builder.mode(), Mode::Preview);
        assert!(matches!(builder.view(), FormView::Placeholder { .. }));
    }

    #[test]
    fn add_then_save_appends_and_rebuilds() {
        let mut builder = Builder::default();
        builder.add_field(FieldType::Text).set_label("Age");
        let field = builder.save_field().unwrap().unwrap();
        assert_eq!(field.id, "age");
        assert_eq!(field.validation_type, ValidationType::Number);
        assert_eq!(builder.mode(), Mode::Preview);
        assert_eq!(builder.fields().len(), 1);
        assert!(builder.session().schema().contains("age"));
        assert_eq!(builder.view().fields().len(), 1);
    }

    #[test]
    fn blank_label_stays_in_editing() {
        let mut builder = Builder::default();
        builder.add_field(FieldType::Select);
        assert_eq!(builder.save_field().unwrap(), None);
        assert!(builder.is_editing());
        assert!(builder.fields().is_empty());
    }

    #[test]
    fn duplicate_id_is_rejected_by_default() {
        let mut builder = Builder::default();
        builder.add_field(FieldType::Text).set_label("Name");
        builder.save_field().unwrap();
        builder.add_field(FieldType::Textarea).set_label("name");
        assert!(matches!(builder.save_field(), Err(FormError::Fields(_))));
        assert!(builder.is_editing());
        assert_eq!(builder.fields().len(), 1);
    }

    #[test]
    fn overwrite_policy_replaces_field() {
        let mut settings = BuilderSettings::default();
        settings.fields.collision_policy = CollisionPolicy::Overwrite;
        let mut builder = Builder::new(settings);
        builder.add_field(FieldType::Text).set_label("Name");
        builder.save_field().unwrap();
        builder.add_field(FieldType::Textarea).set_label("name");
        builder.save_field().unwrap();
        assert_eq!(builder.fields().len(), 1);
        assert_eq!(
            builder.fields().get("name").map(|f| f.type_),
            Some(FieldType::Textarea)
        );
    }

    #[test]
    fn add_field_replaces_edit_in_progress() {
        let mut builder = Builder::default();
        builder.add_field(FieldType::Text).set_label("First");
        assert_eq!(builder.mode(), Mode::Editing);
        builder.add_field(FieldType::Radio);
        let editor = builder.editor().unwrap();
        assert_eq!(editor.field_type(), FieldType::Radio);
        assert_eq!(editor.label(), "");
    }

    #[test]
    fn cancel_leaves_editing() {
        let mut builder = Builder::default();
        assert!(matches!(builder.cancel_edit(), Err(FormError::NotEditing)));
        assert!(matches!(builder.save_field(), Err(FormError::NotEditing)));
        builder.add_field(FieldType::Radio);
        assert!(builder.editor_mut().is_some());
        builder.cancel_edit().unwrap();
        assert!(builder.editor_mut().is_none());
    }

    #[test]
    fn load_json_replaces_list_and_session() {
        let mut builder = Builder::default();
        builder.add_field(FieldType::Text).set_label("Old");
        builder.save_field().unwrap();
        builder.session_mut().change("old", FormValue::text("x")).unwrap();

        let loaded = builder.import_json(
            r#"[{"id":"email","label":"Email","type":"text","validationType":"string","validations":[]}]"#,
            Instant::now(),
        );
        assert!(loaded);
        assert!(!builder.fields().contains("old"));
        assert_eq!(builder.session().value("email"), Some(&FormValue::empty()));
    }

    #[test]
    fn failed_load_keeps_list() {
        let mut builder = Builder::default();
        builder.add_field(FieldType::Upload).set_label("CV");
        builder.save_field().unwrap();
        assert!(!builder.import_json("nope", Instant::now()));
        assert!(builder.fields().contains("cv"));
    }
}
