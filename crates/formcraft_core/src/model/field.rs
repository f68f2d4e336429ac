//! Field domain model.
//!
//! # Responsibility
//! - Define the closed set of field kinds and their per-kind attributes.
//! - Provide structured, kind-checked partial updates (`FieldPatch`).
//!
//! # Invariants
//! - `id` and kind are fixed at construction; neither can be changed
//!   through the public API.
//! - Layout kinds (`heading`, `paragraph`, `divider`) carry no label,
//!   required flag, validation or conditional logic.
//! - Heading level is always 1, 2 or 3.

use crate::model::logic::ConditionalLogic;
use crate::model::rules::ValidationRules;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Opaque, session-unique field identifier.
pub type FieldId = String;

/// Every field kind the editor can place on a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Phone,
    Url,
    Textarea,
    Password,
    Date,
    File,
    Select,
    Radio,
    Checkbox,
    Toggle,
    Heading,
    Paragraph,
    Divider,
}

impl FieldKind {
    /// All kinds in registry order.
    pub const ALL: [FieldKind; 16] = [
        Self::Text,
        Self::Email,
        Self::Number,
        Self::Phone,
        Self::Url,
        Self::Textarea,
        Self::Password,
        Self::Date,
        Self::File,
        Self::Select,
        Self::Radio,
        Self::Checkbox,
        Self::Toggle,
        Self::Heading,
        Self::Paragraph,
        Self::Divider,
    ];

    /// Stable wire name (`type` in the schema document).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Number => "number",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::Textarea => "textarea",
            Self::Password => "password",
            Self::Date => "date",
            Self::File => "file",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Toggle => "toggle",
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::Divider => "divider",
        }
    }

    /// Returns whether the kind is a presentational block without a value.
    pub fn is_layout(self) -> bool {
        matches!(self, Self::Heading | Self::Paragraph | Self::Divider)
    }

    /// Returns whether the kind collects a value from the respondent.
    pub fn accepts_input(self) -> bool {
        !self.is_layout()
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = FieldKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| FieldKindError::Unknown(value.to_string()))
    }
}

impl Serialize for FieldKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Field kind parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKindError {
    Unknown(String),
}

impl Display for FieldKindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(value) => write!(f, "unknown field kind: {value}"),
        }
    }
}

impl Error for FieldKindError {}

/// One choice of a select, radio or checkbox field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Partial update for one option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionPatch {
    pub label: Option<String>,
    pub value: Option<String>,
}

impl OptionPatch {
    pub fn apply_to(self, option: &mut FieldOption) {
        if let Some(label) = self.label {
            option.label = label;
        }
        if let Some(value) = self.value {
            option.value = value;
        }
    }
}

/// Heading size of a `heading` layout block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1,
    #[default]
    H2,
    H3,
}

impl HeadingLevel {
    pub fn from_number(value: u64) -> Option<Self> {
        match value {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
        }
    }
}

/// Attributes shared by every value-collecting kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Control {
    pub label: String,
    pub help_text: String,
    pub required: bool,
    pub validation: ValidationRules,
    pub conditional_logic: ConditionalLogic,
}

impl Control {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = help_text.into();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_validation(mut self, validation: ValidationRules) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_logic(mut self, logic: ConditionalLogic) -> Self {
        self.conditional_logic = logic;
        self
    }
}

/// Single-line inputs: text, email, number, phone, url, password.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextInput {
    pub control: Control,
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextareaInput {
    pub control: Control,
    pub placeholder: String,
    pub rows: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileInput {
    pub control: Control,
    /// Accepted file types, e.g. `image/*,.pdf`. Empty accepts anything.
    pub accept: String,
    pub multiple: bool,
}

/// Select, radio and checkbox groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChoiceInput {
    pub control: Control,
    pub options: Vec<FieldOption>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToggleInput {
    pub control: Control,
    pub default_value: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingBlock {
    pub content: String,
    pub level: HeadingLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphBlock {
    pub content: String,
}

/// Kind-specific payload of a field; one variant per [`FieldKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldBody {
    Text(TextInput),
    Email(TextInput),
    Number(TextInput),
    Phone(TextInput),
    Url(TextInput),
    Textarea(TextareaInput),
    Password(TextInput),
    Date(Control),
    File(FileInput),
    Select(ChoiceInput),
    Radio(ChoiceInput),
    Checkbox(ChoiceInput),
    Toggle(ToggleInput),
    Heading(HeadingBlock),
    Paragraph(ParagraphBlock),
    Divider,
}

impl FieldBody {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Email(_) => FieldKind::Email,
            Self::Number(_) => FieldKind::Number,
            Self::Phone(_) => FieldKind::Phone,
            Self::Url(_) => FieldKind::Url,
            Self::Textarea(_) => FieldKind::Textarea,
            Self::Password(_) => FieldKind::Password,
            Self::Date(_) => FieldKind::Date,
            Self::File(_) => FieldKind::File,
            Self::Select(_) => FieldKind::Select,
            Self::Radio(_) => FieldKind::Radio,
            Self::Checkbox(_) => FieldKind::Checkbox,
            Self::Toggle(_) => FieldKind::Toggle,
            Self::Heading(_) => FieldKind::Heading,
            Self::Paragraph(_) => FieldKind::Paragraph,
            Self::Divider => FieldKind::Divider,
        }
    }

    pub fn control(&self) -> Option<&Control> {
        match self {
            Self::Text(input)
            | Self::Email(input)
            | Self::Number(input)
            | Self::Phone(input)
            | Self::Url(input)
            | Self::Password(input) => Some(&input.control),
            Self::Textarea(input) => Some(&input.control),
            Self::Date(control) => Some(control),
            Self::File(input) => Some(&input.control),
            Self::Select(input) | Self::Radio(input) | Self::Checkbox(input) => {
                Some(&input.control)
            }
            Self::Toggle(input) => Some(&input.control),
            Self::Heading(_) | Self::Paragraph(_) | Self::Divider => None,
        }
    }

    pub fn control_mut(&mut self) -> Option<&mut Control> {
        match self {
            Self::Text(input)
            | Self::Email(input)
            | Self::Number(input)
            | Self::Phone(input)
            | Self::Url(input)
            | Self::Password(input) => Some(&mut input.control),
            Self::Textarea(input) => Some(&mut input.control),
            Self::Date(control) => Some(control),
            Self::File(input) => Some(&mut input.control),
            Self::Select(input) | Self::Radio(input) | Self::Checkbox(input) => {
                Some(&mut input.control)
            }
            Self::Toggle(input) => Some(&mut input.control),
            Self::Heading(_) | Self::Paragraph(_) | Self::Divider => None,
        }
    }

    fn placeholder_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Text(input)
            | Self::Email(input)
            | Self::Number(input)
            | Self::Phone(input)
            | Self::Url(input)
            | Self::Password(input) => Some(&mut input.placeholder),
            Self::Textarea(input) => Some(&mut input.placeholder),
            _ => None,
        }
    }

    fn content_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Heading(block) => Some(&mut block.content),
            Self::Paragraph(block) => Some(&mut block.content),
            _ => None,
        }
    }
}

/// One configurable unit of a form.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    id: FieldId,
    body: FieldBody,
}

impl Field {
    pub fn new(id: impl Into<FieldId>, body: FieldBody) -> Self {
        Self {
            id: id.into(),
            body,
        }
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn kind(&self) -> FieldKind {
        self.body.kind()
    }

    pub fn body(&self) -> &FieldBody {
        &self.body
    }

    /// Shared control attributes; `None` for layout kinds.
    pub fn control(&self) -> Option<&Control> {
        self.body.control()
    }

    /// Mutable control attributes; the field kind itself cannot change.
    pub fn control_mut(&mut self) -> Option<&mut Control> {
        self.body.control_mut()
    }

    pub fn label(&self) -> Option<&str> {
        self.control().map(|control| control.label.as_str())
    }

    pub fn help_text(&self) -> Option<&str> {
        self.control().map(|control| control.help_text.as_str())
    }

    pub fn is_required(&self) -> bool {
        self.control().is_some_and(|control| control.required)
    }

    pub fn validation(&self) -> Option<&ValidationRules> {
        self.control().map(|control| &control.validation)
    }

    pub fn conditional_logic(&self) -> Option<&ConditionalLogic> {
        self.control().map(|control| &control.conditional_logic)
    }

    pub fn placeholder(&self) -> Option<&str> {
        match &self.body {
            FieldBody::Text(input)
            | FieldBody::Email(input)
            | FieldBody::Number(input)
            | FieldBody::Phone(input)
            | FieldBody::Url(input)
            | FieldBody::Password(input) => Some(input.placeholder.as_str()),
            FieldBody::Textarea(input) => Some(input.placeholder.as_str()),
            _ => None,
        }
    }

    pub fn options(&self) -> Option<&[FieldOption]> {
        match &self.body {
            FieldBody::Select(input) | FieldBody::Radio(input) | FieldBody::Checkbox(input) => {
                Some(input.options.as_slice())
            }
            _ => None,
        }
    }

    pub fn options_mut(&mut self) -> Option<&mut Vec<FieldOption>> {
        match &mut self.body {
            FieldBody::Select(input) | FieldBody::Radio(input) | FieldBody::Checkbox(input) => {
                Some(&mut input.options)
            }
            _ => None,
        }
    }

    /// Layout block text for `heading` and `paragraph`.
    pub fn content(&self) -> Option<&str> {
        match &self.body {
            FieldBody::Heading(block) => Some(block.content.as_str()),
            FieldBody::Paragraph(block) => Some(block.content.as_str()),
            _ => None,
        }
    }

    /// Deep copy under a new id with `" (Copy)"` appended to the label.
    pub(crate) fn duplicate_as(&self, id: FieldId) -> Self {
        let mut copy = Self {
            id,
            body: self.body.clone(),
        };
        if let Some(control) = copy.control_mut() {
            control.label = format!("{} (Copy)", control.label);
        }
        copy
    }

    /// Applies every patch attribute that is legal for this field's kind.
    ///
    /// Attributes the kind does not carry are ignored.
    pub fn apply_patch(&mut self, patch: FieldPatch) {
        if let Some(control) = self.body.control_mut() {
            if let Some(label) = patch.label {
                control.label = label;
            }
            if let Some(help_text) = patch.help_text {
                control.help_text = help_text;
            }
            if let Some(required) = patch.required {
                control.required = required;
            }
        }
        if let (Some(placeholder), Some(slot)) = (patch.placeholder, self.body.placeholder_mut()) {
            *slot = placeholder;
        }
        if let (Some(content), Some(slot)) = (patch.content, self.body.content_mut()) {
            *slot = content;
        }
        if let (Some(options), Some(slot)) = (patch.options, self.options_mut()) {
            *slot = options;
        }

        match &mut self.body {
            FieldBody::Textarea(input) => {
                if let Some(rows) = patch.rows {
                    input.rows = rows;
                }
            }
            FieldBody::File(input) => {
                if let Some(accept) = patch.accept {
                    input.accept = accept;
                }
                if let Some(multiple) = patch.multiple {
                    input.multiple = multiple;
                }
            }
            FieldBody::Toggle(input) => {
                if let Some(default_value) = patch.default_value {
                    input.default_value = default_value;
                }
            }
            FieldBody::Heading(block) => {
                if let Some(level) = patch.level {
                    block.level = level;
                }
            }
            _ => {}
        }
    }
}

/// Structured partial update for field attributes.
///
/// `None` leaves an attribute untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPatch {
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub required: Option<bool>,
    pub rows: Option<u32>,
    pub accept: Option<String>,
    pub multiple: Option<bool>,
    pub default_value: Option<bool>,
    pub content: Option<String>,
    pub level: Option<HeadingLevel>,
    pub options: Option<Vec<FieldOption>>,
}
