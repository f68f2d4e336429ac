//! Static catalog of field kinds.
//!
//! # Responsibility
//! - Describe each kind for palette collaborators (label, icon, category).
//! - Build fresh fields with per-kind default attributes.
//!
//! # Invariants
//! - Every created field gets a new id, empty validation and disabled
//!   conditional logic.
//! - Defaults are rebuilt on every call; created fields never share state.
//! - Category display order is `inputs=1, choice=2, layout=3`.

use crate::model::field::{
    ChoiceInput, Control, Field, FieldBody, FieldKind, FieldOption, FileInput, HeadingBlock,
    HeadingLevel, ParagraphBlock, TextInput, TextareaInput, ToggleInput,
};
use crate::store::ids::IdSource;
use log::debug;

/// Palette grouping of field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldCategory {
    Inputs,
    Choice,
    Layout,
}

impl FieldCategory {
    pub const ALL: [FieldCategory; 3] = [Self::Inputs, Self::Choice, Self::Layout];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inputs => "inputs",
            Self::Choice => "choice",
            Self::Layout => "layout",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Inputs => "Input Fields",
            Self::Choice => "Choice Fields",
            Self::Layout => "Layout",
        }
    }

    /// Display order; lower sorts first.
    pub fn order(self) -> u8 {
        match self {
            Self::Inputs => 1,
            Self::Choice => 2,
            Self::Layout => 3,
        }
    }
}

/// Palette metadata for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTypeDescriptor {
    pub kind: FieldKind,
    pub label: &'static str,
    pub icon: &'static str,
    pub category: FieldCategory,
}

impl FieldTypeDescriptor {
    /// Fresh default attributes for this kind.
    pub fn default_body(&self) -> FieldBody {
        default_body(self.kind)
    }
}

/// Looks up palette metadata for a kind.
pub fn describe(kind: FieldKind) -> FieldTypeDescriptor {
    let (label, icon, category) = match kind {
        FieldKind::Text => ("Text Input", "✏️", FieldCategory::Inputs),
        FieldKind::Email => ("Email", "✉️", FieldCategory::Inputs),
        FieldKind::Number => ("Number", "#", FieldCategory::Inputs),
        FieldKind::Phone => ("Phone", "📞", FieldCategory::Inputs),
        FieldKind::Url => ("URL", "🔗", FieldCategory::Inputs),
        FieldKind::Textarea => ("Textarea", "📝", FieldCategory::Inputs),
        FieldKind::Password => ("Password", "🔒", FieldCategory::Inputs),
        FieldKind::Date => ("Date", "📅", FieldCategory::Inputs),
        FieldKind::File => ("File Upload", "📎", FieldCategory::Inputs),
        FieldKind::Select => ("Dropdown", "▾", FieldCategory::Choice),
        FieldKind::Radio => ("Radio Group", "⊙", FieldCategory::Choice),
        FieldKind::Checkbox => ("Checkboxes", "☑", FieldCategory::Choice),
        FieldKind::Toggle => ("Toggle", "⬡", FieldCategory::Choice),
        FieldKind::Heading => ("Heading", "H", FieldCategory::Layout),
        FieldKind::Paragraph => ("Paragraph", "P", FieldCategory::Layout),
        FieldKind::Divider => ("Divider", "—", FieldCategory::Layout),
    };
    FieldTypeDescriptor {
        kind,
        label,
        icon,
        category,
    }
}

/// Looks up palette metadata by wire name; `None` for unknown kinds.
pub fn describe_named(kind: &str) -> Option<FieldTypeDescriptor> {
    kind.parse::<FieldKind>().ok().map(describe)
}

/// Categories in display order, each with its kinds in registry order.
pub fn palette() -> Vec<(FieldCategory, Vec<FieldTypeDescriptor>)> {
    let mut categories = FieldCategory::ALL.to_vec();
    categories.sort_by_key(|category| category.order());
    categories
        .into_iter()
        .map(|category| {
            let kinds = FieldKind::ALL
                .into_iter()
                .map(describe)
                .filter(|descriptor| descriptor.category == category)
                .collect();
            (category, kinds)
        })
        .collect()
}

/// Creates a new field of `kind` with default attributes and a fresh id.
pub fn create(kind: FieldKind, ids: &mut impl IdSource) -> Field {
    let field = Field::new(ids.next_field_id(), default_body(kind));
    debug!(
        "event=field_create module=registry status=ok kind={} field_id={}",
        kind,
        field.id()
    );
    field
}

/// Creates a field from a wire kind name; `None` for unknown kinds.
pub fn create_named(kind: &str, ids: &mut impl IdSource) -> Option<Field> {
    match kind.parse::<FieldKind>() {
        Ok(kind) => Some(create(kind, ids)),
        Err(err) => {
            debug!("event=field_create module=registry status=skipped reason=\"{err}\"");
            None
        }
    }
}

/// Default attributes for `kind`.
pub fn default_body(kind: FieldKind) -> FieldBody {
    match kind {
        FieldKind::Text => FieldBody::Text(text_input("Text Field", "Enter text...")),
        FieldKind::Email => FieldBody::Email(text_input("Email Address", "you@example.com")),
        FieldKind::Number => FieldBody::Number(text_input("Number Field", "0")),
        FieldKind::Phone => FieldBody::Phone(text_input("Phone Number", "+1 (555) 000-0000")),
        FieldKind::Url => FieldBody::Url(text_input("Website URL", "https://")),
        FieldKind::Textarea => FieldBody::Textarea(TextareaInput {
            control: Control::new("Long Text"),
            placeholder: "Enter your message...".to_string(),
            rows: 4,
        }),
        FieldKind::Password => FieldBody::Password(text_input("Password", "Enter password...")),
        FieldKind::Date => FieldBody::Date(Control::new("Date")),
        FieldKind::File => FieldBody::File(FileInput {
            control: Control::new("File Upload").with_help_text("Drag & drop or click to upload"),
            accept: String::new(),
            multiple: false,
        }),
        FieldKind::Select => FieldBody::Select(choice_input("Select Option", 3)),
        FieldKind::Radio => FieldBody::Radio(choice_input("Choose One", 2)),
        FieldKind::Checkbox => FieldBody::Checkbox(choice_input("Select All That Apply", 2)),
        FieldKind::Toggle => FieldBody::Toggle(ToggleInput {
            control: Control::new("Enable Feature"),
            default_value: false,
        }),
        FieldKind::Heading => FieldBody::Heading(HeadingBlock {
            content: "Section Heading".to_string(),
            level: HeadingLevel::H2,
        }),
        FieldKind::Paragraph => FieldBody::Paragraph(ParagraphBlock {
            content: "Add some descriptive text here to help users understand this section."
                .to_string(),
        }),
        FieldKind::Divider => FieldBody::Divider,
    }
}

fn text_input(label: &str, placeholder: &str) -> TextInput {
    TextInput {
        control: Control::new(label),
        placeholder: placeholder.to_string(),
    }
}

fn choice_input(label: &str, option_count: usize) -> ChoiceInput {
    let options = (1..=option_count)
        .map(|n| FieldOption::new(format!("Option {n}"), format!("option_{n}")))
        .collect();
    ChoiceInput {
        control: Control::new(label),
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::{default_body, describe, FieldCategory};
    use crate::model::field::{FieldBody, FieldKind};

    #[test]
    fn every_kind_defaults_to_its_own_variant() {
        for kind in FieldKind::ALL {
            assert_eq!(default_body(kind).kind(), kind);
        }
    }

    #[test]
    fn toggle_is_grouped_with_choice_fields() {
        assert_eq!(describe(FieldKind::Toggle).category, FieldCategory::Choice);
        assert_eq!(describe(FieldKind::Divider).category, FieldCategory::Layout);
    }

    #[test]
    fn select_starts_with_three_options() {
        let FieldBody::Select(select) = default_body(FieldKind::Select) else {
            panic!("select default must be a select body");
        };
        assert_eq!(select.options.len(), 3);
        assert_eq!(select.options[2].value, "option_3");
    }
}
