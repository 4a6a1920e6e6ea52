//! Interactive controls and the rows that hold them.

use serde::{Deserialize, Serialize};

/// Button presentation. `Link` and `Premium` buttons never produce activations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
    Link,
    Premium,
}

impl ButtonStyle {
    /// Whether pressing a button of this style delivers an activation id
    pub fn is_actionable(self) -> bool {
        !matches!(self, ButtonStyle::Link | ButtonStyle::Premium)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    pub description: Option<String>,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: None,
        }
    }
}

/// A single interactive control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    Button {
        /// Activation id; absent for link buttons
        custom_id: Option<String>,
        label: String,
        style: ButtonStyle,
        url: Option<String>,
        #[serde(default)]
        disabled: bool,
    },
    Select {
        custom_id: String,
        placeholder: Option<String>,
        options: Vec<SelectOption>,
    },
}

impl Control {
    pub fn button(custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Control::Button {
            custom_id: Some(custom_id.into()),
            label: label.into(),
            style: ButtonStyle::Primary,
            url: None,
            disabled: false,
        }
    }

    pub fn styled_button(
        custom_id: impl Into<String>,
        label: impl Into<String>,
        style: ButtonStyle,
    ) -> Self {
        Control::Button {
            custom_id: Some(custom_id.into()),
            label: label.into(),
            style,
            url: None,
            disabled: false,
        }
    }

    pub fn link(url: impl Into<String>, label: impl Into<String>) -> Self {
        Control::Button {
            custom_id: None,
            label: label.into(),
            style: ButtonStyle::Link,
            url: Some(url.into()),
            disabled: false,
        }
    }

    pub fn select(custom_id: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Control::Select {
            custom_id: custom_id.into(),
            placeholder: None,
            options,
        }
    }

    pub fn custom_id(&self) -> Option<&str> {
        match self {
            Control::Button { custom_id, .. } => custom_id.as_deref(),
            Control::Select { custom_id, .. } => Some(custom_id),
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Control::Select { .. })
    }

    /// Activation id of a control that can actually be clicked
    pub fn actionable_id(&self) -> Option<&str> {
        match self {
            Control::Button {
                custom_id, style, ..
            } if style.is_actionable() => custom_id.as_deref(),
            Control::Button { .. } => None,
            Control::Select { custom_id, .. } => Some(custom_id),
        }
    }
}

/// Horizontal row of controls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRow {
    pub controls: Vec<Control>,
}

impl ActionRow {
    pub fn new(controls: Vec<Control>) -> Self {
        Self { controls }
    }

    pub fn push(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }

    /// Select menus occupy a whole row, so the first control decides the row kind
    pub fn is_select_row(&self) -> bool {
        self.controls.first().map(Control::is_select).unwrap_or(false)
    }
}
