//! Declarative flow definitions: the tolerant authoring format and the
//! canonical, validated shape the interpreter runs against.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::FlowError;

use super::slots::Slot;

/// Identifier of a step within a flow.
pub type StepId = String;

/// Sentinel flow authors use for "no second message".
const PASS_SENTINEL: &str = "pass";

// ── Authoring format ────────────────────────────────────────────────

/// One selectable choice as authored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionSpec {
    pub text: String,
    pub value: String,
}

/// A step as authored.
///
/// Tolerates the alternate field spellings found in existing flow files
/// (`mensage1`, `component`, `end`). Normalization happens once, in
/// [`Flow::load`]; the interpreter never sees these raw shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSpec {
    pub id: StepId,
    #[serde(alias = "mensage1")]
    pub message1: String,
    #[serde(default, alias = "mensage2")]
    pub message2: Option<String>,
    #[serde(default)]
    pub options: Vec<OptionSpec>,
    #[serde(default, alias = "component")]
    pub widget: Option<String>,
    #[serde(default)]
    pub next: Option<StepId>,
    #[serde(default, alias = "end")]
    pub terminal: bool,
}

impl StepSpec {
    pub fn new(id: impl Into<StepId>, message1: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message1: message1.into(),
            message2: None,
            options: Vec::new(),
            widget: None,
            next: None,
            terminal: false,
        }
    }

    pub fn with_message2(mut self, message2: impl Into<String>) -> Self {
        self.message2 = Some(message2.into());
        self
    }

    pub fn with_options(mut self, options: Vec<OptionSpec>) -> Self {
        self.options = options;
        self
    }

    pub fn with_widget(mut self, tag: impl Into<String>) -> Self {
        self.widget = Some(tag.into());
        self
    }

    pub fn with_next(mut self, next: impl Into<StepId>) -> Self {
        self.next = Some(next.into());
        self
    }

    pub fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }
}

/// A flow as authored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowSpec {
    #[serde(alias = "flow_name")]
    pub name: String,
    pub steps: Vec<StepSpec>,
    /// Step-id → slot table for captured responses.
    #[serde(default)]
    pub captures: HashMap<StepId, Slot>,
}

// ── Canonical shape ─────────────────────────────────────────────────

/// A choice offered to the user; `text` is shown, `value` is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub text: String,
    pub value: String,
}

/// Rich external pickers a step can embed in place of text or option input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidgetKind {
    #[serde(rename = "date-time")]
    DateTime,
    #[serde(rename = "barber")]
    Barber,
}

impl WidgetKind {
    /// Accepted authoring spellings for each widget.
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "date-time" | "DayTime" => Some(Self::DateTime),
            "barber" | "BarberPicker" => Some(Self::Barber),
            _ => None,
        }
    }
}

impl std::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::DateTime => "date-time",
            Self::Barber => "barber",
        };
        write!(f, "{s}")
    }
}

/// How a step expects the user to respond. A step has exactly one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseKind {
    FreeText,
    Options(Vec<ChoiceOption>),
    Widget(WidgetKind),
}

/// One node of the conversation graph, post-normalization.
#[derive(Debug, Clone)]
pub struct Step {
    pub id: StepId,
    pub message1: String,
    /// Second bot message. The `"pass"` sentinel and empty strings are
    /// normalized to `None` at load.
    pub message2: Option<String>,
    pub response: ResponseKind,
    /// Slot the response is captured into, from the flow's capture table.
    pub slot: Option<Slot>,
    /// Explicit successor; `None` means the following step in declaration
    /// order.
    pub next: Option<StepId>,
    pub terminal: bool,
}

/// A validated, immutable conversation flow.
///
/// Loaded once, shared read-only across the whole conversation.
#[derive(Debug, Clone)]
pub struct Flow {
    name: String,
    steps: Vec<Step>,
    index: HashMap<StepId, usize>,
}

impl Flow {
    /// Normalize and validate an authored flow.
    pub fn load(spec: FlowSpec) -> Result<Self, FlowError> {
        if spec.steps.is_empty() {
            return Err(FlowError::EmptyFlow { name: spec.name });
        }

        let mut index = HashMap::with_capacity(spec.steps.len());
        for (pos, step) in spec.steps.iter().enumerate() {
            if index.insert(step.id.clone(), pos).is_some() {
                return Err(FlowError::DuplicateStep {
                    name: spec.name.clone(),
                    id: step.id.clone(),
                });
            }
        }

        for id in spec.captures.keys() {
            if !index.contains_key(id) {
                return Err(FlowError::UnknownCaptureStep { id: id.clone() });
            }
        }

        let last = spec.steps.len() - 1;
        let mut steps = Vec::with_capacity(spec.steps.len());
        for (pos, raw) in spec.steps.iter().enumerate() {
            let response = match &raw.widget {
                Some(tag) if !raw.options.is_empty() => {
                    return Err(FlowError::ConflictingInput {
                        id: raw.id.clone(),
                        widget: tag.clone(),
                    });
                }
                Some(tag) => {
                    let kind = WidgetKind::from_tag(tag).ok_or_else(|| FlowError::UnknownWidget {
                        id: raw.id.clone(),
                        tag: tag.clone(),
                    })?;
                    ResponseKind::Widget(kind)
                }
                None if !raw.options.is_empty() => ResponseKind::Options(
                    raw.options
                        .iter()
                        .map(|o| ChoiceOption {
                            text: o.text.clone(),
                            value: o.value.clone(),
                        })
                        .collect(),
                ),
                None => ResponseKind::FreeText,
            };

            if !raw.terminal {
                match &raw.next {
                    Some(next) if !index.contains_key(next) => {
                        return Err(FlowError::UnresolvedNext {
                            id: raw.id.clone(),
                            next: next.clone(),
                        });
                    }
                    None if pos == last => {
                        return Err(FlowError::NoSuccessor { id: raw.id.clone() });
                    }
                    _ => {}
                }
            }

            let slot = spec.captures.get(&raw.id).copied();
            if !raw.terminal && slot.is_none() {
                return Err(FlowError::MissingSlot { id: raw.id.clone() });
            }

            steps.push(Step {
                id: raw.id.clone(),
                message1: raw.message1.clone(),
                message2: raw
                    .message2
                    .as_deref()
                    .filter(|m| !m.is_empty() && *m != PASS_SENTINEL)
                    .map(str::to_string),
                response,
                slot,
                next: raw.next.clone(),
                terminal: raw.terminal,
            });
        }

        Ok(Self {
            name: spec.name,
            steps,
            index,
        })
    }

    /// Parse a JSON flow definition and load it.
    pub fn from_json(json: &str) -> Result<Self, FlowError> {
        let spec: FlowSpec = serde_json::from_str(json)?;
        Self::load(spec)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The step the conversation starts at.
    pub fn first(&self) -> &Step {
        &self.steps[0]
    }

    pub fn get(&self, id: &str) -> Option<&Step> {
        self.index.get(id).map(|&pos| &self.steps[pos])
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Position of the successor of the step at `pos`: its explicit `next`,
    /// or the following step in declaration order. Terminal steps have none.
    pub fn successor_position(&self, pos: usize) -> Option<usize> {
        let step = self.steps.get(pos)?;
        if step.terminal {
            return None;
        }
        match &step.next {
            Some(next) => self.position(next),
            None if pos + 1 < self.steps.len() => Some(pos + 1),
            None => None,
        }
    }
}
