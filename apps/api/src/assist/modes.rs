//! Assistant modes — maps each user-selectable mode to its system prompt,
//! sampling temperature, and output-token cap.
//!
//! The mapping is fixed at compile time. Handlers never pick prompts or
//! sampling values themselves; they go through `Mode::profile()` so every
//! invocation of a mode behaves identically.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assist::prompts;

const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;
/// QA reports carry a full Markdown table; this mode gets a higher cap.
const QA_CHECK_MAX_OUTPUT_TOKENS: u32 = 6144;

/// The five assistant modes offered by the UI selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    LabelSingle,
    LabelBatch,
    QaCheck,
    ExplainGuideline,
    CodeAssistant,
}

/// Every mode, in UI selector order.
pub const ALL_MODES: [Mode; 5] = [
    Mode::LabelSingle,
    Mode::LabelBatch,
    Mode::QaCheck,
    Mode::ExplainGuideline,
    Mode::CodeAssistant,
];

/// How input can be delivered for a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Free text, passed through to the prompt unchanged.
    #[default]
    Text,
    /// One entry per line; serialized into a single-column CSV payload.
    Lines,
    /// CSV content, pasted or read from an uploaded file.
    Csv,
}

/// Static invocation profile for one mode.
#[derive(Debug, Clone)]
pub struct ModeProfile {
    pub system_prompt: &'static str,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Mode {
    /// Returns the fixed prompt/sampling profile for this mode.
    ///
    /// The label modes and the QA check run deterministic (temperature 0.0);
    /// guideline explanation gets a little room to phrase things, and code
    /// generation slightly less.
    pub fn profile(&self) -> ModeProfile {
        match self {
            Mode::LabelSingle => ModeProfile {
                system_prompt: prompts::LABEL_SINGLE,
                temperature: 0.0,
                max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            },
            Mode::LabelBatch => ModeProfile {
                system_prompt: prompts::LABEL_BATCH,
                temperature: 0.0,
                max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            },
            Mode::QaCheck => ModeProfile {
                system_prompt: prompts::QA_CHECK,
                temperature: 0.0,
                max_output_tokens: QA_CHECK_MAX_OUTPUT_TOKENS,
            },
            Mode::ExplainGuideline => ModeProfile {
                system_prompt: prompts::EXPLAIN_GUIDELINE,
                temperature: 0.2,
                max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            },
            Mode::CodeAssistant => ModeProfile {
                system_prompt: prompts::PYTHON_ASSISTANT,
                temperature: 0.1,
                max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            },
        }
    }

    /// Stable identifier, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::LabelSingle => "label-single",
            Mode::LabelBatch => "label-batch",
            Mode::QaCheck => "qa-check",
            Mode::ExplainGuideline => "explain-guideline",
            Mode::CodeAssistant => "code-assistant",
        }
    }

    /// Human-readable name for the UI selector.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::LabelSingle => "Label Suggestion (Single Message)",
            Mode::LabelBatch => "Label Suggestion (Batch)",
            Mode::QaCheck => "QA Consistency Check",
            Mode::ExplainGuideline => "Explain Labeling Guideline",
            Mode::CodeAssistant => "Python Data Processing Assistant",
        }
    }

    /// One-line description shown under the selector.
    pub fn description(&self) -> &'static str {
        match self {
            Mode::LabelSingle => {
                "Assigns the best-fit label to one customer message, with confidence and reasoning."
            }
            Mode::LabelBatch => {
                "Labels every row of a small CSV snippet and returns a Markdown table."
            }
            Mode::QaCheck => "Reviews text/label pairs and flags rows whose labels look wrong.",
            Mode::ExplainGuideline => {
                "Explains the labeling guidelines with examples and common mistakes."
            }
            Mode::CodeAssistant => "Generates pandas/numpy/sklearn code for data-processing tasks.",
        }
    }

    /// Input kinds this mode accepts, mirroring what the input form offers.
    pub fn accepted_input_kinds(&self) -> &'static [InputKind] {
        match self {
            Mode::LabelSingle | Mode::ExplainGuideline | Mode::CodeAssistant => &[InputKind::Text],
            Mode::LabelBatch => &[InputKind::Lines, InputKind::Csv],
            Mode::QaCheck => &[InputKind::Text, InputKind::Csv],
        }
    }

    pub fn accepts(&self, kind: InputKind) -> bool {
        self.accepted_input_kinds().contains(&kind)
    }

    /// Header columns a CSV payload must carry for this mode.
    pub fn required_csv_columns(&self) -> &'static [&'static str] {
        match self {
            Mode::LabelBatch => &["text"],
            Mode::QaCheck => &["text", "label"],
            _ => &[],
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Lines => "lines",
            InputKind::Csv => "csv",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
