//! View model for the article form
//!
//! Projects a [`FormState`] onto the strings and flags the page shows. Both
//! the terminal printer and the panel renderer read from this, so what the
//! user sees is decided in one place.

use std::fmt::Write as _;

use crate::app::FormState;
use crate::domain::{LabelTone, PredictionResult};

pub const BRAND: &str = "Veritium";
pub const BRAND_SUBTITLE: &str = "Authenticity Engine";
pub const VERSION_TAG: &str = "v1.0";

pub const PROMO_HEADING: &str = "News integrity, made simple.";
pub const PROMO_BODY: &str = "A clean and focused tool designed to help you quickly check the \
reliability of online articles. Built with clarity and precision, it blends modern design with \
practical machine-learning.";
pub const PROMO_POINTS: [&str; 3] = [
    "Fast, lightweight classification",
    "Trained on real-world news data",
    "Clear results with confidence scoring",
];

pub const TITLE_LABEL: &str = "Title";
pub const TITLE_PLACEHOLDER: &str = "Article title...";
pub const BODY_LABEL: &str = "Article Text";
pub const BODY_PLACEHOLDER: &str = "Paste content...";

pub const SUBMIT_LABEL: &str = "Analyze";
pub const SUBMIT_BUSY_LABEL: &str = "Analyzing...";
pub const CLEAR_LABEL: &str = "Clear";

/// Lead-in of the result headline, shown before the prediction text
pub const PREDICTION_PREFIX: &str = "Prediction: ";
pub const RESULT_FOOTNOTE: &str = "This is computed by the Veritium model trained on your dataset.";
pub const EMPTY_HINT: &str = "Enter title or content and click Analyze to see results.";

/// A labelled text field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: &'static str,
    pub value: String,
    pub placeholder: &'static str,
}

impl FieldView {
    /// True when the field is empty and the placeholder shows instead
    pub fn shows_placeholder(&self) -> bool {
        self.value.is_empty()
    }

    /// Text drawn inside the field
    pub fn display_text(&self) -> &str {
        if self.shows_placeholder() {
            self.placeholder
        } else {
            &self.value
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub enabled: bool,
}

/// A stored prediction ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub prediction: String,
    pub confidence: String,
    pub tone: LabelTone,
}

impl ResultView {
    pub fn from_result(result: &PredictionResult) -> Self {
        Self {
            prediction: result.prediction.clone().unwrap_or_default(),
            confidence: result.confidence_percent(),
            tone: result.tone(),
        }
    }

    /// "Prediction: <text>"
    pub fn headline(&self) -> String {
        format!("{}{}", PREDICTION_PREFIX, self.prediction)
    }

    /// "Confidence: <NN.NN>%"
    pub fn confidence_line(&self) -> String {
        format!("Confidence: {}", self.confidence)
    }
}

/// Content of the result block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultPanel {
    /// No request has completed since the last clear
    Empty,
    Ready(ResultView),
}

/// Everything the form page displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: FieldView,
    pub body: FieldView,
    pub submit: ButtonView,
    pub clear: ButtonView,
    pub result: ResultPanel,
}

impl FormView {
    pub fn from_state(state: &FormState) -> Self {
        let pending = state.status.is_pending();

        Self {
            title: FieldView {
                label: TITLE_LABEL,
                value: state.input.title.clone(),
                placeholder: TITLE_PLACEHOLDER,
            },
            body: FieldView {
                label: BODY_LABEL,
                value: state.input.body.clone(),
                placeholder: BODY_PLACEHOLDER,
            },
            submit: ButtonView {
                label: if pending { SUBMIT_BUSY_LABEL } else { SUBMIT_LABEL },
                enabled: !pending,
            },
            clear: ButtonView {
                label: CLEAR_LABEL,
                enabled: true,
            },
            result: match &state.result {
                Some(result) => ResultPanel::Ready(ResultView::from_result(result)),
                None => ResultPanel::Empty,
            },
        }
    }

    /// Formats the form for a terminal
    ///
    /// With `color` set, the prediction text is wrapped in a 24-bit ANSI
    /// colour matching its label tone.
    pub fn render_text(&self, color: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} · {}  {}", BRAND, BRAND_SUBTITLE, VERSION_TAG);
        let _ = writeln!(out, "{}: {}", self.title.label, quoted(&self.title));
        let _ = writeln!(out, "{}: {}", self.body.label, quoted(&self.body));

        let submit_state = if self.submit.enabled { "" } else { " (disabled)" };
        let _ = writeln!(out, "[{}]{}  [{}]", self.submit.label, submit_state, self.clear.label);

        match &self.result {
            ResultPanel::Empty => {
                let _ = writeln!(out, "{}", EMPTY_HINT);
            }
            ResultPanel::Ready(view) => {
                let prediction = if color {
                    let (r, g, b) = view.tone.rgb();
                    format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, view.prediction)
                } else {
                    view.prediction.clone()
                };
                let _ = writeln!(out, "{}{}    {}", PREDICTION_PREFIX, prediction, view.confidence_line());
                let _ = writeln!(out, "{}", RESULT_FOOTNOTE);
            }
        }

        out
    }
}

fn quoted(field: &FieldView) -> String {
    if field.shows_placeholder() {
        format!("<{}>", field.placeholder)
    } else {
        format!("\"{}\"", field.value)
    }
}
