//! Number Block
//!
//! A keypad of arithmetic buttons maintaining a running total. Every id carries the
//! instance's control id as suffix (`plus-10k-amount`, `reset-amount`) so several
//! blocks can share one display without stealing each other's activations.

use crate::action_id::{validate_trailing_id, ActionId, BACK_PREFIX, CONFIRM_PREFIX, RESET_PREFIX};
use crate::error::MenuError;
use crate::frame::{ActionRow, ButtonStyle, Control};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Magnitudes of each grid row, ordered `[outer, inner, mult]`
const GRID: [[i64; 3]; 3] = [[10, 1, 10], [1_000, 100, 100], [100_000, 10_000, 1_000]];

/// Arithmetic operation named by the leading id token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Minus,
    Mult,
    Plus,
}

impl Operation {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "minus" => Some(Operation::Minus),
            "mult" => Some(Operation::Mult),
            "plus" => Some(Operation::Plus),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Minus => "minus",
            Operation::Mult => "mult",
            Operation::Plus => "plus",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Operation::Minus => "-",
            Operation::Mult => "×",
            Operation::Plus => "+",
        }
    }

    /// Apply to `total`, saturating at the `i64` bounds
    pub fn apply(self, total: i64, magnitude: i64) -> i64 {
        match self {
            Operation::Minus => total.saturating_sub(magnitude),
            Operation::Mult => total.saturating_mul(magnitude),
            Operation::Plus => total.saturating_add(magnitude),
        }
    }
}

/// Parse a magnitude token: decimal digits with an optional trailing `k` (×1000)
pub fn parse_magnitude(token: &str) -> Option<i64> {
    let (digits, scale) = match token.strip_suffix('k') {
        Some(digits) => (digits, 1_000),
        None => (token, 1),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<i64>().ok()?.checked_mul(scale)
}

/// Render a magnitude the way ids carry it (`10000` -> `10k`)
pub fn format_magnitude(value: i64) -> String {
    if value >= 1_000 && value % 1_000 == 0 {
        format!("{}k", value / 1_000)
    } else {
        value.to_string()
    }
}

/// Arithmetic keypad with a running total
#[derive(Debug, Clone)]
pub struct NumberBlock {
    control_id: String,
    total: i64,
    rows: Vec<ActionRow>,
    ids: HashSet<String>,
}

impl NumberBlock {
    /// Build the keypad for `control_id`, which must be a single id segment
    pub fn new(control_id: impl Into<String>) -> Result<Self, MenuError> {
        let control_id = control_id.into();
        validate_trailing_id(&control_id)?;
        let mut rows: Vec<ActionRow> = GRID
            .iter()
            .map(|&[outer, inner, mult]| {
                ActionRow::new(vec![
                    Self::op_button(Operation::Minus, outer, &control_id),
                    Self::op_button(Operation::Minus, inner, &control_id),
                    Self::op_button(Operation::Mult, mult, &control_id),
                    Self::op_button(Operation::Plus, inner, &control_id),
                    Self::op_button(Operation::Plus, outer, &control_id),
                ])
            })
            .collect();
        rows.push(ActionRow::new(vec![
            Control::styled_button(
                format!("{}{}", BACK_PREFIX, control_id),
                "Back",
                ButtonStyle::Secondary,
            ),
            Control::styled_button(
                format!("{}{}", CONFIRM_PREFIX, control_id),
                "Confirm",
                ButtonStyle::Success,
            ),
            Control::styled_button(
                format!("{}{}", RESET_PREFIX, control_id),
                "Reset",
                ButtonStyle::Danger,
            ),
        ]));

        let ids = rows
            .iter()
            .flat_map(|row| row.controls.iter())
            .filter_map(Control::custom_id)
            .map(str::to_string)
            .collect();

        Ok(Self {
            control_id,
            total: 0,
            rows,
            ids,
        })
    }

    fn op_button(op: Operation, magnitude: i64, control_id: &str) -> Control {
        let style = match op {
            Operation::Minus => ButtonStyle::Danger,
            Operation::Mult => ButtonStyle::Primary,
            Operation::Plus => ButtonStyle::Success,
        };
        Control::styled_button(
            format!("{}-{}-{}", op.as_str(), format_magnitude(magnitude), control_id),
            format!("{}{}", op.symbol(), format_magnitude(magnitude)),
            style,
        )
    }

    pub fn control_id(&self) -> &str {
        &self.control_id
    }

    /// Three arithmetic rows followed by the back/confirm/reset row
    pub fn rows(&self) -> &[ActionRow] {
        &self.rows
    }

    pub fn owns(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn set_total(&mut self, total: i64) {
        self.total = total;
    }

    pub fn confirm_id(&self) -> String {
        format!("{}{}", CONFIRM_PREFIX, self.control_id)
    }

    pub fn back_id(&self) -> String {
        format!("{}{}", BACK_PREFIX, self.control_id)
    }

    /// Apply the operation encoded in `full_id` and return the new total.
    /// Ids that belong to another block, or that are not arithmetic, yield `None`.
    pub fn evaluate(&mut self, full_id: &str) -> Option<i64> {
        if !self.owns(full_id) {
            return None;
        }
        let id = ActionId::parse(full_id);
        if id.trailing() != self.control_id {
            return None;
        }

        if id.segments().len() == 2 && RESET_PREFIX.strip_suffix('-') == Some(id.leading()) {
            self.total = 0;
            debug!(control_id = %self.control_id, "Reset number block");
            return Some(self.total);
        }

        let op = Operation::parse(id.leading())?;
        let magnitude_token = id.magnitude()?;
        let Some(magnitude) = parse_magnitude(magnitude_token) else {
            warn!(id = %full_id, "Rejected magnitude token");
            return None;
        };

        self.total = op.apply(self.total, magnitude);
        debug!(
            control_id = %self.control_id,
            operation = op.as_str(),
            magnitude,
            total = self.total,
            "Evaluated number block"
        );
        Some(self.total)
    }
}
