use super::format::format_inr_paise;
use super::types::{PinStep, Transaction, TransactionKind, TransactionMeta};

pub const PIN_LENGTH: usize = 4;
pub const PIN_MISMATCH_MESSAGE: &str = "PINs do not match. Please try again.";

impl TransactionKind {
    /// Maps the backend's transaction type string. `legacy` entries predate the
    /// sent/received split and were always credits.
    pub fn from_type(transaction_type: &str) -> Self {
        match transaction_type {
            "received" | "legacy" => TransactionKind::Received,
            "sent" => TransactionKind::Sent,
            "locker_transfer" | "transfer" => TransactionKind::LockerTransfer,
            _ => TransactionKind::Other,
        }
    }
}

fn note_or(note: &str, fallback: &str) -> String {
    if note.is_empty() {
        fallback.to_string()
    } else {
        note.to_string()
    }
}

pub fn describe_transaction(tx: &Transaction) -> TransactionMeta {
    let kind = TransactionKind::from_type(&tx.transaction_type);
    let recipient = tx.recipient_label.as_deref().filter(|r| !r.is_empty());

    let (label, sublabel, prefix, badge) = match kind {
        TransactionKind::Received => (
            recipient.map_or_else(|| "Money Received".to_string(), |r| format!("From {r}")),
            note_or(&tx.note, "Received"),
            "+",
            "Received".to_string(),
        ),
        TransactionKind::Sent => (
            recipient.map_or_else(|| "Money Sent".to_string(), |r| format!("To {r}")),
            note_or(&tx.note, "Sent"),
            "-",
            "Sent".to_string(),
        ),
        TransactionKind::LockerTransfer => (
            "To Digital Locker".to_string(),
            note_or(&tx.note, "Locker transfer"),
            "-",
            "Locked".to_string(),
        ),
        TransactionKind::Other => (
            "Transaction".to_string(),
            note_or(&tx.note, "Wallet activity"),
            "",
            tx.transaction_type.clone(),
        ),
    };

    TransactionMeta {
        kind,
        label,
        sublabel,
        prefix,
        badge,
        amount_text: format!("{prefix}₹{}", format_inr_paise(tx.amount)),
    }
}

/// Four-digit keypad buffer. A PIN is handed back as soon as the fourth digit
/// lands, and the buffer clears.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinPad {
    entered: String,
    disabled: bool,
}

impl PinPad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entered_len(&self) -> usize {
        self.entered.len()
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn press_digit(&mut self, digit: char) -> Option<String> {
        if self.disabled || !digit.is_ascii_digit() || self.entered.len() >= PIN_LENGTH {
            return None;
        }
        self.entered.push(digit);
        if self.entered.len() == PIN_LENGTH {
            return Some(std::mem::take(&mut self.entered));
        }
        None
    }

    pub fn backspace(&mut self) {
        if !self.disabled {
            self.entered.pop();
        }
    }
}

/// Enter-then-confirm PIN setup. A mismatch starts over from `Enter` with an
/// error message; a matching confirmation yields the PIN to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinSetup {
    step: PinStep,
    first_pin: Option<String>,
    error: Option<&'static str>,
    pad: PinPad,
}

impl Default for PinSetup {
    fn default() -> Self {
        Self {
            step: PinStep::Enter,
            first_pin: None,
            error: None,
            pad: PinPad::new(),
        }
    }
}

impl PinSetup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> PinStep {
        self.step
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn prompt(&self) -> &'static str {
        match self.step {
            PinStep::Enter => "Enter a 4-digit PIN",
            PinStep::Confirm => "Confirm your PIN",
        }
    }

    pub fn entered_len(&self) -> usize {
        self.pad.entered_len()
    }

    /// Blocks input while a confirmed PIN is being submitted.
    pub fn set_pending(&mut self, pending: bool) {
        self.pad.set_disabled(pending);
    }

    pub fn backspace(&mut self) {
        self.pad.backspace();
    }

    /// Returns the confirmed PIN once both entries match.
    pub fn press_digit(&mut self, digit: char) -> Option<String> {
        let pin = self.pad.press_digit(digit)?;
        match self.step {
            PinStep::Enter => {
                self.first_pin = Some(pin);
                self.error = None;
                self.step = PinStep::Confirm;
                None
            }
            PinStep::Confirm if self.first_pin.as_deref() == Some(pin.as_str()) => Some(pin),
            PinStep::Confirm => {
                self.error = Some(PIN_MISMATCH_MESSAGE);
                self.step = PinStep::Enter;
                self.first_pin = None;
                None
            }
        }
    }

    /// Submission failed: start over without a mismatch message.
    pub fn reset_after_failure(&mut self) {
        self.step = PinStep::Enter;
        self.first_pin = None;
        self.pad = PinPad::new();
    }
}
