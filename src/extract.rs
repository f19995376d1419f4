//! Extraction stages.
//!
//! `parse` drains the lexer into a token sequence and then runs the four
//! stages over it in a fixed order; each stage consumes and deletes the
//! tokens it recognizes, leaving the remainder for the next stage:
//!
//! ```text
//! tokens ──> separator ──> time ──> timezone ──> date ──> DateTime fields
//!              (T)        (h:m:s,    (named      (pattern
//!                          am/pm,     fallback)   catalogue)
//!                          offset)
//! ```
//!
//! The separator and timezone stages are no-ops when nothing matches; the
//! time stage leaves the time fields at their epoch defaults when no time
//! shape is present. Only the date stage can reject the remaining tokens.
//!
//! Setting `CHRONOLEX_DEBUG_STAGES=1` prints what each stage consumed and
//! what it left behind.

pub(crate) mod date;
pub(crate) mod separator;
pub(crate) mod time;
pub(crate) mod timezone;

#[cfg(test)]
mod tests;

use crate::TokenSeq;

pub(crate) fn trace_enabled() -> bool {
    std::env::var_os("CHRONOLEX_DEBUG_STAGES").is_some()
}

pub(crate) fn trace(stage: &str, consumed: usize, seq: &TokenSeq) {
    if trace_enabled() {
        let remaining: Vec<String> = seq
            .live()
            .map(|i| {
                let token = seq.token(i);
                if token.fraction != 0.0 {
                    format!("{:?}({}+{})", token.kind, token.text, token.fraction)
                } else {
                    format!("{:?}({})", token.kind, token.text)
                }
            })
            .collect();
        eprintln!("[stage:{stage}] consumed={consumed} remaining=[{}]", remaining.join(" "));
    }
}
