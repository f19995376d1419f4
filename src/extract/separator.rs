//! Separator stage: drop the ISO 8601 `T` between date and time.
//!
//! A lone `t` resolves through the military timezone table, so an input like
//! `2012-01-31T10:30` reaches this stage carrying a timezone token whose text
//! is `t`. When such a token has a real token after it, it is the date/time
//! separator and is deleted; a trailing `t` is left alone (it may genuinely
//! mean UTC-7). Finding nothing is not an error.

use crate::{TokenKind, TokenSeq};

pub(crate) fn run(seq: &mut TokenSeq) -> usize {
    let mut cursor = seq.first();
    while let Some(idx) = cursor {
        let token = seq.token(idx);
        if token.kind == TokenKind::TzStd && token.text == "t" {
            if let Some(next) = seq.next(idx) {
                if seq.token(next).kind != TokenKind::End {
                    seq.delete(idx);
                    super::trace("separator", 1, seq);
                    return 1;
                }
            }
        }
        cursor = seq.next(idx);
    }
    super::trace("separator", 0, seq);
    0
}
