//! Timezone stage: fallback for zone names the time stage did not claim.
//!
//! Applied only when the time stage left no zone behind. Scans from the end
//! of the sequence backward for a named-timezone token, records its offset,
//! and deletes just that token. Daylight names additionally set the DST
//! flag. Finding nothing is not an error.

use crate::calendar::{DateTime, FieldFlags};
use crate::{TokenKind, TokenSeq};

pub(crate) fn run(seq: &mut TokenSeq, dt: &mut DateTime) -> usize {
    if dt.flags.contains(FieldFlags::ZONE) {
        super::trace("timezone", 0, seq);
        return 0;
    }
    let mut cursor = seq.last();
    while let Some(idx) = cursor {
        match seq.token(idx).kind {
            TokenKind::TzStd | TokenKind::TzDst => {
                dt.tz_offset_minutes = seq.token(idx).value;
                if seq.token(idx).kind == TokenKind::TzDst {
                    dt.is_dst = true;
                }
                dt.flags |= FieldFlags::ZONE;
                seq.delete(idx);
                super::trace("timezone", 1, seq);
                return 1;
            }
            _ => cursor = seq.prev(idx),
        }
    }
    super::trace("timezone", 0, seq);
    0
}
