//! Packet Decoder: frames packets off a [`ByteSource`].
//!
//! The tag byte is awaited for a short timeout so an idle line does not
//! stall the loop. Payload fields are then read with a zero timeout: they
//! must already be buffered, otherwise the packet is abandoned. Abandoned
//! bytes are not pushed back, so a short frame can leave the stream
//! misaligned until a later tag happens to line up again.

use core::time::Duration;

use kvm_proto::{Packet, PacketKind, MAX_PACKET_SIZE};

use crate::input::{ByteSource, InputError};

/// Read and decode the next packet.
///
/// Returns `Ok(None)` when no tag byte arrived within `kind_timeout`.
///
/// # Errors
///
/// - [`InputError::UnknownKind`] if the tag is not a packet kind. Only the
///   tag byte is consumed.
/// - [`InputError::Truncated`] if a payload field was short.
/// - Any error reported by `source`.
pub async fn decode_next<S: ByteSource>(
    source: &mut S,
    kind_timeout: Duration,
) -> Result<Option<Packet>, InputError> {
    let mut tag = [0u8; 1];
    if source.read(&mut tag, kind_timeout).await? == 0 {
        return Ok(None);
    }

    let kind = PacketKind::from_tag(tag[0]).ok_or(InputError::UnknownKind(tag[0]))?;

    let mut payload = [0u8; MAX_PACKET_SIZE - 1];
    let mut at = 0;
    for &width in kind.field_widths() {
        let field = &mut payload[at..at + width];
        if source.read(field, Duration::ZERO).await? < width {
            return Err(InputError::Truncated(kind));
        }
        at += width;
    }

    // Every field was read in full, so the payload cannot be short.
    Packet::from_payload(kind, &payload[..at])
        .map(Some)
        .map_err(|_| InputError::Truncated(kind))
}
