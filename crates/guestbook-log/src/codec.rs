use bytes::{BufMut, Bytes, BytesMut};
use guestbook_types::{Drawing, DELIMITER};

/// Codec between the stored log blob and the ordered list of drawings.
///
/// Layout: `drawing (0xFF drawing)*`. No length prefixes, no leading or
/// trailing delimiter. Decoding is total: any byte string decodes, and
/// empty segments (adjacent delimiters, or a delimiter at either end) are
/// dropped rather than surfaced as empty drawings.
pub struct DrawingCodec;

impl DrawingCodec {
    /// Split a log blob into drawings. Segments share the blob's buffer.
    pub fn decode(blob: &Bytes) -> Vec<Drawing> {
        let mut drawings = Vec::new();
        let mut start = 0;
        for (i, &byte) in blob.iter().enumerate() {
            if byte == DELIMITER {
                if i > start {
                    drawings.push(Drawing::new(blob.slice(start..i)));
                }
                start = i + 1;
            }
        }
        if start < blob.len() {
            drawings.push(Drawing::new(blob.slice(start..)));
        }
        drawings
    }

    /// Join drawings with a single delimiter between neighbours.
    pub fn encode(drawings: &[Drawing]) -> Bytes {
        let payload: usize = drawings.iter().map(Drawing::len).sum();
        let separators = drawings.len().saturating_sub(1);
        let mut buf = BytesMut::with_capacity(payload + separators);
        for (i, drawing) in drawings.iter().enumerate() {
            if i > 0 {
                buf.put_u8(DELIMITER);
            }
            buf.put_slice(drawing.as_bytes());
        }
        buf.freeze()
    }

    /// Number of drawings in a blob, without materialising them.
    pub fn count(blob: &[u8]) -> usize {
        blob.split(|&b| b == DELIMITER)
            .filter(|segment| !segment.is_empty())
            .count()
    }
}
