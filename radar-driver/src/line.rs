use crate::constants::MAX_LINE_LENGTH;
use std::collections::VecDeque;

/// Reassembles newline-terminated text lines from arbitrary byte chunks.
pub(crate) struct LineAssembler {
    buffer: VecDeque<u8>,
    // Set while skipping the tail of a line that outgrew MAX_LINE_LENGTH
    discarding: bool,
}

impl LineAssembler {
    pub(crate) fn new() -> LineAssembler {
        LineAssembler {
            buffer: VecDeque::new(),
            discarding: false,
        }
    }

    pub(crate) fn extend(&mut self, data: &[u8]) {
        self.buffer.extend(data);
    }

    /// Pops the next complete line, without its terminator.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub(crate) fn next_line(&mut self) -> Option<String> {
        loop {
            let end = match self.buffer.iter().position(|b| *b == b'\n') {
                Some(end) => end,
                None => {
                    if self.buffer.len() > MAX_LINE_LENGTH {
                        log::debug!("Discarding {} bytes without line terminator", self.buffer.len());
                        self.buffer.clear();
                        self.discarding = true;
                    }
                    return None;
                }
            };
            let line = self.buffer.drain(..=end).collect::<Vec<_>>();
            if self.discarding {
                // tail of an oversized line
                self.discarding = false;
                continue;
            }
            let text = String::from_utf8_lossy(&line[..end]);
            return Some(text.trim_end_matches('\r').to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_across_chunks() {
        let mut assembler = LineAssembler::new();
        assembler.extend(b"A:10:D:");
        assert_eq!(assembler.next_line(), None);
        assembler.extend(b"20.5\r\nEVENT:OBS");
        assert_eq!(assembler.next_line(), Some("A:10:D:20.5".to_string()));
        assert_eq!(assembler.next_line(), None);
        assembler.extend(b"TACLE\n\n");
        assert_eq!(assembler.next_line(), Some("EVENT:OBSTACLE".to_string()));
        assert_eq!(assembler.next_line(), Some("".to_string()));
        assert_eq!(assembler.next_line(), None);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut assembler = LineAssembler::new();
        assembler.extend(b"INFO:\xFFok\n");
        assert_eq!(assembler.next_line(), Some("INFO:\u{FFFD}ok".to_string()));
    }

    #[test]
    fn test_oversized_line_is_dropped() {
        let mut assembler = LineAssembler::new();
        assembler.extend(&[b'x'; MAX_LINE_LENGTH + 1]);
        assert_eq!(assembler.next_line(), None);
        assembler.extend(b"still the same line\nA:1:D:2\n");
        assert_eq!(assembler.next_line(), Some("A:1:D:2".to_string()));
    }
}
