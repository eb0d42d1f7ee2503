/// Reassembles lines from arbitrarily split byte chunks.
///
/// Splitting happens on raw `\n` bytes, which never occur inside a multi-byte
/// UTF-8 sequence, so a character cut in half by a chunk boundary is simply
/// carried over with the rest of its line.
#[derive(Debug, Default)]
pub struct LineDecoder {
    partial: Vec<u8>,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and get back every line it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let Some(last_newline) = chunk.iter().rposition(|&b| b == b'\n') else {
            self.partial.extend_from_slice(chunk);
            return Vec::new();
        };

        self.partial.extend_from_slice(&chunk[..last_newline]);
        let complete = std::mem::replace(&mut self.partial, chunk[last_newline + 1..].to_vec());

        complete
            .split(|&b| b == b'\n')
            .map(decode_line)
            .collect()
    }

    /// Bytes buffered for the line still in progress.
    pub fn pending_len(&self) -> usize {
        self.partial.len()
    }

    /// End of input: the unterminated tail, if any.
    pub fn finish(&mut self) -> Option<String> {
        if self.partial.is_empty() {
            return None;
        }
        Some(decode_line(&std::mem::take(&mut self.partial)))
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
