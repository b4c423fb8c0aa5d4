/// Largest message a chat channel accepts.
pub const DEFAULT_MAX_CHUNK_LEN: usize = 2000;

/// Pack lines into newline-joined chunks of at most `max_len` characters.
///
/// Lines are never split: a line that does not fit closes the current chunk
/// and starts the next one, and a line longer than `max_len` becomes a chunk on
/// its own. Blank lines at the start of a chunk are dropped and empty chunks
/// are never produced.
pub fn chunk_lines<S: AsRef<str>>(lines: &[S], max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for line in lines {
        let line = line.as_ref();
        let line_len = line.chars().count();

        if current.is_empty() {
            current.push_str(line);
            current_len = line_len;
        } else if current_len + 1 + line_len > max_len {
            chunks.push(std::mem::take(&mut current));
            current.push_str(line);
            current_len = line_len;
        } else {
            current.push('\n');
            current.push_str(line);
            current_len += 1 + line_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
