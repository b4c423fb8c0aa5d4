use crate::chunk::chunk_lines;
use crate::error::CoreError;
use crate::service::{Destination, MessageSink};

/// Chunk `lines` and send the chunks in order. Stops at the first failed
/// chunk; chunks already sent stay sent.
pub async fn deliver(
    sink: &dyn MessageSink,
    destination: &Destination,
    lines: &[String],
    max_len: usize,
) -> Result<usize, CoreError> {
    let chunks = chunk_lines(lines, max_len);
    let total = chunks.len();

    for (sent, chunk) in chunks.iter().enumerate() {
        if let Err(source) = sink.send(destination, chunk).await {
            tracing::error!(
                target: "taskcast.engine",
                sink = sink.name(),
                destination = %destination,
                sent = sent,
                total = total,
                error = %source,
                "delivery failed"
            );
            return Err(CoreError::Delivery {
                destination: destination.to_string(),
                sent,
                total,
                source,
            });
        }
    }

    tracing::info!(
        target: "taskcast.engine",
        sink = sink.name(),
        destination = %destination,
        messages = total,
        "delivered"
    );
    Ok(total)
}
