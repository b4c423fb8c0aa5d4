use async_trait::async_trait;
use taskcast_core::api::{Destination, MessageSink};
use tokio::io::AsyncWriteExt;

/// Prints messages instead of posting them. Used for `--dry-run`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

fn frame(destination: &Destination, content: &str) -> String {
    format!("----- to {destination} -----\n{content}\n")
}

#[async_trait]
impl MessageSink for StdoutSink {
    fn name(&self) -> &str {
        "stdout"
    }

    async fn send(&self, destination: &Destination, content: &str) -> anyhow::Result<()> {
        let mut out = tokio::io::stdout();
        out.write_all(frame(destination, content).as_bytes()).await?;
        out.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn frame_names_the_destination() {
        assert_eq!(
            frame(&Destination::Channel("42".into()), "a\nb"),
            "----- to channel 42 -----\na\nb\n"
        );
        assert_eq!(
            frame(&Destination::DirectMessage("7".into()), "x"),
            "----- to user 7 -----\nx\n"
        );
    }

    #[tokio::test]
    async fn send_never_fails() {
        StdoutSink::new()
            .send(&Destination::Channel("1".into()), "hola")
            .await
            .unwrap();
    }
}
