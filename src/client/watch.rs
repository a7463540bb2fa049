//! Watch stream decoding
//!
//! The API server answers a watch with one JSON encoded event per line. Lines
//! may be split across chunks, so chunks are buffered until a newline shows up.

use std::sync::Arc;

use futures::stream::{self, BoxStream};
use futures::StreamExt;

use crate::api::{Spec, WatchEvent};
use crate::codec::{decode_object, NegotiatedSerializer};
use crate::error::Result;
use crate::rest::ByteStream;

pub type WatchStream<S> = BoxStream<'static, Result<WatchEvent<S>>>;

struct LineState {
    chunks: ByteStream,
    buffer: Vec<u8>,
    done: bool,
}

impl LineState {
    /// Next complete line, or the unterminated tail once the input is done
    fn take_line(&mut self) -> Option<Vec<u8>> {
        if let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            return Some(self.buffer.drain(..=pos).collect());
        }
        if self.done && !self.buffer.is_empty() {
            return Some(std::mem::take(&mut self.buffer));
        }
        None
    }
}

pub(crate) fn decode_events<S: Spec>(
    chunks: ByteStream,
    serializer: Arc<dyn NegotiatedSerializer>,
) -> WatchStream<S> {
    let state = LineState {
        chunks,
        buffer: Vec::new(),
        done: false,
    };

    stream::unfold(state, move |mut state| {
        let serializer = serializer.clone();
        async move {
            loop {
                if let Some(line) = state.take_line() {
                    if line.iter().all(u8::is_ascii_whitespace) {
                        continue;
                    }
                    let event = decode_object::<WatchEvent<S>>(serializer.as_ref(), &line);
                    return Some((event, state));
                }
                if state.done {
                    return None;
                }
                match state.chunks.next().await {
                    Some(Ok(chunk)) => state.buffer.extend_from_slice(&chunk),
                    Some(Err(err)) => {
                        state.done = true;
                        state.buffer.clear();
                        return Some((Err(err), state));
                    }
                    None => state.done = true,
                }
            }
        }
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SnapshotSpec;
    use crate::codec::DirectCodecFactory;
    use crate::error::Error;
    use futures::TryStreamExt;

    fn chunks(parts: Vec<Result<&'static str>>) -> ByteStream {
        stream::iter(
            parts
                .into_iter()
                .map(|part| part.map(|s| s.as_bytes().to_vec()))
                .collect::<Vec<_>>(),
        )
        .boxed()
    }

    fn serializer() -> Arc<dyn NegotiatedSerializer> {
        Arc::new(DirectCodecFactory::default())
    }

    #[tokio::test]
    async fn events_split_across_chunks() {
        let input = chunks(vec![
            Ok(r#"{"type":"ADDED","object":{"metadata":{"name":"s1"}}}"#),
            Ok("\n{\"type\":\"DELE"),
            Ok(r#"TED","object":{"metadata":{"name":"s1"}}}"#),
            Ok("\n\n"),
        ]);

        let events: Vec<WatchEvent<SnapshotSpec>> = decode_events(input, serializer()).try_collect().await.unwrap();

        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], WatchEvent::Added(s) if s.name() == "s1"));
        assert!(matches!(&events[1], WatchEvent::Deleted(s) if s.name() == "s1"));
    }

    #[tokio::test]
    async fn unterminated_last_line_is_decoded() {
        let input = chunks(vec![Ok(r#"{"type":"MODIFIED","object":{"metadata":{"name":"s2"}}}"#)]);
        let events: Vec<WatchEvent<SnapshotSpec>> = decode_events(input, serializer()).try_collect().await.unwrap();
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn transport_error_ends_stream() {
        let input = chunks(vec![
            Ok("{\"type\":\"ADDED\",\"object\":{}}\n{\"type\""),
            Err(Error::Codec("connection reset".into())),
            Ok("{\"type\":\"ADDED\",\"object\":{}}\n"),
        ]);

        let results: Vec<Result<WatchEvent<SnapshotSpec>>> = decode_events(input, serializer()).collect().await;

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[tokio::test]
    async fn garbage_line_is_reported() {
        let input = chunks(vec![Ok("not json\n")]);
        let results: Vec<Result<WatchEvent<SnapshotSpec>>> = decode_events(input, serializer()).collect().await;
        assert!(matches!(results.as_slice(), [Err(Error::Codec(_))]));
    }
}
