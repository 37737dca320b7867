//! Typing-effect pacing for a reply that arrives from the provider in one piece
//!
//! The reply is cut into word tokens and released one per tick. The stream
//! owns its timer, so dropping it (as warp does when the client goes away)
//! stops the emission without any further work.

use futures_util::stream::{Stream, StreamExt};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tokio_stream::wrappers::IntervalStream;

/// Split a reply into the fragments the client appends in order
///
/// Splits on single spaces, and every fragment after the first carries one
/// leading space, so concatenating the fragments gives back `text` exactly.
pub fn word_fragments(text: &str) -> Vec<String> {
    text.split(' ')
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                word.to_string()
            } else {
                format!(" {}", word)
            }
        })
        .collect()
}

/// Yield `fragments` one at a time, `period` apart
///
/// The first fragment is released immediately.
pub fn paced<I>(fragments: I, period: Duration) -> impl Stream<Item = String> + Send + 'static
where
    I: IntoIterator<Item = String> + 'static,
    I::IntoIter: Send + 'static,
{
    // tokio intervals require a non-zero period
    let mut ticker = interval(period.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    IntervalStream::new(ticker)
        .zip(futures_util::stream::iter(fragments))
        .map(|(_tick, fragment)| fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_word_fragments() {
        assert_eq!(
            word_fragments("Take a deep breath."),
            vec!["Take", " a", " deep", " breath."]
        );
    }

    #[test]
    fn test_word_fragments_single_word() {
        assert_eq!(word_fragments("Hello"), vec!["Hello"]);
    }

    #[test]
    fn test_word_fragments_rebuild_text_exactly() {
        let text = "First line.\n\nSecond  line with  double spaces and a trailing space ";
        assert_eq!(word_fragments(text).concat(), text);
    }

    #[tokio::test]
    async fn test_paced_preserves_order() {
        let fragments = word_fragments("one two three four five");
        let collected: Vec<String> = paced(fragments.clone(), Duration::from_millis(1))
            .collect()
            .await;
        assert_eq!(collected, fragments);
    }

    #[tokio::test(start_paused = true)]
    async fn test_paced_waits_between_fragments() {
        let start = Instant::now();
        let collected: Vec<String> = paced(word_fragments("a b c d"), Duration::from_millis(50))
            .collect()
            .await;

        assert_eq!(collected.len(), 4);
        // first fragment is immediate, then three 50ms gaps
        assert_eq!(start.elapsed(), Duration::from_millis(150));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_stream_stops_emission() {
        let mut stream = Box::pin(paced(word_fragments("a b c d"), Duration::from_millis(50)));
        assert_eq!(stream.next().await.as_deref(), Some("a"));
        assert_eq!(stream.next().await.as_deref(), Some(" b"));
        drop(stream);
    }
}
