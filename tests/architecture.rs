//! Architecture verification suite
//!
//! Ensures the pipeline pieces stay thread-safe and the collaborator seams
//! stay object-safe.

use std::sync::Arc;

use happy_days::index::{Index, LocalSearchIndex, RemoteSearchIndex, SearchIndex};
use happy_days::transcribe::{HttpTranscriber, Transcriber};
use happy_days::{Memories, MemoryStore};

#[test]
fn test_pipeline_pieces_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<MemoryStore>();
    assert_send_sync::<LocalSearchIndex>();
    assert_send_sync::<RemoteSearchIndex>();
    assert_send_sync::<SearchIndex>();
    assert_send_sync::<HttpTranscriber>();
    assert_send_sync::<Memories>();
}

#[test]
fn test_collaborator_seams_are_object_safe() {
    fn takes_index(_: Arc<dyn Index>) {}
    fn takes_transcriber(_: Arc<dyn Transcriber>) {}

    takes_index(Arc::new(LocalSearchIndex::new()));
    takes_transcriber(Arc::new(HttpTranscriber::new("http://localhost:0", "ru-RU")));
}
