use indexmap::IndexMap;
use serde::Serialize;

pub trait Threaded {
    fn message_id(&self) -> i32;
    fn parent_id(&self) -> Option<i32>;
}

/// A top-level comment and its direct replies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageThread<T> {
    #[serde(flatten)]
    pub message: T,
    pub replies: Vec<T>,
}

/// Groups flat comment rows into one level of threads. Top-level messages and
/// replies both keep their input order; replies to unknown parents are dropped.
pub fn thread_messages<T: Threaded>(messages: Vec<T>) -> Vec<MessageThread<T>> {
    let (parents, replies): (Vec<T>, Vec<T>) =
        messages.into_iter().partition(|m| m.parent_id().is_none());

    let mut threads: IndexMap<i32, MessageThread<T>> = parents
        .into_iter()
        .map(|message| {
            (
                message.message_id(),
                MessageThread {
                    message,
                    replies: Vec::new(),
                },
            )
        })
        .collect();

    for reply in replies {
        let parent = reply.parent_id().and_then(|id| threads.get_mut(&id));
        match parent {
            Some(thread) => thread.replies.push(reply),
            None => tracing::debug!(
                "dropping reply {} to missing message {:?}",
                reply.message_id(),
                reply.parent_id()
            ),
        }
    }

    threads.into_values().collect()
}
