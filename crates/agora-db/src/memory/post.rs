//! In-memory content store

use async_trait::async_trait;
use dashmap::DashMap;

use agora_core::{EntityId, Post, PostRepository, RepoResult};

/// Posts keyed by id
#[derive(Debug, Default)]
pub struct MemoryPostRepository {
    posts: DashMap<EntityId, Post>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a post
    pub fn insert(&self, post: Post) {
        self.posts.insert(post.id, post);
    }

    /// Delete a post, returning it if it existed
    pub fn remove(&self, id: EntityId) -> Option<Post> {
        self.posts.remove(&id).map(|(_, post)| post)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn find_by_id(&self, id: EntityId) -> RepoResult<Option<Post>> {
        Ok(self.posts.get(&id).map(|entry| entry.value().clone()))
    }
}
