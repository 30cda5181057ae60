//! Post model -> entity mapper

use agora_core::{DomainError, EntityId, Post, PostKind};

use crate::models::PostModel;

impl TryFrom<PostModel> for Post {
    type Error = DomainError;

    fn try_from(model: PostModel) -> Result<Self, Self::Error> {
        let kind = model.kind.parse::<PostKind>().map_err(|_| {
            DomainError::InternalError(format!(
                "post {} has unknown kind {:?}",
                model.id, model.kind
            ))
        })?;

        Ok(Post {
            id: EntityId::new(model.id),
            author_id: EntityId::new(model.author_id),
            kind,
            created_at: model.created_at,
        })
    }
}
