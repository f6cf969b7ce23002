//! Like-set resolver - Da un insieme di archi like all'insieme degli id correlati

use crate::entities::{Like, LikeDirection};
use std::collections::BTreeSet;

/// Projects the relation edges of `user_id` onto the ids on the other side.
///
/// `edges` is the full set of likes touching the user (as liker or likee); edges
/// that do not involve the user in the requested role are ignored.
pub fn resolve_like_set(user_id: i32, direction: LikeDirection, edges: &[Like]) -> BTreeSet<i32> {
    match direction {
        LikeDirection::Likers => edges
            .iter()
            .filter(|like| like.likee_id == user_id)
            .map(|like| like.liker_id)
            .collect(),
        LikeDirection::Likees => edges
            .iter()
            .filter(|like| like.liker_id == user_id)
            .map(|like| like.likee_id)
            .collect(),
    }
}
