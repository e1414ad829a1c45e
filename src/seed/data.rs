use anyhow::Result;
use serde_json::json;

use crate::model::{Record, ResourceKind};
use crate::store::traits::Store;

/// Demo dataset the server starts with: two tweets (ids 101 and 102),
/// two users (103, 104), likes tying them together and a pair of
/// videos. Insertion order matters — the id counter starts at 101 and
/// runs across all collections.
pub async fn load_seed_data<S: Store>(store: &S) -> Result<()> {
    store
        .insert(
            ResourceKind::Tweets,
            record(json!({"message": "Hello world, this is my first tweet", "user_id": 103})),
        )
        .await?;
    store
        .insert(
            ResourceKind::Tweets,
            record(json!({"message": "REST services are more fun than expected", "user_id": 104})),
        )
        .await?;
    store
        .insert(
            ResourceKind::Users,
            record(json!({"firstname": "Tabea", "lastname": "Tester"})),
        )
        .await?;
    store
        .insert(
            ResourceKind::Users,
            record(json!({"firstname": "Theo", "lastname": "Tester"})),
        )
        .await?;
    store
        .insert(
            ResourceKind::Likes,
            record(json!({"tweet_id": 101, "user_id": 104})),
        )
        .await?;
    store
        .insert(
            ResourceKind::Likes,
            record(json!({"tweet_id": 102, "user_id": 103})),
        )
        .await?;
    store
        .insert(
            ResourceKind::Videos,
            record(json!({
                "title": "Gone with the Wind",
                "description": "",
                "src": "gone.mp4",
                "length": 14280,
                "playcount": 0,
                "ranking": 0
            })),
        )
        .await?;
    store
        .insert(
            ResourceKind::Videos,
            record(json!({
                "title": "Superman returns",
                "description": "a man in a cape",
                "src": "superman.mp4",
                "length": 9240,
                "playcount": 4,
                "ranking": 2
            })),
        )
        .await?;

    log::info!("seeded demo records for all resource kinds");
    Ok(())
}

fn record(value: serde_json::Value) -> Record {
    value.as_object().cloned().unwrap_or_default()
}
