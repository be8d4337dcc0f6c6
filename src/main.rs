use std::env;

use tonga::auth::SessionKeys;
use tonga::db::PgPool;
use tonga::engine::Engine;
use tonga::relay::Relay;
use tonga::server::serve;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let db_uri = env::var("DATABASE_URL").unwrap();
    let PgPool(pool) = PgPool::new(&db_uri, 5).await.unwrap();

    let keys = SessionKeys::from_env().unwrap();
    let engine = Engine::new(pool, keys.clone()).await.unwrap();
    let relay = Relay::new(keys.clone());

    serve(engine, relay, keys).await;
}
