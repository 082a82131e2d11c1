#[tokio::main]
async fn main() -> anyhow::Result<()> {
    road_app::run().await
}
