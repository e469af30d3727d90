use roster_tools::{run, Backend, Utility};

#[tokio::main]
async fn main() {
    run(Backend::Sql, Utility::SeedDatabase).await;
}
