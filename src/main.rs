#[tokio::main]
async fn main() {
    doctors_portal::start_server().await;
}
