#[actix_web::main]
async fn main() -> std::io::Result<()> {
    enrichment_lib::run().await
}
